use thiserror::Error;

/// Failures raised at the store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A managed reference was requested for an id that does not exist.
    #[error("Unable to find {entity} with id {id}")]
    EntityNotFound { entity: &'static str, id: i64 },

    /// A delete matched no row.
    #[error("No {entity} entity with id {id} exists")]
    EmptyResult { entity: &'static str, id: i64 },

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(e: sea_orm::DbErr) -> Self {
        StoreError::Database(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Resource not found: {entity} with id={id}")]
    ResourceNotFound { entity: &'static str, id: i64 },

    #[error("Validation: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        DomainError::ResourceNotFound { entity, id }
    }

    /// Id of the missing resource, if this is a not-found error.
    pub fn missing_id(&self) -> Option<i64> {
        match self {
            DomainError::ResourceNotFound { id, .. } => Some(*id),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_propagate_transparently() {
        let err: DomainError = StoreError::Database("connection reset".into()).into();
        assert_eq!(err.to_string(), "Database error: connection reset");
        assert_eq!(err.missing_id(), None);
    }

    #[test]
    fn not_found_carries_id() {
        let err = DomainError::not_found("Client", 1000);
        assert_eq!(err.missing_id(), Some(1000));
        assert_eq!(err.to_string(), "Resource not found: Client with id=1000");
    }
}
