//! Client domain entity

use chrono::{DateTime, Utc};

/// A registered customer
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    /// Assigned by the store on insert; `None` until persisted
    pub id: Option<i64>,
    pub name: String,
    /// National tax identifier (CPF)
    pub tax_id: String,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    /// Number of dependents
    pub children: u32,
}

impl Client {
    /// A client that has not been persisted yet.
    pub fn new(
        name: impl Into<String>,
        tax_id: impl Into<String>,
        income: f64,
        birth_date: DateTime<Utc>,
        children: u32,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            tax_id: tax_id.into(),
            income,
            birth_date,
            children,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
