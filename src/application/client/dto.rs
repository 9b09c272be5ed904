//! Client transfer object

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Client;

/// Boundary-facing copy of a client's fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    /// National tax identifier (CPF)
    pub tax_id: String,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    /// Number of dependents
    pub children: u32,
}

impl From<Client> for ClientDto {
    fn from(c: Client) -> Self {
        Self {
            id: c.id,
            name: c.name,
            tax_id: c.tax_id,
            income: c.income,
            birth_date: c.birth_date,
            children: c.children,
        }
    }
}

impl ClientDto {
    /// Unsaved entity carrying this DTO's fields. Any id is dropped.
    pub fn into_entity(self) -> Client {
        Client::new(
            self.name,
            self.tax_id,
            self.income,
            self.birth_date,
            self.children,
        )
    }

    /// Overwrite every mutable field of `entity`; its id is left alone.
    pub fn copy_onto(self, entity: &mut Client) {
        entity.name = self.name;
        entity.tax_id = self.tax_id;
        entity.income = self.income;
        entity.birth_date = self.birth_date;
        entity.children = self.children;
    }
}
