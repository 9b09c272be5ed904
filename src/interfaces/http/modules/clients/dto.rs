//! Client request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::ClientDto;
use crate::config::PaginationConfig;
use crate::support::{
    ClientSortField, DomainError, DomainResult, PageRequest, Sort, SortDirection, MAX_OFFSET,
};

/// Body for creating or replacing a client
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientRequest {
    #[validate(length(min = 1, max = 120, message = "client name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "tax id is required"))]
    pub tax_id: String,
    #[validate(range(min = 0.0, message = "income must be non-negative"))]
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    /// Number of dependents
    #[serde(default)]
    pub children: u32,
}

impl From<ClientRequest> for ClientDto {
    fn from(req: ClientRequest) -> Self {
        Self {
            id: None,
            name: req.name,
            tax_id: req.tax_id,
            income: req.income,
            birth_date: req.birth_date,
            children: req.children,
        }
    }
}

/// Paging parameters for the client listing
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ClientPageParams {
    /// Zero-based page index. Default: 0
    #[serde(default)]
    pub page: u64,
    /// Page size. Default: 12, capped by configuration
    pub lines_per_page: Option<u64>,
    /// Field to order by (id, name, taxId, income, birthDate, children). Default: name
    pub order_by: Option<String>,
    /// ASC or DESC. Default: ASC
    pub direction: Option<String>,
}

impl ClientPageParams {
    pub fn to_page_request(&self, limits: &PaginationConfig) -> DomainResult<PageRequest> {
        let size = self
            .lines_per_page
            .unwrap_or(limits.default_page_size)
            .clamp(1, limits.max_page_size.max(1));

        let field = self
            .order_by
            .as_deref()
            .unwrap_or("name")
            .parse::<ClientSortField>()
            .map_err(DomainError::Validation)?;
        let direction = match self.direction.as_deref() {
            Some(d) => d.parse::<SortDirection>().map_err(DomainError::Validation)?,
            None => SortDirection::Asc,
        };

        if self.page.checked_mul(size).map_or(true, |offset| offset > MAX_OFFSET) {
            return Err(DomainError::Validation(format!(
                "page {} is out of range",
                self.page
            )));
        }

        Ok(PageRequest::of(self.page, size).with_sort(Sort { field, direction }))
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IncomeQuery {
    /// Exact income to match
    pub income: f64,
}
