//! Page requests and paged results shared by stores and the HTTP layer

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort direction for paged queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// Client attributes a page can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientSortField {
    Id,
    Name,
    TaxId,
    Income,
    BirthDate,
    Children,
}

impl FromStr for ClientSortField {
    type Err = String;

    /// Accepts both the JSON (camelCase) and column (snake_case) spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "taxId" | "tax_id" | "cpf" => Ok(Self::TaxId),
            "income" => Ok(Self::Income),
            "birthDate" | "birth_date" => Ok(Self::BirthDate),
            "children" => Ok(Self::Children),
            other => Err(format!("cannot order clients by '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: ClientSortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: ClientSortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: ClientSortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Largest row offset or page size a store is asked for. SQL backends bind
/// both as signed 64-bit integers.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Page request: zero-based page index, page size and optional ordering.
///
/// Without a sort, stores return records ordered by id ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Option<Sort>,
}

impl PageRequest {
    /// `size` is raised to 1 when zero and capped at [`MAX_OFFSET`].
    pub fn of(page: u64, size: u64) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_OFFSET),
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Row offset of the first item, capped at [`MAX_OFFSET`].
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size).min(MAX_OFFSET)
    }
}

/// A bounded, ordered slice of a larger result set
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: &PageRequest) -> Self {
        let size = request.size.max(1);
        Self {
            items,
            total,
            page: request.page,
            size,
            total_pages: total.div_ceil(size),
        }
    }

    /// Transform every item, keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
            total_pages: self.total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(vec![1, 2], 25, &PageRequest::of(2, 12));
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);

        let exact = Page::new(Vec::<i32>::new(), 24, &PageRequest::of(0, 12));
        assert_eq!(exact.total_pages, 2);

        let none = Page::new(Vec::<i32>::new(), 0, &PageRequest::of(0, 12));
        assert_eq!(none.total_pages, 0);
        assert!(none.is_empty());
    }

    #[test]
    fn zero_size_is_raised_to_one() {
        let request = PageRequest::of(3, 0);
        assert_eq!(request.size, 1);
        assert_eq!(request.offset(), 3);
    }

    #[test]
    fn offset_and_size_stay_within_signed_range() {
        let request = PageRequest::of(u64::MAX / 2, 12);
        assert_eq!(request.offset(), MAX_OFFSET);

        let request = PageRequest::of(0, u64::MAX);
        assert_eq!(request.size, MAX_OFFSET);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2, 3], 7, &PageRequest::of(1, 3)).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20, 30]);
        assert_eq!(page.total, 7);
        assert_eq!(page.size, 3);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn parses_sort_parameters() {
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert_eq!("ASC".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert!("sideways".parse::<SortDirection>().is_err());

        assert_eq!("birthDate".parse::<ClientSortField>(), Ok(ClientSortField::BirthDate));
        assert_eq!("tax_id".parse::<ClientSortField>(), Ok(ClientSortField::TaxId));
        assert!("password".parse::<ClientSortField>().is_err());
    }
}
