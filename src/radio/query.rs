//! Query parameters accepted by the radio endpoints and their bounds.

use serde::Deserialize;
use thiserror::Error;

pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 100;
pub const DEFAULT_LIMIT: u32 = 50;

/// Out-of-range paging input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("limit must be between 1 and 100, got {0}")]
    Limit(i64),

    #[error("offset must be greater than or equal to 0, got {0}")]
    Offset(i64),
}

/// Raw `?limit=` for endpoints that only page by size.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

impl LimitParams {
    pub fn validate(&self) -> Result<u32, QueryError> {
        check_limit(self.limit)
    }
}

/// Raw search parameters as received on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    pub country: Option<String>,
    pub tag: Option<String>,
    pub language: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SearchParams {
    /// Check bounds and drop empty filters.
    pub fn validate(self) -> Result<SearchQuery, QueryError> {
        let limit = check_limit(self.limit)?;
        let offset = match self.offset {
            None => 0,
            Some(o) if o < 0 => return Err(QueryError::Offset(o)),
            Some(o) => o as u64,
        };

        Ok(SearchQuery {
            name: non_empty(self.name),
            country: non_empty(self.country),
            tag: non_empty(self.tag),
            language: non_empty(self.language),
            limit,
            offset,
        })
    }
}

/// Validated station search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub country: Option<String>,
    pub tag: Option<String>,
    pub language: Option<String>,
    pub limit: u32,
    pub offset: u64,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            name: None,
            country: None,
            tag: None,
            language: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

fn check_limit(limit: Option<i64>) -> Result<u32, QueryError> {
    match limit {
        None => Ok(DEFAULT_LIMIT),
        Some(l) if (MIN_LIMIT..=MAX_LIMIT).contains(&l) => Ok(l as u32),
        Some(l) => Err(QueryError::Limit(l)),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
