use std::collections::HashSet;
use std::net::IpAddr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

/// Pagination metadata included in list responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 20)]
    pub per_page: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total: u64,
    /// Total number of pages.
    #[schema(example = 3)]
    pub total_pages: u64,
}

/// Plain pagination query for catalog listings.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page number (1-based). Default: 1.
    pub page: Option<u64>,
    /// Items per page (1-100). Default: 20.
    pub per_page: Option<u64>,
}

/// Normalize page parameters: page >= 1, per_page within 1..=100 (default 20).
///
/// Rejects pages whose row offset does not fit in a SQL `BIGINT`.
pub fn page_bounds(page: Option<u64>, per_page: Option<u64>) -> Result<(u64, u64), AppError> {
    let page = Ord::max(page.unwrap_or(1), 1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1).checked_mul(per_page);
    if !offset.is_some_and(|o| o <= i64::MAX as u64) {
        return Err(AppError::Validation(format!("Page {page} is out of range")));
    }
    Ok((page, per_page))
}

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Validate a required short string (1..=max Unicode characters after trimming).
pub fn validate_required(value: &str, field: &str, max: usize) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(())
}

/// Validate an optional string against a maximum length.
pub fn validate_optional(value: Option<&str>, field: &str, max: usize) -> Result<(), AppError> {
    if let Some(value) = value
        && value.chars().count() > max
    {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Validate an optional IPv4 / IPv6 address.
pub fn validate_ip(value: Option<&str>, field: &str) -> Result<(), AppError> {
    if let Some(value) = value
        && value.trim().parse::<IpAddr>().is_err()
    {
        return Err(AppError::Validation(format!(
            "{field} must be a valid IPv4 or IPv6 address"
        )));
    }
    Ok(())
}

/// Normalize an IP address to its canonical text form.
pub fn normalize_ip(value: Option<String>) -> Option<String> {
    value.map(|v| match v.trim().parse::<IpAddr>() {
        Ok(ip) => ip.to_string(),
        Err(_) => v,
    })
}

/// Validate that an end date does not precede a start date.
pub fn validate_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    start_field: &str,
    end_field: &str,
) -> Result<(), AppError> {
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        return Err(AppError::Validation(format!(
            "{end_field} must not be before {start_field}"
        )));
    }
    Ok(())
}

/// Validate an ID list (no duplicates, max length). Empty is allowed.
pub fn validate_id_set(ids: &[i32], name: &str, max: usize) -> Result<(), AppError> {
    if ids.len() > max {
        return Err(AppError::Validation(format!("Too many {name}: max {max}")));
    }
    let mut seen = HashSet::new();
    for &id in ids {
        if !seen.insert(id) {
            return Err(AppError::Validation(format!("Duplicate {name} ID: {id}")));
        }
    }
    Ok(())
}

/// Trim an optional string and collapse blank values to `None`.
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
