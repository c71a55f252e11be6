use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::error::AppError;

/// Prices must stay below this to fit a `decimal(10, 2)` column.
const PRICE_LIMIT: u32 = 100_000_000;

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

/// Parse a path ID. Malformed IDs are reported the same way as unknown ones.
pub fn parse_id(raw: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("{what} with ID {raw} not found")))
}

/// Validate a trimmed display name (1-256 Unicode characters).
pub fn validate_display_name(name: &str) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 256 {
        return Err(AppError::Validation(
            "Display name must be 1-256 characters".into(),
        ));
    }
    Ok(())
}

/// Validate a required, non-blank text field.
pub fn validate_non_blank(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Validate a category list (no blank names).
pub fn validate_categories(categories: &[String]) -> Result<(), AppError> {
    categories
        .iter()
        .try_for_each(|c| validate_non_blank(c, "Category name"))
}

/// Validate a price: non-negative, at most two decimal places, fits `decimal(10, 2)`.
pub fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::Validation("Price must be >= 0".into()));
    }
    if price.normalize().scale() > 2 {
        return Err(AppError::Validation(
            "Price must have at most two decimal places".into(),
        ));
    }
    if price >= Decimal::from(PRICE_LIMIT) {
        return Err(AppError::Validation(format!(
            "Price must be below {PRICE_LIMIT}"
        )));
    }
    Ok(())
}

/// Remove duplicates, keeping the first occurrence of each name.
pub fn dedup_preserving_order(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
