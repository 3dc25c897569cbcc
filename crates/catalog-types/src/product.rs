//! Product types and validation

use serde::{Deserialize, Serialize};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_PRICE: f64 = 999_999.99;

/// A catalog product as stored and served.
///
/// The identifier is assigned by storage on creation and never changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// Incoming product payload, before storage has assigned an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a draft against the product rules.
///
/// Returns one error per violated rule. Storage never sees a draft that
/// fails this check; validation lives strictly above the storage boundary.
pub fn validate_draft(draft: &ProductDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if draft.name.trim().is_empty() {
        errors.push(FieldError::new("name", "name is required"));
    }

    if draft.name.chars().count() > MAX_NAME_LEN {
        errors.push(FieldError::new(
            "name",
            "name must be at most 100 characters",
        ));
    }

    // Written negated so NaN fails the rule too.
    if !(draft.price > 0.0) {
        errors.push(FieldError::new("price", "price must be greater than 0"));
    }

    if draft.price > MAX_PRICE {
        errors.push(FieldError::new("price", "price is too large"));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_draft_passes() {
        let errors = validate_draft(&ProductDraft::new("Book", 10.99));
        assert!(errors.is_empty());
    }

    #[test]
    fn empty_name_is_one_error() {
        let errors = validate_draft(&ProductDraft::new("", 10.0));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn whitespace_name_is_rejected() {
        let errors = validate_draft(&ProductDraft::new("   ", 10.0));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn nan_price_is_rejected() {
        let errors = validate_draft(&ProductDraft::new("Book", f64::NAN));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "price");
    }

    #[test]
    fn zero_price_is_one_error() {
        let errors = validate_draft(&ProductDraft::new("Book", 0.0));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "price");
    }

    #[test]
    fn empty_name_and_negative_price_is_exactly_two_errors() {
        let errors = validate_draft(&ProductDraft::new("", -5.0));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[1].field, "price");
    }

    #[test]
    fn overlong_name_is_rejected() {
        let errors = validate_draft(&ProductDraft::new("x".repeat(101), 10.0));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn name_at_limit_is_accepted() {
        let errors = validate_draft(&ProductDraft::new("x".repeat(100), 10.0));
        assert!(errors.is_empty());
    }

    #[test]
    fn price_above_cap_is_rejected() {
        let errors = validate_draft(&ProductDraft::new("Book", 1_000_000.0));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "price");
    }

    #[test]
    fn product_json_shape() {
        let p = Product {
            id: 1,
            name: "Book".to_string(),
            price: 10.0,
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Book");
        assert_eq!(json["price"], 10.0);
    }
}
