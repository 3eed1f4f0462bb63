//! Integration tests for draft validation through the public API.

use complaint_hub_core::{
    Category, ComplaintDraft, DraftField, ValidationError, validate_draft,
};

fn complete() -> ComplaintDraft {
    ComplaintDraft {
        name: "Alice".to_string(),
        email: "a@x.com".to_string(),
        phone: None,
        category: "Billing Problem".to_string(),
        description: "Overcharged".to_string(),
    }
}

#[test]
fn test_complete_draft_without_phone_is_valid() {
    let valid = validate_draft(&complete()).expect("valid draft");
    assert_eq!(valid.name(), "Alice");
    assert_eq!(valid.category(), Category::BillingProblem);
    assert_eq!(valid.phone(), None);
}

#[test]
fn test_every_category_is_accepted() {
    for category in Category::ALL {
        let mut draft = complete();
        draft.category = category.label().to_string();
        let valid = validate_draft(&draft).expect("known category");
        assert_eq!(valid.category(), category);
    }
}

#[test]
fn test_missing_fields_are_reported() {
    let cases: [(fn(&mut ComplaintDraft), DraftField); 4] = [
        (|d| d.name.clear(), DraftField::Name),
        (|d| d.email = "  ".to_string(), DraftField::Email),
        (|d| d.category.clear(), DraftField::Category),
        (|d| d.description.clear(), DraftField::Description),
    ];

    for (blank, field) in cases {
        let mut draft = complete();
        blank(&mut draft);
        assert_eq!(
            validate_draft(&draft),
            Err(ValidationError::MissingField(field))
        );
    }
}

#[test]
fn test_first_missing_field_wins() {
    let draft = ComplaintDraft::default();
    assert_eq!(
        validate_draft(&draft),
        Err(ValidationError::MissingField(DraftField::Name))
    );
}

#[test]
fn test_unknown_category_is_invalid() {
    let mut draft = complete();
    draft.category = "billing problem".to_string();
    assert!(matches!(
        validate_draft(&draft),
        Err(ValidationError::InvalidCategory(_))
    ));
}

#[test]
fn test_phone_is_free_form() {
    let mut draft = complete();
    draft.phone = Some("call me maybe".to_string());
    let valid = validate_draft(&draft).expect("phone is not validated");
    assert_eq!(valid.phone(), Some("call me maybe"));

    draft.phone = Some(String::new());
    let valid = validate_draft(&draft).expect("empty phone is fine");
    assert_eq!(valid.phone(), None);
}

#[test]
fn test_valid_draft_wire_shape() {
    let valid = validate_draft(&complete()).expect("valid draft");
    let json = serde_json::to_value(&valid).expect("serializes");
    assert_eq!(
        json,
        serde_json::json!({
            "name": "Alice",
            "email": "a@x.com",
            "phone": "",
            "category": "Billing Problem",
            "description": "Overcharged",
        })
    );
}
