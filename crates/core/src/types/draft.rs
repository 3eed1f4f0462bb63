//! Complaint drafts and their validation.
//!
//! A [`ComplaintDraft`] is whatever the user typed. The only way to obtain a
//! [`ValidDraft`], which is what the transport accepts, is [`validate_draft`].

use serde::{Deserialize, Serialize, Serializer};

use super::status::Category;

/// Draft fields that can be reported as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    Email,
    Category,
    Description,
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Category => "category",
            Self::Description => "description",
        };
        f.write_str(name)
    }
}

/// Errors detected before anything is sent to the backend.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("missing required field: {0}")]
    MissingField(DraftField),
    /// The category is not one of the fixed set.
    #[error("invalid category: {0}")]
    InvalidCategory(String),
}

/// Unvalidated complaint input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintDraft {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub category: String,
    pub description: String,
}

/// A draft that passed [`validate_draft`].
///
/// Serializes to the `POST /complaints` body. An absent phone is sent as an
/// empty string, which is what the backend expects for the optional field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidDraft {
    name: String,
    email: String,
    #[serde(serialize_with = "serialize_phone")]
    phone: Option<String>,
    category: Category,
    description: String,
}

impl ValidDraft {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

#[allow(clippy::ref_option)] // serde hands `serialize_with` a reference to the field
fn serialize_phone<S: Serializer>(phone: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(phone.as_deref().unwrap_or(""))
}

/// Validate a draft.
///
/// Fields are checked in the order name, email, category, description and the
/// first failure is returned. Whitespace-only values count as missing. The
/// phone number is free-form and never validated; an empty one becomes `None`.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] for an empty required field
/// (including an empty category) and [`ValidationError::InvalidCategory`] when
/// the category is not in [`Category::ALL`].
///
/// # Example
///
/// ```
/// use complaint_hub_core::{ComplaintDraft, validate_draft};
///
/// let draft = ComplaintDraft {
///     name: "Alice".into(),
///     email: "a@x.com".into(),
///     phone: None,
///     category: "Billing Problem".into(),
///     description: "Overcharged".into(),
/// };
/// assert!(validate_draft(&draft).is_ok());
/// ```
pub fn validate_draft(draft: &ComplaintDraft) -> Result<ValidDraft, ValidationError> {
    let name = required(&draft.name, DraftField::Name)?;
    let email = required(&draft.email, DraftField::Email)?;
    let category_label = required(&draft.category, DraftField::Category)?;
    let category = category_label
        .parse::<Category>()
        .map_err(|_| ValidationError::InvalidCategory(category_label.to_owned()))?;
    let description = required(&draft.description, DraftField::Description)?;

    let phone = draft
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_owned);

    Ok(ValidDraft {
        name: name.to_owned(),
        email: email.to_owned(),
        phone,
        category,
        description: description.to_owned(),
    })
}

fn required(value: &str, field: DraftField) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn alice() -> ComplaintDraft {
        ComplaintDraft {
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            phone: Some(String::new()),
            category: "Billing Problem".to_string(),
            description: "Overcharged".to_string(),
        }
    }

    #[test]
    fn test_accepts_complete_draft_without_phone() {
        let draft = ComplaintDraft {
            phone: None,
            ..alice()
        };
        let valid = validate_draft(&draft).unwrap();
        assert_eq!(valid.name(), "Alice");
        assert_eq!(valid.category(), Category::BillingProblem);
        assert_eq!(valid.phone(), None);
    }

    #[test]
    fn test_empty_phone_normalized() {
        let valid = validate_draft(&alice()).unwrap();
        assert_eq!(valid.phone(), None);

        let with_phone = ComplaintDraft {
            phone: Some(" 555-0100 ".to_string()),
            ..alice()
        };
        assert_eq!(validate_draft(&with_phone).unwrap().phone(), Some("555-0100"));
    }

    #[test]
    fn test_missing_fields() {
        let cases = [
            (
                ComplaintDraft {
                    name: String::new(),
                    ..alice()
                },
                DraftField::Name,
            ),
            (
                ComplaintDraft {
                    email: String::new(),
                    ..alice()
                },
                DraftField::Email,
            ),
            (
                ComplaintDraft {
                    category: String::new(),
                    ..alice()
                },
                DraftField::Category,
            ),
            (
                ComplaintDraft {
                    description: "   ".to_string(),
                    ..alice()
                },
                DraftField::Description,
            ),
        ];

        for (draft, field) in cases {
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
    fn test_invalid_category() {
        let draft = ComplaintDraft {
            category: "Refund".to_string(),
            ..alice()
        };
        assert_eq!(
            validate_draft(&draft),
            Err(ValidationError::InvalidCategory("Refund".to_string()))
        );
    }

    #[test]
    fn test_serializes_post_body() {
        let valid = validate_draft(&alice()).unwrap();
        let body = serde_json::to_value(&valid).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "name": "Alice",
                "email": "a@x.com",
                "phone": "",
                "category": "Billing Problem",
                "description": "Overcharged",
            })
        );
    }
}
