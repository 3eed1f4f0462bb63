//! Server-held complaint records.

use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::draft::ValidDraft;
use super::id::ComplaintId;
use super::status::{Category, ComplaintStatus};

/// Creation timestamp issued by the backend.
///
/// Kept verbatim: the backend owns the format and the value never changes
/// after creation. [`CreatedDate::date`] extracts the calendar day for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CreatedDate(String);

impl CreatedDate {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar date when the value starts with `YYYY-MM-DD`.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.0
            .get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    }
}

impl fmt::Display for CreatedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CreatedDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A complaint as returned by the backend.
///
/// `complaint_id` and `created_date` are assigned once by the server and are
/// never modified client-side. Unknown fields in the payload are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub complaint_id: ComplaintId,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_phone")]
    pub phone: Option<String>,
    pub category: Category,
    pub description: String,
    #[serde(default)]
    pub status: ComplaintStatus,
    pub created_date: CreatedDate,
}

impl Complaint {
    /// Returns `true` if every user-supplied field equals the draft's.
    #[must_use]
    pub fn matches_draft(&self, draft: &ValidDraft) -> bool {
        self.name == draft.name()
            && self.email == draft.email()
            && self.phone.as_deref() == draft.phone()
            && self.category == draft.category()
            && self.description == draft.description()
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self.status, ComplaintStatus::Resolved)
    }
}

/// `null`, a missing field and `""` all mean "no phone number".
fn deserialize_phone<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let phone = Option::<String>::deserialize(deserializer)?;
    Ok(phone.filter(|p| !p.trim().is_empty()))
}
