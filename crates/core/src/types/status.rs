//! Status and category enums for complaints.

use serde::{Deserialize, Serialize};

/// Resolution status of a complaint.
///
/// New complaints always start as `Pending`; the only way to change the
/// status is an explicit administrator update. There is no automatic
/// transition in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintStatus {
    #[default]
    Pending,
    Resolved,
}

impl ComplaintStatus {
    /// Wire representation used in the `status` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known complaint status.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid complaint status: {0} (expected pending or resolved)")]
pub struct StatusParseError(pub String);

impl std::str::FromStr for ComplaintStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "resolved" => Ok(Self::Resolved),
            _ => Err(StatusParseError(s.to_owned())),
        }
    }
}

/// Complaint category.
///
/// The set is fixed; the backend stores the human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Service Issue")]
    ServiceIssue,
    #[serde(rename = "Product Quality")]
    ProductQuality,
    #[serde(rename = "Billing Problem")]
    BillingProblem,
    #[serde(rename = "Delivery Issue")]
    DeliveryIssue,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 5] = [
        Self::ServiceIssue,
        Self::ProductQuality,
        Self::BillingProblem,
        Self::DeliveryIssue,
        Self::Other,
    ];

    /// Human-readable label, identical to the wire value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ServiceIssue => "Service Issue",
            Self::ProductQuality => "Product Quality",
            Self::BillingProblem => "Billing Problem",
            Self::DeliveryIssue => "Delivery Issue",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| format!("invalid category: {s}"))
    }
}
