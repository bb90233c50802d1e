// Order/product status with an explicit sentinel for missing values
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a catalog item
///
/// Parsing is forgiving: case is ignored, the dashboard spellings
/// `process` and `canceled` are accepted, unknown labels are kept
/// verbatim as [`Status::Other`], and an empty label becomes
/// [`Status::Unknown`].
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Completed,
    Cancelled,
    ReturnRequested,
    /// A status label outside the known set
    Other(String),
    /// No status was supplied
    #[default]
    Unknown,
}

impl Status {
    /// Parse a status label
    pub fn parse(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "" | "unknown" => Status::Unknown,
            "pending" => Status::Pending,
            "processing" | "process" => Status::Processing,
            "shipped" => Status::Shipped,
            "delivered" => Status::Delivered,
            "completed" => Status::Completed,
            "cancelled" | "canceled" => Status::Cancelled,
            "return_requested" => Status::ReturnRequested,
            _ => Status::Other(normalized),
        }
    }

    /// Canonical label
    pub fn as_str(&self) -> &str {
        match self {
            Status::Pending => "pending",
            Status::Processing => "processing",
            Status::Shipped => "shipped",
            Status::Delivered => "delivered",
            Status::Completed => "completed",
            Status::Cancelled => "cancelled",
            Status::ReturnRequested => "return_requested",
            Status::Other(label) => label,
            Status::Unknown => "unknown",
        }
    }
}

impl From<String> for Status {
    fn from(label: String) -> Self {
        Status::parse(&label)
    }
}

impl From<&str> for Status {
    fn from(label: &str) -> Self {
        Status::parse(label)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
