use serde::{Deserialize, Serialize};

/// Envelope wrapping every response body.
///
/// `data` is omitted on failures and on deletions; `message` is omitted when
/// there is nothing to say.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

pub mod expense {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct SplitEntry {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        /// Total paid, in major units (at most 2 decimals). Must be > 0.
        pub amount: f64,
        pub description: String,
        pub paid_by: String,
        /// Participants sharing the amount equally. Must not be empty.
        pub split: Vec<SplitEntry>,
    }

    /// Partial update: absent fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub amount: Option<f64>,
        pub description: Option<String>,
        pub paid_by: Option<String>,
        /// Replaces the whole split when present.
        pub split: Option<Vec<SplitEntry>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub amount: f64,
        pub description: String,
        pub paid_by: String,
        pub split: Vec<SplitEntry>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod settlement {
    use std::collections::BTreeMap;

    use super::*;

    /// Net amount per person, in major units. Positive = is owed money.
    pub type BalancesView = BTreeMap<String, f64>;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct SettlementView {
        pub from: String,
        pub to: String,
        pub amount: f64,
    }
}
