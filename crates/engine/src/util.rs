//! Internal helpers for identifier validation.
//!
//! These utilities are **not** part of the public API.

use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Parse an expense id supplied by a caller.
pub(crate) fn parse_expense_id(value: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| EngineError::InvalidId("Invalid Expense ID format".to_string()))
}
