//! Expense records.
//!
//! An [`Expense`] is a payment made by one person (`paid_by`) and shared in
//! equal parts among the people listed in `split`. The payer may appear in
//! their own split; in that case they are both credited and debited.
//!
//! Names are compared byte for byte: `"alice"` and `"Alice"` are two people.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, shares};

/// One participant of an expense split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitEntry {
    pub name: String,
}

impl SplitEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub amount: Money,
    pub description: String,
    pub paid_by: String,
    pub split: Vec<SplitEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an expense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseCmd {
    pub amount: Money,
    pub description: String,
    pub paid_by: String,
    pub split: Vec<SplitEntry>,
}

/// Partial update of an expense. `None` leaves the field untouched; a
/// `Some(split)` replaces the whole split.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub paid_by: Option<String>,
    pub split: Option<Vec<SplitEntry>>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.description.is_none()
            && self.paid_by.is_none()
            && self.split.is_none()
    }
}

impl Expense {
    /// Builds a new validated expense with a fresh id.
    pub fn new(cmd: ExpenseCmd) -> ResultEngine<Self> {
        validate_amount(cmd.amount)?;
        validate_description(&cmd.description)?;
        validate_paid_by(&cmd.paid_by)?;
        validate_split(&cmd.split)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            amount: cmd.amount,
            description: cmd.description,
            paid_by: cmd.paid_by,
            split: cmd.split,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies `patch` on a copy of the expense, validating every provided field.
    pub fn patched(&self, patch: ExpensePatch) -> ResultEngine<Self> {
        if patch.is_empty() {
            return Err(EngineError::Validation(
                "provide at least one of amount, description, paid_by or split".to_string(),
            ));
        }

        let mut updated = self.clone();
        if let Some(amount) = patch.amount {
            validate_amount(amount)?;
            updated.amount = amount;
        }
        if let Some(description) = patch.description {
            validate_description(&description)?;
            updated.description = description;
        }
        if let Some(paid_by) = patch.paid_by {
            validate_paid_by(&paid_by)?;
            updated.paid_by = paid_by;
        }
        if let Some(split) = patch.split {
            validate_split(&split)?;
            updated.split = split;
        }
        updated.updated_at = Utc::now();
        Ok(updated)
    }
}

fn validate_amount(amount: Money) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::Validation("Invalid amount".to_string()));
    }
    if amount > Money::MAX_EXPENSE {
        return Err(EngineError::Validation(format!(
            "amount must not exceed {}",
            Money::MAX_EXPENSE
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> ResultEngine<()> {
    if description.trim().is_empty() {
        return Err(EngineError::Validation("Missing description".to_string()));
    }
    Ok(())
}

fn validate_paid_by(paid_by: &str) -> ResultEngine<()> {
    if paid_by.trim().is_empty() {
        return Err(EngineError::Validation("Missing paid_by".to_string()));
    }
    Ok(())
}

// An empty split would leave the per-head share undefined.
fn validate_split(split: &[SplitEntry]) -> ResultEngine<()> {
    if split.is_empty() {
        return Err(EngineError::Validation("Missing split".to_string()));
    }
    if split.iter().any(|entry| entry.name.trim().is_empty()) {
        return Err(EngineError::Validation(
            "Missing split participant name".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub amount_minor: i64,
    pub description: String,
    pub paid_by: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::shares::Entity")]
    Shares,
}

impl Related<super::shares::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shares.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            amount_minor: ActiveValue::Set(expense.amount.minor()),
            description: ActiveValue::Set(expense.description.clone()),
            paid_by: ActiveValue::Set(expense.paid_by.clone()),
            created_at: ActiveValue::Set(expense.created_at),
            updated_at: ActiveValue::Set(expense.updated_at),
        }
    }
}

impl TryFrom<(Model, Vec<shares::Model>)> for Expense {
    type Error = EngineError;

    /// Shares must already be ordered by `position`.
    fn try_from((model, shares): (Model, Vec<shares::Model>)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::InvalidId(format!("stored id '{}'", model.id)))?,
            amount: Money::new(model.amount_minor),
            description: model.description,
            paid_by: model.paid_by,
            split: shares.into_iter().map(SplitEntry::from).collect(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
