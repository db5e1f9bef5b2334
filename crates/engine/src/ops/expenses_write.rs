use sea_orm::{QueryFilter, TransactionTrait, prelude::*};

use crate::{
    EngineError, Expense, ExpenseCmd, ExpensePatch, ResultEngine, expenses, shares,
    util::parse_expense_id,
};

use super::{Engine, load_expense, with_tx};

impl Engine {
    /// Validates and stores a new expense together with its split.
    pub async fn create_expense(&self, cmd: ExpenseCmd) -> ResultEngine<Expense> {
        let expense = Expense::new(cmd)?;

        with_tx!(self, |db_tx| {
            expenses::ActiveModel::from(&expense).insert(&db_tx).await?;
            shares::Entity::insert_many(shares::active_models(expense.id, &expense.split))
                .exec_without_returning(&db_tx)
                .await?;
            Ok(expense)
        })
    }

    /// Applies a partial update to an expense.
    ///
    /// A malformed `id` is rejected before touching the store. When the patch
    /// carries a split, the previous participants are replaced entirely.
    pub async fn update_expense(&self, id: &str, patch: ExpensePatch) -> ResultEngine<Expense> {
        let expense_id = parse_expense_id(id)?;

        with_tx!(self, |db_tx| {
            let current = load_expense(&db_tx, &expense_id.to_string())
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("Expense not found".to_string()))?;
            let replace_split = patch.split.is_some();
            let updated = current.patched(patch)?;

            expenses::ActiveModel::from(&updated).update(&db_tx).await?;
            if replace_split {
                shares::Entity::delete_many()
                    .filter(shares::Column::ExpenseId.eq(expense_id.to_string()))
                    .exec(&db_tx)
                    .await?;
                shares::Entity::insert_many(shares::active_models(updated.id, &updated.split))
                    .exec_without_returning(&db_tx)
                    .await?;
            }
            Ok(updated)
        })
    }

    /// Deletes an expense and its split.
    pub async fn delete_expense(&self, id: &str) -> ResultEngine<()> {
        let expense_id = parse_expense_id(id)?.to_string();

        with_tx!(self, |db_tx| {
            let exists = expenses::Entity::find_by_id(expense_id.clone())
                .one(&db_tx)
                .await?
                .is_some();
            if !exists {
                return Err(EngineError::KeyNotFound("Expense not found".to_string()));
            }

            shares::Entity::delete_many()
                .filter(shares::Column::ExpenseId.eq(expense_id.clone()))
                .exec(&db_tx)
                .await?;
            expenses::Entity::delete_by_id(expense_id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
