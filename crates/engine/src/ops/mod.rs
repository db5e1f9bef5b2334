use std::collections::HashMap;

use sea_orm::{DatabaseConnection, DatabaseTransaction, QueryFilter, QueryOrder, prelude::*};

use crate::{Expense, ResultEngine, expenses, shares};

mod balances;
mod expenses_write;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Facade over the expense store.
///
/// The engine keeps no state besides the connection: balances and
/// settlements are recomputed from the stored expenses on every call.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Returns every stored expense, oldest first.
    pub async fn list_expenses(&self) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .order_by_asc(expenses::Column::CreatedAt)
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        let share_models = shares::Entity::find()
            .order_by_asc(shares::Column::ExpenseId)
            .order_by_asc(shares::Column::Position)
            .all(&self.database)
            .await?;

        // Group shares by expense, preserving `position` order within each group.
        let mut grouped: HashMap<String, Vec<shares::Model>> =
            HashMap::with_capacity(models.len());
        for share in share_models {
            grouped.entry(share.expense_id.clone()).or_default().push(share);
        }

        models
            .into_iter()
            .map(|model| {
                let split = grouped.remove(&model.id).unwrap_or_default();
                Expense::try_from((model, split))
            })
            .collect()
    }
}

/// Loads a single expense with its split inside `db_tx`.
async fn load_expense(db_tx: &DatabaseTransaction, id: &str) -> ResultEngine<Option<Expense>> {
    let Some(model) = expenses::Entity::find_by_id(id.to_string())
        .one(db_tx)
        .await?
    else {
        return Ok(None);
    };
    let split = shares::Entity::find()
        .filter(shares::Column::ExpenseId.eq(id.to_string()))
        .order_by_asc(shares::Column::Position)
        .all(db_tx)
        .await?;
    Expense::try_from((model, split)).map(Some)
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
