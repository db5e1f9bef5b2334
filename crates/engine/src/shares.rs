//! Expense shares.
//!
//! A share row stores one participant of an expense split. `position` keeps
//! the split order, which decides who carries the remainder minor units when
//! the amount does not divide evenly (see [`Money::allocate`](crate::Money::allocate)).

use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::expenses::SplitEntry;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expense_shares")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub expense_id: String,
    pub position: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::expenses::Entity",
        from = "Column::ExpenseId",
        to = "super::expenses::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Expenses,
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Builds the share rows for an expense, in split order.
pub(crate) fn active_models(expense_id: Uuid, split: &[SplitEntry]) -> Vec<ActiveModel> {
    split
        .iter()
        .zip(0i32..)
        .map(|(entry, position)| ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            expense_id: ActiveValue::Set(expense_id.to_string()),
            position: ActiveValue::Set(position),
            name: ActiveValue::Set(entry.name.clone()),
        })
        .collect()
}

impl From<Model> for SplitEntry {
    fn from(model: Model) -> Self {
        Self { name: model.name }
    }
}
