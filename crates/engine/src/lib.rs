//! Shared expense tracking.
//!
//! The engine stores [`Expense`] records and derives, on demand, the net
//! [`Balances`] of every person and the [`Transfer`]s that settle them.

pub use error::EngineError;
pub use expenses::{Expense, ExpenseCmd, ExpensePatch, SplitEntry};
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use settlement::{Balances, Transfer, balances, people, settle};

mod error;
mod expenses;
mod money;
mod ops;
mod settlement;
mod shares;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
