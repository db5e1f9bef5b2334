use std::collections::BTreeSet;

use crate::{Balances, ResultEngine, Transfer, settlement};

use super::Engine;

impl Engine {
    /// Distinct names of everyone who paid or took part in an expense.
    pub async fn people(&self) -> ResultEngine<BTreeSet<String>> {
        let expenses = self.list_expenses().await?;
        Ok(settlement::people(&expenses))
    }

    /// Net balance per person over all stored expenses.
    pub async fn balances(&self) -> ResultEngine<Balances> {
        let expenses = self.list_expenses().await?;
        Ok(settlement::balances(&expenses))
    }

    /// Transfers that settle every outstanding balance.
    pub async fn settlements(&self) -> ResultEngine<Vec<Transfer>> {
        let balances = self.balances().await?;
        Ok(settlement::settle(&balances))
    }
}
