//! Balance and settlement computation.
//!
//! Everything here is a pure function of the expenses handed in: nothing is
//! cached between calls and the result does not depend on the order in which
//! expenses are supplied.
//!
//! - [`balances`] folds expenses into a net [`Money`] position per person.
//! - [`settle`] greedily matches debtors with creditors to produce the
//!   transfers that bring every balance back to zero.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
};

use crate::{Expense, Money};

/// Net position per person, keyed by exact name.
///
/// Positive means the person is owed money, negative means they owe money.
pub type Balances = BTreeMap<String, Money>;

/// A directed payment: `from` pays `amount` to `to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub amount: Money,
}

/// Returns every distinct name appearing as payer or split participant.
pub fn people<'a, I>(expenses: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut people = BTreeSet::new();
    for expense in expenses {
        people.insert(expense.paid_by.clone());
        people.extend(expense.split.iter().map(|entry| entry.name.clone()));
    }
    people
}

/// Computes the net balance of every person involved in `expenses`.
///
/// The payer is credited the full amount and every split participant is
/// debited one share, including the payer when they split with themselves.
/// Shares come from [`Money::allocate`], so the balances always sum to zero.
/// People whose position nets out still appear, with a zero balance.
pub fn balances<'a, I>(expenses: I) -> Balances
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut balances = Balances::new();
    for expense in expenses {
        *balances.entry(expense.paid_by.clone()).or_default() += expense.amount;

        let shares = expense.amount.allocate(expense.split.len());
        for (entry, share) in expense.split.iter().zip(shares) {
            *balances.entry(entry.name.clone()).or_default() -= share;
        }
    }
    balances
}

#[derive(Debug)]
struct Position<'a> {
    name: &'a str,
    remaining: Money,
}

// Largest first, ties by name so the output is deterministic.
fn by_remaining_desc(a: &Position<'_>, b: &Position<'_>) -> Ordering {
    b.remaining
        .cmp(&a.remaining)
        .then_with(|| a.name.cmp(b.name))
}

/// Produces the transfers that settle `balances`.
///
/// Creditors and debtors are each sorted by outstanding amount (largest
/// first, then by name). The largest debtor pays the largest creditor the
/// smaller of the two outstanding amounts; whoever reaches zero is dropped,
/// and the process repeats until one side runs out.
///
/// At most `debtors + creditors - 1` transfers are produced, each strictly
/// positive. Balances that do not sum to zero leave the excess unsettled.
pub fn settle(balances: &Balances) -> Vec<Transfer> {
    let mut creditors: Vec<Position<'_>> = Vec::new();
    let mut debtors: Vec<Position<'_>> = Vec::new();

    for (name, balance) in balances {
        if balance.is_positive() {
            creditors.push(Position {
                name,
                remaining: *balance,
            });
        } else if balance.is_negative() {
            debtors.push(Position {
                name,
                remaining: balance.abs(),
            });
        }
    }

    creditors.sort_by(by_remaining_desc);
    debtors.sort_by(by_remaining_desc);

    let mut transfers = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < debtors.len() && j < creditors.len() {
        let payer = &mut debtors[i];
        let receiver = &mut creditors[j];
        let amount = payer.remaining.min(receiver.remaining);

        transfers.push(Transfer {
            from: payer.name.to_string(),
            to: receiver.name.to_string(),
            amount,
        });

        payer.remaining -= amount;
        receiver.remaining -= amount;
        if payer.remaining.is_zero() {
            i += 1;
        }
        if receiver.remaining.is_zero() {
            j += 1;
        }
    }

    transfers
}
