// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The two sign tables. They group transaction types differently and must stay
//! separate: a Sale is cash inflow but a debit on the customer's balance, a
//! Payment is cash outflow but also a debit.

use crate::models::TransactionType;
use rust_decimal::Decimal;

/// Effect of a transaction on a counterparty's running balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerSide {
    Debit,
    Credit,
}

/// Effect of a transaction on cash in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashDirection {
    Inflow,
    Outflow,
    /// Owner draw; reduces cash like an outflow but is reported on its own line.
    Withdrawal,
}

pub const fn ledger_side(kind: TransactionType) -> LedgerSide {
    match kind {
        TransactionType::Sale | TransactionType::Withdrawal | TransactionType::Payment => {
            LedgerSide::Debit
        }
        TransactionType::Purchase
        | TransactionType::Receipt
        | TransactionType::Deposit
        | TransactionType::Expense => LedgerSide::Credit,
    }
}

pub const fn cash_direction(kind: TransactionType) -> CashDirection {
    match kind {
        TransactionType::Sale | TransactionType::Receipt | TransactionType::Deposit => {
            CashDirection::Inflow
        }
        TransactionType::Expense | TransactionType::Payment | TransactionType::Purchase => {
            CashDirection::Outflow
        }
        TransactionType::Withdrawal => CashDirection::Withdrawal,
    }
}

/// Signed effect of `amount` on an account balance.
pub fn ledger_effect(kind: TransactionType, amount: Decimal) -> Decimal {
    match ledger_side(kind) {
        LedgerSide::Debit => amount,
        LedgerSide::Credit => -amount,
    }
}

/// Signed effect of `amount` on cash in hand.
pub fn cash_effect(kind: TransactionType, amount: Decimal) -> Decimal {
    match cash_direction(kind) {
        CashDirection::Inflow => amount,
        CashDirection::Outflow | CashDirection::Withdrawal => -amount,
    }
}
