// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::DateRange;
use super::polarity::{LedgerSide, ledger_effect, ledger_side};
use crate::models::{Transaction, TransactionType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRow {
    pub id: String,
    pub date: NaiveDate,
    pub r#type: TransactionType,
    pub notes: Option<String>,
    /// Line-item descriptions, in item order.
    pub items: Vec<String>,
    pub debit: Decimal,
    pub credit: Decimal,
    pub balance: Decimal,
}

impl LedgerRow {
    /// The note, or the item descriptions when there is no note.
    pub fn description(&self) -> String {
        match &self.notes {
            Some(n) => n.clone(),
            None => self.items.join(", "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerView {
    pub opening_balance: Decimal,
    pub rows: Vec<LedgerRow>,
}

impl LedgerView {
    pub fn empty() -> Self {
        Self {
            opening_balance: Decimal::ZERO,
            rows: Vec::new(),
        }
    }

    pub fn closing_balance(&self) -> Decimal {
        self.rows
            .last()
            .map(|r| r.balance)
            .unwrap_or(self.opening_balance)
    }

    pub fn total_debit(&self) -> Decimal {
        self.rows.iter().map(|r| r.debit).sum()
    }

    pub fn total_credit(&self) -> Decimal {
        self.rows.iter().map(|r| r.credit).sum()
    }
}

/// Opening balance and running rows for one counterparty over `range`.
///
/// With no account selected the view is empty rather than an error. The
/// opening fold scans the account's whole history; rows on the same day keep
/// store order.
pub fn account_ledger(
    transactions: &[Transaction],
    account_id: Option<&str>,
    range: DateRange,
) -> LedgerView {
    let Some(account_id) = account_id.filter(|id| !id.is_empty()) else {
        return LedgerView::empty();
    };

    let mut history: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.account_id == account_id)
        .collect();
    history.sort_by_key(|t| t.date);

    let opening_balance: Decimal = history
        .iter()
        .filter(|t| range.is_before(t.date))
        .map(|t| ledger_effect(t.r#type, t.amount))
        .sum();

    let mut balance = opening_balance;
    let rows = history
        .into_iter()
        .filter(|t| range.contains(t.date))
        .map(|t| {
            balance += ledger_effect(t.r#type, t.amount);
            let (debit, credit) = match ledger_side(t.r#type) {
                LedgerSide::Debit => (t.amount, Decimal::ZERO),
                LedgerSide::Credit => (Decimal::ZERO, t.amount),
            };
            LedgerRow {
                id: t.id.clone(),
                date: t.date,
                r#type: t.r#type,
                notes: t.notes.clone(),
                items: t.items.iter().map(|i| i.description.clone()).collect(),
                debit,
                credit,
                balance,
            }
        })
        .collect();

    LedgerView {
        opening_balance,
        rows,
    }
}

/// All-time balance of one counterparty.
pub fn account_balance(transactions: &[Transaction], account_id: &str) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.account_id == account_id)
        .map(|t| ledger_effect(t.r#type, t.amount))
        .sum()
}
