// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejections raised while building or recording a manual entry.
///
/// These never reach the engines: an entry that fails validation is not
/// written to the store.
#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("Select an account")]
    MissingAccount,

    #[error("Enter a valid amount (got {0})")]
    NonPositiveAmount(Decimal),

    #[error("An invoice needs at least one item")]
    EmptyInvoice,

    #[error("Item '{0}' needs a positive quantity and a non-negative price")]
    InvalidItem(String),

    #[error("Amount {amount} does not match the item total {items_total}")]
    AmountMismatch {
        amount: Decimal,
        items_total: Decimal,
    },

    #[error("Invoice total is too large")]
    TotalOverflow,

    #[error("Feed quantity must be positive (got {0})")]
    NonPositiveQuantity(Decimal),

    #[error("Egg counts cannot be negative")]
    NegativeCount,

    #[error("Account name cannot be empty")]
    MissingName,

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
}

impl EntryError {
    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        EntryError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
