// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::DateRange;
use crate::models::{EggCollection, FeedTransaction, FeedType, Transaction, TransactionType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EggStock {
    pub opening: Decimal,
    pub collected: Decimal,
    pub wasted: Decimal,
    pub sold: Decimal,
    pub closing: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FeedStock {
    pub opening: Decimal,
    pub purchased: Decimal,
    pub consumed: Decimal,
    pub wasted: Decimal,
    pub closing: Decimal,
}

/// Eggs sold are counted from Sale line-item quantities, never from amounts.
fn eggs_sold(transactions: &[Transaction], when: impl Fn(&Transaction) -> bool) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.r#type == TransactionType::Sale && when(*t))
        .map(Transaction::units)
        .sum()
}

/// Egg stock over `range`. Overselling shows up as a negative closing stock.
pub fn egg_stock(
    collections: &[EggCollection],
    transactions: &[Transaction],
    range: DateRange,
) -> EggStock {
    let mut before = (0i64, 0i64);
    let mut within = (0i64, 0i64);
    for c in collections {
        if range.is_before(c.date) {
            before.0 += c.collected;
            before.1 += c.wasted;
        } else if range.contains(c.date) {
            within.0 += c.collected;
            within.1 += c.wasted;
        }
    }

    let sold_before = eggs_sold(transactions, |t| range.is_before(t.date));
    let sold = eggs_sold(transactions, |t| range.contains(t.date));

    let opening = Decimal::from(before.0) - Decimal::from(before.1) - sold_before;
    let collected = Decimal::from(within.0);
    let wasted = Decimal::from(within.1);
    EggStock {
        opening,
        collected,
        wasted,
        sold,
        closing: opening + collected - wasted - sold,
    }
}

fn feed_effect(entry: &FeedTransaction) -> Decimal {
    match entry.r#type {
        FeedType::Purchase => entry.quantity,
        FeedType::Consume | FeedType::Waste => -entry.quantity,
    }
}

pub fn feed_stock(feed: &[FeedTransaction], range: DateRange) -> FeedStock {
    let mut stock = FeedStock::default();
    for entry in feed {
        if range.is_before(entry.date) {
            stock.opening += feed_effect(entry);
        } else if range.contains(entry.date) {
            match entry.r#type {
                FeedType::Purchase => stock.purchased += entry.quantity,
                FeedType::Consume => stock.consumed += entry.quantity,
                FeedType::Waste => stock.wasted += entry.quantity,
            }
        }
    }
    stock.closing = stock.opening + stock.purchased - stock.consumed - stock.wasted;
    stock
}

/// Feed on hand across the whole history, dated entries in the future included.
pub fn feed_on_hand(feed: &[FeedTransaction]) -> Decimal {
    feed.iter().map(feed_effect).sum()
}
