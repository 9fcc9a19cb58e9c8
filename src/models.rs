// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EntryError;

macro_rules! labelled_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| {
                        let names: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        anyhow::anyhow!("Unknown {} '{}' (use {})", stringify!($name), s, names.join("|"))
                    })
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Customer,
    Vendor,
    Employee,
    Utility,
    Owner,
}

labelled_enum!(AccountType {
    Customer => "Customer",
    Vendor => "Vendor",
    Employee => "Employee",
    Utility => "Utility",
    Owner => "Owner",
});

/// Free-form reporting bucket attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountCategory {
    Income,
    Expense,
    General,
}

labelled_enum!(AccountCategory {
    Income => "Income",
    Expense => "Expense",
    General => "General",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Sale,
    /// We pay the counterparty.
    Payment,
    /// The counterparty pays us.
    Receipt,
    Expense,
    Purchase,
    /// Owner puts money in.
    Deposit,
    /// Owner takes money out.
    Withdrawal,
}

labelled_enum!(TransactionType {
    Sale => "Sale",
    Payment => "Payment",
    Receipt => "Receipt",
    Expense => "Expense",
    Purchase => "Purchase",
    Deposit => "Deposit",
    Withdrawal => "Withdrawal",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedType {
    Purchase,
    Consume,
    Waste,
}

labelled_enum!(FeedType {
    Purchase => "Purchase",
    Consume => "Consume",
    Waste => "Waste",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    StainedGlass,
    Minimal,
}

labelled_enum!(Theme {
    StainedGlass => "stained-glass",
    Minimal => "minimal",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub r#type: AccountType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<AccountCategory>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    /// Monthly salary, employees only.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::arbitrary_precision_option"
    )]
    pub salary: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "calendar_day_opt"
    )]
    pub joining_date: Option<NaiveDate>,
    #[serde(default)]
    pub archived: bool,
}

impl Account {
    pub fn new(name: impl Into<String>, r#type: AccountType) -> Result<Self, EntryError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(EntryError::MissingName);
        }
        Ok(Self {
            id: String::new(),
            name,
            r#type,
            category: None,
            phone: String::new(),
            address: String::new(),
            salary: None,
            joining_date: None,
            archived: false,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub description: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total: Decimal,
}

impl InvoiceItem {
    /// Fails when `quantity * unit_price` does not fit a `Decimal`.
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<Self, EntryError> {
        let description = description.into();
        let Some(total) = quantity.checked_mul(unit_price) else {
            return Err(EntryError::InvalidItem(description));
        };
        Ok(Self {
            description,
            quantity,
            unit_price,
            total,
        })
    }
}

fn checked_sum(mut values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    values.try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}

/// The universal ledger entry. Amount is always non-negative; direction is
/// carried by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(with = "calendar_day")]
    pub date: NaiveDate,
    pub r#type: TransactionType,
    pub account_id: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<InvoiceItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    /// A plain entry without line items.
    pub fn new(
        date: NaiveDate,
        r#type: TransactionType,
        account_id: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self, EntryError> {
        let account_id = account_id.into().trim().to_string();
        if account_id.is_empty() {
            return Err(EntryError::MissingAccount);
        }
        if amount <= Decimal::ZERO {
            return Err(EntryError::NonPositiveAmount(amount));
        }
        Ok(Self {
            id: String::new(),
            date,
            r#type,
            account_id,
            amount,
            items: Vec::new(),
            notes: None,
        })
    }

    /// An invoice-style entry. The amount is recomputed from the items.
    pub fn with_items(
        date: NaiveDate,
        r#type: TransactionType,
        account_id: impl Into<String>,
        items: Vec<InvoiceItem>,
    ) -> Result<Self, EntryError> {
        if items.is_empty() {
            return Err(EntryError::EmptyInvoice);
        }
        let mut normalized = Vec::with_capacity(items.len());
        for item in items {
            if item.quantity <= Decimal::ZERO || item.unit_price < Decimal::ZERO {
                return Err(EntryError::InvalidItem(item.description));
            }
            normalized.push(InvoiceItem::new(
                item.description,
                item.quantity,
                item.unit_price,
            )?);
        }
        let amount = checked_sum(normalized.iter().map(|i| i.total))
            .ok_or(EntryError::TotalOverflow)?;
        let mut tx = Self::new(date, r#type, account_id, amount)?;
        tx.items = normalized;
        Ok(tx)
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self
    }

    /// `None` when the item totals overflow.
    pub fn items_total(&self) -> Option<Decimal> {
        checked_sum(self.items.iter().map(|i| i.total))
    }

    /// Units moved by this entry, summed over line-item quantities.
    pub fn units(&self) -> Decimal {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// `amount == Σ item totals` whenever items are present.
    pub fn check_amount(&self) -> Result<(), EntryError> {
        if self.items.is_empty() {
            return Ok(());
        }
        let items_total = self.items_total().ok_or(EntryError::TotalOverflow)?;
        if self.amount != items_total {
            return Err(EntryError::AmountMismatch {
                amount: self.amount,
                items_total,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EggCollection {
    pub id: String,
    #[serde(with = "calendar_day")]
    pub date: NaiveDate,
    pub collected: i64,
    pub wasted: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EggCollection {
    pub fn new(date: NaiveDate, collected: i64, wasted: i64) -> Result<Self, EntryError> {
        if collected < 0 || wasted < 0 {
            return Err(EntryError::NegativeCount);
        }
        Ok(Self {
            id: String::new(),
            date,
            collected,
            wasted,
            notes: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedTransaction {
    pub id: String,
    #[serde(with = "calendar_day")]
    pub date: NaiveDate,
    pub r#type: FeedType,
    /// Mass in kg.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub quantity: Decimal,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::arbitrary_precision_option"
    )]
    pub cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FeedTransaction {
    pub fn new(date: NaiveDate, r#type: FeedType, quantity: Decimal) -> Result<Self, EntryError> {
        if quantity <= Decimal::ZERO {
            return Err(EntryError::NonPositiveQuantity(quantity));
        }
        Ok(Self {
            id: String::new(),
            date,
            r#type,
            quantity,
            cost: None,
            vendor_id: None,
            notes: None,
        })
    }

    /// Cost and vendor only mean something on a purchase; other kinds drop them.
    pub fn with_purchase(mut self, cost: Option<Decimal>, vendor_id: Option<String>) -> Self {
        if self.r#type == FeedType::Purchase {
            self.cost = cost;
            self.vendor_id = vendor_id
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }
        self
    }

    /// The ledger entry a paid purchase produces, if any.
    pub fn ledger_entry(&self) -> Option<Transaction> {
        if self.r#type != FeedType::Purchase {
            return None;
        }
        let cost = self.cost.filter(|c| *c > Decimal::ZERO)?;
        let vendor = self.vendor_id.as_deref()?;
        let tx = Transaction::new(self.date, TransactionType::Purchase, vendor, cost).ok()?;
        Some(tx.with_notes(Some(format!("Feed Purchase: {}kg", self.quantity))))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub currency: String,
    pub farm_name: String,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "PKR".to_string(),
            farm_name: "My Egg Farm".to_string(),
            theme: Theme::StainedGlass,
        }
    }
}

/// The whole persisted document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmData {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub egg_collections: Vec<EggCollection>,
    #[serde(default)]
    pub feed_transactions: Vec<FeedTransaction>,
    #[serde(default)]
    pub settings: Settings,
}

pub(crate) mod calendar_day {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub(crate) const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(D::Error::custom)
    }

    /// Accepts `YYYY-MM-DD` or any ISO timestamp starting with one.
    pub(crate) fn parse(raw: &str) -> Result<NaiveDate, String> {
        let raw = raw.trim();
        let day = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(day, FORMAT).map_err(|e| format!("invalid date '{}': {}", raw, e))
    }
}

pub(crate) mod calendar_day_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.collect_str(&d.format(super::calendar_day::FORMAT)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) if !raw.trim().is_empty() => super::calendar_day::parse(&raw)
                .map(Some)
                .map_err(D::Error::custom),
            _ => Ok(None),
        }
    }
}
