// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::EntryError;
use crate::models::{
    Account, EggCollection, FarmData, FeedTransaction, Settings, Theme, Transaction,
};

/// Receives the full document after every mutation.
pub trait Persist {
    fn persist(&mut self, data: &FarmData) -> Result<()>;
}

/// A sink that keeps nothing; for scratch stores and tests.
#[derive(Debug, Default)]
pub struct Detached;

impl Persist for Detached {
    fn persist(&mut self, _data: &FarmData) -> Result<()> {
        Ok(())
    }
}

/// Partial settings update; unset fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub currency: Option<String>,
    pub farm_name: Option<String>,
    pub theme: Option<Theme>,
}

/// Ids of the records written by one feed entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRecorded {
    pub feed_id: String,
    pub transaction_id: Option<String>,
}

/// The single owner of the farm document.
///
/// Every mutation works on a copy, hands the copy to the sink, and only then
/// replaces the current state. A failed write leaves the store unchanged.
pub struct Store<P: Persist> {
    data: FarmData,
    sink: P,
}

fn generate_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(9);
    id
}

impl<P: Persist> Store<P> {
    pub fn new(data: FarmData, sink: P) -> Self {
        Self { data, sink }
    }

    /// Builds a store from persisted bytes. Unreadable bytes fall back to the
    /// default document rather than failing start-up.
    pub fn load(body: Option<&str>, sink: P) -> Self {
        let data = match body {
            Some(body) => match parse_document(body) {
                Ok(data) => data,
                Err(err) => {
                    tracing::error!("Failed to load stored farm data, starting fresh: {:#}", err);
                    FarmData::default()
                }
            },
            None => FarmData::default(),
        };
        Self::new(data, sink)
    }

    pub fn data(&self) -> &FarmData {
        &self.data
    }

    pub fn settings(&self) -> &Settings {
        &self.data.settings
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    fn commit<T>(&mut self, change: impl FnOnce(&mut FarmData) -> Result<T>) -> Result<T> {
        let mut next = self.data.clone();
        let out = change(&mut next)?;
        self.sink
            .persist(&next)
            .context("Failed to save farm data")?;
        self.data = next;
        Ok(out)
    }

    // Lookups. References are soft, so absence is a normal answer.

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.data.accounts.iter().find(|a| a.id == id)
    }

    pub fn account_name(&self, id: &str) -> Option<&str> {
        self.account(id).map(|a| a.name.as_str())
    }

    pub fn find_account(&self, name: &str) -> Option<&Account> {
        let name = name.trim();
        self.data
            .accounts
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Accounts offered for new entries.
    pub fn active_accounts(&self) -> impl Iterator<Item = &Account> {
        self.data.accounts.iter().filter(|a| !a.archived)
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.data.transactions.iter().find(|t| t.id == id)
    }

    // Accounts

    pub fn add_account(&mut self, mut account: Account) -> Result<String> {
        if account.name.trim().is_empty() {
            return Err(EntryError::MissingName.into());
        }
        account.id = generate_id();
        let id = account.id.clone();
        self.commit(|d| {
            d.accounts.push(account);
            Ok(())
        })?;
        info!(account = %id, "account added");
        Ok(id)
    }

    /// Replaces the stored record with the same id.
    pub fn update_account(&mut self, account: Account) -> Result<()> {
        if account.name.trim().is_empty() {
            return Err(EntryError::MissingName.into());
        }
        self.commit(|d| {
            let slot = d
                .accounts
                .iter_mut()
                .find(|a| a.id == account.id)
                .ok_or_else(|| EntryError::not_found("Account", &account.id))?;
            *slot = account;
            Ok(())
        })
    }

    pub fn set_archived(&mut self, id: &str, archived: bool) -> Result<()> {
        let mut account = self
            .account(id)
            .cloned()
            .ok_or_else(|| EntryError::not_found("Account", id))?;
        account.archived = archived;
        self.update_account(account)
    }

    /// Hard delete. Transactions that point at the account are left in place.
    pub fn delete_account(&mut self, id: &str) -> Result<bool> {
        self.commit(|d| {
            let before = d.accounts.len();
            d.accounts.retain(|a| a.id != id);
            Ok(d.accounts.len() != before)
        })
    }

    // Transactions

    pub fn add_transaction(&mut self, mut tx: Transaction) -> Result<String> {
        if tx.account_id.trim().is_empty() {
            return Err(EntryError::MissingAccount.into());
        }
        if tx.amount <= Decimal::ZERO {
            return Err(EntryError::NonPositiveAmount(tx.amount).into());
        }
        tx.check_amount()?;
        tx.id = generate_id();
        let id = tx.id.clone();
        let kind = tx.r#type;
        self.commit(|d| {
            d.transactions.push(tx);
            Ok(())
        })?;
        info!(transaction = %id, %kind, "transaction recorded");
        Ok(id)
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<bool> {
        self.commit(|d| {
            let before = d.transactions.len();
            d.transactions.retain(|t| t.id != id);
            Ok(d.transactions.len() != before)
        })
    }

    // Eggs

    pub fn add_egg_collection(&mut self, mut entry: EggCollection) -> Result<String> {
        entry.id = generate_id();
        let id = entry.id.clone();
        self.commit(|d| {
            d.egg_collections.push(entry);
            Ok(())
        })?;
        debug!(collection = %id, "egg collection recorded");
        Ok(id)
    }

    pub fn delete_egg_collection(&mut self, id: &str) -> Result<bool> {
        self.commit(|d| {
            let before = d.egg_collections.len();
            d.egg_collections.retain(|c| c.id != id);
            Ok(d.egg_collections.len() != before)
        })
    }

    // Feed

    /// Records a feed movement. A purchase with a cost and a vendor also
    /// writes the matching Purchase entry to the ledger, in the same commit.
    pub fn record_feed(&mut self, mut entry: FeedTransaction) -> Result<FeedRecorded> {
        if entry.quantity <= Decimal::ZERO {
            return Err(EntryError::NonPositiveQuantity(entry.quantity).into());
        }
        entry.id = generate_id();
        let linked = entry.ledger_entry().map(|mut tx| {
            tx.id = generate_id();
            tx
        });
        let recorded = FeedRecorded {
            feed_id: entry.id.clone(),
            transaction_id: linked.as_ref().map(|t| t.id.clone()),
        };
        self.commit(|d| {
            d.feed_transactions.push(entry);
            if let Some(tx) = linked {
                d.transactions.push(tx);
            }
            Ok(())
        })?;
        debug!(feed = %recorded.feed_id, linked = ?recorded.transaction_id, "feed entry recorded");
        Ok(recorded)
    }

    pub fn delete_feed_transaction(&mut self, id: &str) -> Result<bool> {
        self.commit(|d| {
            let before = d.feed_transactions.len();
            d.feed_transactions.retain(|f| f.id != id);
            Ok(d.feed_transactions.len() != before)
        })
    }

    // Settings and document

    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<()> {
        self.commit(|d| {
            if let Some(currency) = patch.currency {
                d.settings.currency = currency;
            }
            if let Some(name) = patch.farm_name {
                d.settings.farm_name = name;
            }
            if let Some(theme) = patch.theme {
                d.settings.theme = theme;
            }
            Ok(())
        })
    }

    /// Replaces the whole document. Malformed input leaves the store untouched.
    pub fn import_json(&mut self, body: &str) -> Result<()> {
        let incoming = parse_document(body).context("Invalid JSON data")?;
        self.commit(|d| {
            *d = incoming;
            Ok(())
        })?;
        info!(
            accounts = self.data.accounts.len(),
            transactions = self.data.transactions.len(),
            "farm data imported"
        );
        Ok(())
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }

    pub fn reset(&mut self) -> Result<()> {
        self.commit(|d| {
            *d = FarmData::default();
            Ok(())
        })
    }
}

/// Parses a stored or imported document. Legacy documents without feed
/// entries load with an empty list; invoices whose amount disagrees with
/// their items are kept but reported.
pub fn parse_document(body: &str) -> Result<FarmData> {
    let data: FarmData = serde_json::from_str(body)?;
    for tx in &data.transactions {
        if let Err(err) = tx.check_amount() {
            warn!(transaction = %tx.id, "{}", err);
        }
    }
    Ok(data)
}
