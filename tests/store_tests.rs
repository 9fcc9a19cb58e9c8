// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use farmbook::error::EntryError;
use farmbook::models::{
    Account, AccountType, EggCollection, FarmData, FeedTransaction, FeedType, InvoiceItem, Theme,
    Transaction, TransactionType,
};
use farmbook::store::{Detached, Persist, SettingsPatch, Store, parse_document};
use farmbook::utils::parse_item;
use rust_decimal::Decimal;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn store_with_vendor() -> (Store<Detached>, String) {
    let mut store = Store::new(FarmData::default(), Detached);
    let vendor = store
        .add_account(Account::new("Feed Co", AccountType::Vendor).unwrap())
        .unwrap();
    (store, vendor)
}

fn purchase(qty: &str, cost: Option<&str>, vendor: Option<&str>) -> FeedTransaction {
    FeedTransaction::new(day("2025-01-05"), FeedType::Purchase, dec(qty))
        .unwrap()
        .with_purchase(cost.map(dec), vendor.map(str::to_string))
}

#[test]
fn paid_feed_purchase_writes_one_ledger_entry() {
    let (mut store, vendor) = store_with_vendor();
    let recorded = store
        .record_feed(purchase("50", Some("500"), Some(&vendor)))
        .unwrap();

    let data = store.data();
    assert_eq!(data.feed_transactions.len(), 1);
    assert_eq!(data.transactions.len(), 1);
    let tx = &data.transactions[0];
    assert_eq!(Some(tx.id.clone()), recorded.transaction_id);
    assert_eq!(store.transaction(&tx.id), Some(tx));
    assert_eq!(tx.r#type, TransactionType::Purchase);
    assert_eq!(tx.account_id, vendor);
    assert_eq!(tx.amount, dec("500"));
    assert_eq!(tx.date, day("2025-01-05"));
    assert_eq!(tx.notes.as_deref(), Some("Feed Purchase: 50kg"));
}

#[test]
fn unpaid_or_vendorless_feed_stays_off_the_ledger() {
    let (mut store, vendor) = store_with_vendor();
    store
        .record_feed(purchase("50", Some("0"), Some(&vendor)))
        .unwrap();
    store.record_feed(purchase("50", Some("500"), None)).unwrap();
    let consume = FeedTransaction::new(day("2025-01-06"), FeedType::Consume, dec("5"))
        .unwrap()
        .with_purchase(Some(dec("100")), Some(vendor.clone()));
    assert_eq!(consume.cost, None);
    let recorded = store.record_feed(consume).unwrap();

    assert_eq!(recorded.transaction_id, None);
    assert_eq!(store.data().feed_transactions.len(), 3);
    assert!(store.data().transactions.is_empty());
}

#[test]
fn export_then_import_restores_the_document() {
    let (mut source, vendor) = store_with_vendor();
    let customer = source
        .add_account(Account::new("Ali", AccountType::Customer).unwrap())
        .unwrap();
    source
        .add_transaction(
            Transaction::with_items(
                day("2025-01-02"),
                TransactionType::Sale,
                &customer,
                vec![InvoiceItem::new("Eggs", dec("30"), dec("12.5")).unwrap()],
            )
            .unwrap(),
        )
        .unwrap();
    source
        .add_egg_collection(EggCollection::new(day("2025-01-02"), 120, 4).unwrap())
        .unwrap();
    source
        .record_feed(purchase("50", Some("500"), Some(&vendor)))
        .unwrap();
    source
        .update_settings(SettingsPatch {
            farm_name: Some("Green Acres".into()),
            ..Default::default()
        })
        .unwrap();

    let body = source.export_json().unwrap();
    let mut target = Store::new(FarmData::default(), Detached);
    target.import_json(&body).unwrap();
    assert_eq!(target.data(), source.data());
}

#[test]
fn high_precision_amounts_survive_export_and_import() {
    let mut source = Store::new(FarmData::default(), Detached);
    let item = parse_item("Eggs:1.23456789012345678@1.1").unwrap();
    let tx = Transaction::with_items(day("2025-01-02"), TransactionType::Sale, "c1", vec![item])
        .unwrap();
    assert_eq!(tx.amount, dec("1.358024679135802458"));
    source.add_transaction(tx).unwrap();

    let mut target = Store::new(FarmData::default(), Detached);
    target.import_json(&source.export_json().unwrap()).unwrap();
    assert_eq!(target.data(), source.data());
    let restored = &target.data().transactions[0];
    assert_eq!(restored.amount.to_string(), "1.358024679135802458");
    assert_eq!(restored.items[0].quantity.to_string(), "1.23456789012345678");
    assert_eq!(restored.check_amount(), Ok(()));
}

#[test]
fn oversized_items_are_rejected_not_panicking() {
    assert!(parse_item("Eggs:99999999999999999999@99999999999999999999").is_err());
    assert_eq!(
        InvoiceItem::new("Eggs", dec("99999999999999999999"), dec("99999999999999999999")),
        Err(EntryError::InvalidItem("Eggs".into()))
    );

    let half = dec("50000000000000000000000000000");
    let items = vec![
        InvoiceItem::new("A", half, Decimal::ONE).unwrap(),
        InvoiceItem::new("B", half, Decimal::ONE).unwrap(),
    ];
    assert_eq!(
        Transaction::with_items(day("2025-01-02"), TransactionType::Sale, "c1", items),
        Err(EntryError::TotalOverflow)
    );
}

#[test]
fn malformed_import_keeps_current_state() {
    let (mut store, _) = store_with_vendor();
    let before = store.data().clone();
    let err = store.import_json("{ not json").unwrap_err();
    assert_eq!(err.to_string(), "Invalid JSON data");
    assert_eq!(store.data(), &before);
}

#[test]
fn legacy_document_loads_with_defaults() {
    let body = r#"{
        "accounts": [{"id": "a1", "name": "Ali", "type": "Customer"}],
        "transactions": [{
            "id": "t1", "date": "2025-01-05T10:30:00.000Z", "type": "Sale",
            "accountId": "a1", "amount": 99,
            "items": [{"description": "Eggs", "quantity": 10, "unitPrice": 10, "total": 100}]
        }],
        "eggCollections": []
    }"#;
    let data = parse_document(body).unwrap();
    assert!(data.feed_transactions.is_empty());
    assert_eq!(data.settings.currency, "PKR");
    assert_eq!(data.settings.theme, Theme::StainedGlass);
    assert_eq!(data.transactions[0].date, day("2025-01-05"));
    // Kept as stored even though it disagrees with its items.
    assert_eq!(data.transactions[0].amount, dec("99"));
}

#[test]
fn manual_entries_are_validated() {
    let (mut store, vendor) = store_with_vendor();

    let mut tx = Transaction::with_items(
        day("2025-01-02"),
        TransactionType::Sale,
        &vendor,
        vec![InvoiceItem::new("Eggs", dec("10"), dec("10")).unwrap()],
    )
    .unwrap();
    tx.amount = dec("90");
    let err = store.add_transaction(tx).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EntryError>(),
        Some(EntryError::AmountMismatch { .. })
    ));

    assert_eq!(
        Transaction::new(day("2025-01-02"), TransactionType::Sale, "a", Decimal::ZERO),
        Err(EntryError::NonPositiveAmount(Decimal::ZERO))
    );
    assert_eq!(
        Transaction::new(day("2025-01-02"), TransactionType::Sale, " ", dec("5")),
        Err(EntryError::MissingAccount)
    );
    assert_eq!(
        Transaction::with_items(day("2025-01-02"), TransactionType::Sale, "a", vec![]),
        Err(EntryError::EmptyInvoice)
    );
    assert_eq!(
        EggCollection::new(day("2025-01-02"), -1, 0),
        Err(EntryError::NegativeCount)
    );
    assert!(FeedTransaction::new(day("2025-01-02"), FeedType::Consume, Decimal::ZERO).is_err());
    assert!(Account::new("  ", AccountType::Owner).is_err());
    assert!(store.data().transactions.is_empty());
}

#[test]
fn deleting_an_account_leaves_its_transactions() {
    let mut store = Store::new(FarmData::default(), Detached);
    let id = store
        .add_account(Account::new("Ali", AccountType::Customer).unwrap())
        .unwrap();
    store
        .add_transaction(
            Transaction::new(day("2025-01-02"), TransactionType::Sale, &id, dec("10")).unwrap(),
        )
        .unwrap();
    assert!(store.delete_account(&id).unwrap());
    assert!(!store.delete_account(&id).unwrap());
    assert_eq!(store.data().transactions.len(), 1);
    assert_eq!(store.account_name(&id), None);
}

#[test]
fn archived_accounts_leave_the_pickers() {
    let mut store = Store::new(FarmData::default(), Detached);
    let id = store
        .add_account(Account::new("Ali", AccountType::Customer).unwrap())
        .unwrap();
    store.set_archived(&id, true).unwrap();
    assert_eq!(store.active_accounts().count(), 0);
    assert!(store.account(&id).is_some());
    store.set_archived(&id, false).unwrap();
    assert_eq!(store.active_accounts().count(), 1);
}

struct FailingSink;

impl Persist for FailingSink {
    fn persist(&mut self, _data: &FarmData) -> Result<()> {
        Err(anyhow!("disk full"))
    }
}

#[test]
fn failed_write_leaves_state_unchanged() {
    let mut store = Store::new(FarmData::default(), FailingSink);
    let err = store
        .add_account(Account::new("Ali", AccountType::Customer).unwrap())
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to save farm data");
    assert!(store.data().accounts.is_empty());
}

#[test]
fn corrupt_stored_document_starts_fresh() {
    let store = Store::load(Some("garbage"), Detached);
    assert_eq!(store.data(), &FarmData::default());
}

#[test]
fn reset_clears_everything() {
    let (mut store, _) = store_with_vendor();
    store
        .update_settings(SettingsPatch {
            currency: Some("USD".into()),
            theme: Some(Theme::Minimal),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(store.settings().currency, "USD");
    assert_eq!(store.settings().farm_name, "My Egg Farm");
    store.reset().unwrap();
    assert_eq!(store.data(), &FarmData::default());
}
