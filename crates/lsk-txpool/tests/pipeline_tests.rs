//! End-to-end pipeline runs with the canonical classifiers over an
//! in-memory account view.

use lsk_primitives::Amount;
use lsk_transactions::{parse_transaction, Account, Block, Transaction, TransactionErrorKind};
use lsk_txpool::{
    apply_classifier, validate_classifier, verify_classifier, InMemoryAccounts, PoolConfig,
    TransactionPool,
};
use serde_json::{json, Value};
use std::sync::Arc;

const SENDER_ID: &str = "18278674964748191682L";
const SENDER_KEY: &str = "0eb0a6d7b862dc35c856c02c47fde3b4f60f2f3571a888b9a8ca7540c6793243";
const SIGNATURE: &str = "618a54975212ead93df8c881655c625544bce8ed7ccdfe6f08a42eecfb1adebd051307be5014bb051617baf7815d50f62129e70918190361e5d4dd4796541b0a";

fn transfer_json(id: &str, amount: &str, fee: &str) -> Value {
    json!({
        "id": id,
        "type": 0,
        "senderId": SENDER_ID,
        "senderPublicKey": SENDER_KEY,
        "recipientId": "17243547555692708431L",
        "amount": amount,
        "fee": fee,
        "timestamp": 79289378,
        "signature": SIGNATURE,
    })
}

fn transfer(id: &str, amount: &str, fee: &str) -> Transaction {
    match parse_transaction(&transfer_json(id, amount, fee)) {
        Ok(tx) => tx,
        Err(e) => panic!("fixture did not normalize: {}", e),
    }
}

fn multisignature(id: &str, min: u64) -> Transaction {
    let mut value = transfer_json(id, "0", "1000000");
    value["type"] = json!(4);
    value["recipientId"] = json!("");
    value["asset"] = json!({
        "multisignature": { "min": min, "lifetime": 24, "keysgroup": [] }
    });
    match parse_transaction(&value) {
        Ok(tx) => tx,
        Err(e) => panic!("fixture did not normalize: {}", e),
    }
}

fn delegate_registration(id: &str, username: &str) -> Transaction {
    let mut value = transfer_json(id, "0", "2500000000");
    value["type"] = json!(2);
    value["recipientId"] = json!("");
    value["asset"] = json!({ "delegate": { "username": username } });
    match parse_transaction(&value) {
        Ok(tx) => tx,
        Err(e) => panic!("fixture did not normalize: {}", e),
    }
}

fn pool_over(accounts: InMemoryAccounts) -> TransactionPool {
    let state: Arc<InMemoryAccounts> = Arc::new(accounts);
    TransactionPool::new(
        PoolConfig::default(),
        validate_classifier(),
        verify_classifier(state.clone()),
        apply_classifier(state),
    )
}

fn funded_accounts(balance: u64) -> InMemoryAccounts {
    let mut accounts = InMemoryAccounts::new();
    let address = match SENDER_ID.parse() {
        Ok(a) => a,
        Err(e) => panic!("bad fixture address: {}", e),
    };
    let key = match SENDER_KEY.parse() {
        Ok(k) => k,
        Err(e) => panic!("bad fixture key: {}", e),
    };
    accounts.insert(Account::new(address, Amount::from_base_units(balance)).with_public_key(key));
    accounts
}

#[test]
fn funded_transfer_reaches_ready() {
    let mut pool = pool_over(funded_accounts(1_000_000_000));
    pool.add_transactions(vec![transfer("1", "100000000", "10000000")]);

    let outcome = pool.process_pipeline();
    assert!(outcome.errors.is_empty(), "unexpected: {:?}", outcome.errors);

    let processable = pool.get_processable_transactions(10);
    assert_eq!(processable.len(), 1);
    assert_eq!(processable[0].id.as_str(), "1");
}

#[test]
fn unsigned_transaction_is_rejected_at_validate() {
    let mut unsigned = transfer_json("1", "100000000", "10000000");
    unsigned["signature"] = json!("");
    let tx = match parse_transaction(&unsigned) {
        Ok(tx) => tx,
        Err(e) => panic!("fixture did not normalize: {}", e),
    };

    let mut pool = pool_over(funded_accounts(1_000_000_000));
    pool.add_transactions(vec![tx]);
    let outcome = pool.process_pipeline();

    assert_eq!(outcome.invalid.len(), 1);
    assert_eq!(
        outcome.errors[0].message,
        "Cannot validate transaction without signature."
    );
    assert!(pool.is_empty());
}

#[test]
fn broke_sender_is_rejected_at_verify_with_display_balance() {
    // 1.5 LSK on hand, 1.6 LSK needed
    let mut pool = pool_over(funded_accounts(150_000_000));
    pool.add_transactions(vec![transfer("1", "150000000", "10000000")]);

    let outcome = pool.process_pipeline();
    assert_eq!(outcome.invalid.len(), 1);
    assert_eq!(outcome.errors[0].kind, TransactionErrorKind::StateInsufficiency);
    assert_eq!(
        outcome.errors[0].message,
        format!("Account does not have enough LSK: {} balance: 1.5", SENDER_ID)
    );
}

#[test]
fn incomplete_multisignature_parks_in_pending() {
    let mut pool = pool_over(funded_accounts(1_000_000_000));
    pool.add_transactions(vec![multisignature("1", 2)]);

    let outcome = pool.process_pipeline();
    assert!(outcome.errors.is_empty(), "unexpected: {:?}", outcome.errors);

    // Parked, not processable, but still pooled
    assert!(pool.get_processable_transactions(10).is_empty());
    assert_eq!(pool.len(), 1);
    assert!(pool.exists(&"1".into()));
}

#[test]
fn cumulative_charging_rejects_second_transfer() {
    // Balance covers one 1.1 LSK transfer, not two
    let mut pool = pool_over(funded_accounts(200_000_000));
    pool.add_transactions(vec![
        transfer("1", "100000000", "10000000"),
        transfer("2", "100000000", "10000000"),
    ]);

    let outcome = pool.process_pipeline();
    assert_eq!(outcome.invalid.len(), 1);
    assert_eq!(outcome.invalid[0].id.as_str(), "2");
    assert_eq!(pool.get_processable_transactions(10).len(), 1);
}

#[test]
fn conflicting_registrations_across_ticks_yield_one_ready() {
    // The second registration arrives a full pipeline tick after the
    // first reached ready; it must still conflict
    let mut pool = pool_over(funded_accounts(10_000_000_000));
    pool.add_transactions(vec![delegate_registration("1", "alpha")]);
    pool.process_pipeline();
    pool.add_transactions(vec![delegate_registration("2", "beta")]);
    let outcome = pool.process_pipeline();

    assert_eq!(outcome.invalid.len(), 1);
    assert_eq!(outcome.invalid[0].id.as_str(), "2");
    assert_eq!(outcome.errors[0].kind, TransactionErrorKind::Conflict);
    assert_eq!(pool.get_processable_transactions(10).len(), 1);
}

#[test]
fn overspend_across_ticks_is_rejected() {
    // 2.0 LSK covers one 1.1 LSK transfer total, not one per tick
    let mut pool = pool_over(funded_accounts(200_000_000));
    pool.add_transactions(vec![transfer("1", "100000000", "10000000")]);
    pool.process_pipeline();
    pool.add_transactions(vec![transfer("2", "100000000", "10000000")]);
    let outcome = pool.process_pipeline();

    assert_eq!(outcome.invalid.len(), 1);
    assert_eq!(outcome.invalid[0].id.as_str(), "2");
    assert_eq!(outcome.errors[0].kind, TransactionErrorKind::StateInsufficiency);
    assert_eq!(pool.get_processable_transactions(10).len(), 1);
}

#[test]
fn committed_block_empties_ready() {
    let mut pool = pool_over(funded_accounts(1_000_000_000));
    let tx = transfer("1", "100000000", "10000000");
    pool.add_transactions(vec![tx.clone()]);
    pool.process_pipeline();
    assert_eq!(pool.get_processable_transactions(10).len(), 1);

    pool.on_new_block(&Block {
        height: 42,
        transactions: vec![tx],
    });
    assert!(pool.is_empty());
}

#[test]
fn deleted_block_transactions_rerun_the_pipeline() {
    let mut pool = pool_over(funded_accounts(1_000_000_000));
    let tx = transfer("1", "100000000", "10000000");

    pool.on_delete_block(&Block {
        height: 42,
        transactions: vec![tx],
    });
    assert_eq!(pool.len(), 1);
    assert!(pool.get_processable_transactions(10).is_empty());

    let outcome = pool.process_pipeline();
    assert!(outcome.errors.is_empty(), "unexpected: {:?}", outcome.errors);
    assert_eq!(pool.get_processable_transactions(10).len(), 1);
}
