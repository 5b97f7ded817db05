//! Dirty Read Tests
//!
//! G1a (aborted read): a reader observes a write that is later rolled back.
//! G1b (intermediate read): a reader observes a value its writer overwrote
//! before committing.
//!
//! Reads take no row locks, so both stores behave the same.

use crate::common::*;

fn aborted_read(kind: StoreKind) {
    let (store, mut executor) = create_executor(kind, &[]);
    let t1 = executor.new_txn("txn1");
    let t2 = executor.new_txn("txn2");
    let t3 = executor.new_txn("txn3");

    t1.begin_tx()
        .set(1, 100)
        .signal("txn1_wrote")
        .wait_for("txn2_read")
        .rollback()
        .signal("txn1_rolled_back");

    t2.begin_tx().wait_for("txn1_wrote");
    let dirty = t2.get(1);
    t2.signal("txn2_read").commit();

    t3.begin_tx().wait_for("txn1_rolled_back");
    let after = t3.get(1);
    t3.commit();

    let results = executor.execute(false).unwrap();
    assert_eq!(results.value(&dirty), 100, "txn2 should see the uncommitted write");
    assert_eq!(results.value(&after), 0, "rollback should restore the absent key");
    assert_eq!(final_value(&store, 1), 0);
    assert!(store.snapshot().undo_log_lengths.is_empty());
}

fn intermediate_read(kind: StoreKind) {
    let (store, mut executor) = create_executor(kind, &[(1, 10)]);
    let t1 = executor.new_txn("txn1");
    let t2 = executor.new_txn("txn2");
    let t3 = executor.new_txn("txn3");

    t1.begin_tx()
        .set(1, 50)
        .signal("txn1_intermediate")
        .wait_for("txn2_read")
        .set(1, 100)
        .commit()
        .signal("txn1_committed");

    t2.begin_tx().wait_for("txn1_intermediate");
    let intermediate = t2.get(1);
    t2.signal("txn2_read").commit();

    t3.begin_tx().wait_for("txn1_committed");
    let committed = t3.get(1);
    t3.commit();

    let results = executor.execute(false).unwrap();
    assert_eq!(results.value(&intermediate), 50);
    assert_eq!(results.value(&committed), 100);
    assert_eq!(final_value(&store, 1), 100);
}

#[test]
fn aborted_read_unsynchronized() {
    aborted_read(StoreKind::Unsynchronized);
}

#[test]
fn aborted_read_row_locked() {
    aborted_read(StoreKind::RowLocked);
}

#[test]
fn intermediate_read_unsynchronized() {
    intermediate_read(StoreKind::Unsynchronized);
}

#[test]
fn intermediate_read_row_locked() {
    intermediate_read(StoreKind::RowLocked);
}
