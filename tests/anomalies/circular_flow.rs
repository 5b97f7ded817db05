//! Circular Information Flow Tests (G1c)
//!
//! Each transaction reads the other's uncommitted write before either
//! commits, so each one depends on the other. Writes touch disjoint keys,
//! so row locks never block and both stores show the cycle.

use crate::common::*;

fn circular_flow(kind: StoreKind) {
    let (store, mut executor) = create_executor(kind, &[]);
    let t1 = executor.new_txn("txn1");
    let t2 = executor.new_txn("txn2");

    t1.begin_tx()
        .set(1, 11)
        .signal("txn1_wrote")
        .wait_for("txn2_wrote");
    let t1_saw = t1.get(2);
    t1.signal("txn1_read").wait_for("txn2_read").commit();

    t2.begin_tx()
        .set(2, 22)
        .signal("txn2_wrote")
        .wait_for("txn1_wrote");
    let t2_saw = t2.get(1);
    t2.signal("txn2_read").wait_for("txn1_read").commit();

    let results = executor.execute(false).unwrap();
    assert_eq!(results.value(&t1_saw), 22);
    assert_eq!(results.value(&t2_saw), 11);
    assert_eq!(final_value(&store, 1), 11);
    assert_eq!(final_value(&store, 2), 22);
}

#[test]
fn circular_flow_unsynchronized() {
    circular_flow(StoreKind::Unsynchronized);
}

#[test]
fn circular_flow_row_locked() {
    circular_flow(StoreKind::RowLocked);
}
