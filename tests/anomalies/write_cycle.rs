//! Write Cycle Tests (G0)
//!
//! Both transactions write keys 1 and 2, interleaved so that without write
//! locks T2 wins key 1 and T1 wins key 2. Neither serial order produces
//! that state.

use crate::common::*;

fn write_cycle(kind: StoreKind) -> (Value, Value) {
    let (store, mut executor) = create_executor(kind, &[(1, 10), (2, 20)]);
    let t1 = executor.new_txn("txn1");
    let t2 = executor.new_txn("txn2");
    let t3 = executor.new_txn("txn3");

    t1.begin_tx()
        .set(1, 11)
        .signal("txn1_wrote_x")
        .wait_for_timeout("txn2_wrote", LOCK_WAIT)
        .set(2, 21)
        .commit()
        .signal("txn1_committed");

    t2.begin_tx()
        .wait_for("txn1_wrote_x")
        .set(1, 12)
        .set(2, 22)
        .signal("txn2_wrote")
        .commit()
        .signal("txn2_committed");

    t3.begin_tx()
        .wait_for("txn1_committed")
        .wait_for("txn2_committed");
    let x = t3.get(1);
    let y = t3.get(2);
    t3.commit();

    let results = executor.execute(false).unwrap();
    assert!(results.failed_ops().is_empty());
    assert_eq!(final_value(&store, 1), results.value(&x));
    (results.value(&x), results.value(&y))
}

#[test]
fn write_cycle_without_row_locks() {
    assert_eq!(write_cycle(StoreKind::Unsynchronized), (12, 21));
}

#[test]
fn row_locks_prevent_write_cycle() {
    assert_eq!(write_cycle(StoreKind::RowLocked), (12, 22));
}
