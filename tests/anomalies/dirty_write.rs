//! Dirty Write Tests
//!
//! Key 1 is first place, key 2 second place. T1 puts racer 100 first and
//! racer 200 second; T2 swaps them. A consistent outcome has two different
//! racers on the podium.

use crate::common::*;

struct Podium {
    first: Value,
    second: Value,
}

fn run_race(kind: StoreKind) -> Podium {
    let (store, mut executor) = create_executor(kind, &[]);
    let t1 = executor.new_txn("txn1");
    let t2 = executor.new_txn("txn2");
    let t3 = executor.new_txn("txn3");

    // T2 may be blocked on key 1's row lock, so T1 cannot wait for it forever
    t1.begin_tx()
        .set(1, 100)
        .signal("txn1_wrote_first")
        .wait_for_timeout("txn2_wrote_second", LOCK_WAIT)
        .dump_state()
        .set(2, 200)
        .commit()
        .signal("txn1_committed");

    t2.begin_tx()
        .wait_for("txn1_wrote_first")
        .dump_state()
        .set(1, 200)
        .set(2, 100)
        .signal("txn2_wrote_second")
        .wait_for("txn1_committed")
        .commit()
        .signal("txn2_committed");

    t3.begin_tx()
        .wait_for("txn2_committed")
        .wait_for("txn1_committed");
    let first = t3.get(1);
    let second = t3.get(2);
    t3.commit();

    let results = executor.execute(true).unwrap();
    assert!(results.failed_ops().is_empty(), "{:?}", results.failed_ops());
    assert_eq!(final_value(&store, 1), results.value(&first));

    Podium {
        first: results.value(&first),
        second: results.value(&second),
    }
}

#[test]
fn dirty_write_occurs_without_row_locks() {
    let podium = run_race(StoreKind::Unsynchronized);

    // T2's first-place write and T1's second-place write both survive
    assert_eq!(podium.first, 200);
    assert_eq!(podium.second, 200);
}

#[test]
fn row_locks_prevent_dirty_write() {
    let podium = run_race(StoreKind::RowLocked);

    assert_ne!(podium.first, podium.second);
    // T2 could only write after T1 committed, so T2's swap wins both keys
    assert_eq!(podium.first, 200);
    assert_eq!(podium.second, 100);
}
