//! Lost Update Tests
//!
//! Two transactions read a counter, increment what they read, and write it
//! back. Both read 0, so one increment is lost and the counter ends at 1.
//! Row locks serialize the writes but not the reads, so they do not help.

use crate::common::*;

fn increment_race(kind: StoreKind) {
    let (store, mut executor) = create_executor(kind, &[]);
    let t1 = executor.new_txn("txn1");
    let t2 = executor.new_txn("txn2");
    let t3 = executor.new_txn("txn3");

    t1.begin_tx();
    let read1 = t1.get(1);
    let read1_c = read1.clone();
    t1.signal("txn1_read")
        .wait_for("txn2_read")
        .set_computed(1, move |results| results.value(&read1_c) + 1)
        .signal("txn1_wrote")
        // T2's write blocks on T1's row lock until T1 commits
        .wait_for_timeout("txn2_wrote", LOCK_WAIT)
        .commit()
        .signal("txn1_committed");

    t2.begin_tx().wait_for("txn1_read");
    let read2 = t2.get(1);
    let read2_c = read2.clone();
    t2.signal("txn2_read")
        .wait_for("txn1_wrote")
        .dump_state()
        .set_computed(1, move |results| results.value(&read2_c) + 1)
        .signal("txn2_wrote")
        .commit()
        .signal("txn2_committed");

    t3.begin_tx()
        .wait_for("txn1_committed")
        .wait_for("txn2_committed");
    let final_read = t3.get(1);
    t3.commit();

    let results = executor.execute(false).unwrap();
    assert_eq!(results.value(&read1), 0);
    assert_eq!(results.value(&read2), 0);
    assert_eq!(results.value(&final_read), 1, "one increment should be lost");
    assert_eq!(final_value(&store, 1), 1);
}

#[test]
fn lost_update_unsynchronized() {
    increment_race(StoreKind::Unsynchronized);
}

#[test]
fn lost_update_row_locked() {
    increment_race(StoreKind::RowLocked);
}
