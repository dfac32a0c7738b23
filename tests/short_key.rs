mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use common::{FixedClock, ScriptedClock};
use zaplink_core::keygen::{EPOCH, KEY_LENGTH, KeyGenError, SnowflakeGenerator, decompose};

fn is_base62(key: &str) -> bool {
    key.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[test]
fn test_hundred_thousand_keys_are_unique() {
    let generator = SnowflakeGenerator::new(1).unwrap();
    let mut seen = HashSet::with_capacity(100_000);

    for _ in 0..100_000 {
        let key = generator.generate_short_key().unwrap();
        assert_eq!(key.len(), KEY_LENGTH);
        assert!(is_base62(&key), "unexpected key {key}");
        assert!(seen.insert(key), "duplicate key");
    }
}

#[test]
fn test_shared_generator_across_threads() {
    let generator = Arc::new(SnowflakeGenerator::new(42).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || {
                (0..5_000)
                    .map(|_| generator.next_id().unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id), "duplicate id {id}");
        }
    }
    assert_eq!(ids.len(), 40_000);
}

#[test]
fn test_distinct_machines_never_collide_in_same_millisecond() {
    let now = EPOCH + 1_000_000;
    let a = SnowflakeGenerator::with_clock(1, FixedClock(now)).unwrap();
    let b = SnowflakeGenerator::with_clock(2, FixedClock(now)).unwrap();

    let mut ids = HashSet::new();
    for _ in 0..1_000 {
        assert!(ids.insert(a.next_id().unwrap()));
        assert!(ids.insert(b.next_id().unwrap()));
    }

    let parts = decompose(b.next_id().unwrap());
    assert_eq!(parts.machine_id, 2);
    assert_eq!(parts.timestamp_ms, now);
    assert_eq!(parts.sequence, 1_000);
}

#[test]
fn test_exhausted_sequence_waits_for_next_millisecond() {
    let now = EPOCH + 77;
    let mut script = vec![now; 4_097];
    script.push(now + 1);
    let generator = SnowflakeGenerator::with_clock(5, ScriptedClock::new(script)).unwrap();

    let mut last = 0;
    for expected in 0..4_096u16 {
        let id = generator.next_id().unwrap();
        assert_eq!(decompose(id).sequence, expected);
        assert!(id > last);
        last = id;
    }

    let id = generator.next_id().unwrap();
    let parts = decompose(id);
    assert_eq!(parts.timestamp_ms, now + 1);
    assert_eq!(parts.sequence, 0);
    assert!(id > last);
}

#[test]
fn test_clock_rollback_is_reported() {
    let generator =
        SnowflakeGenerator::with_clock(3, ScriptedClock::new(vec![EPOCH + 100, EPOCH + 50]))
            .unwrap();

    generator.generate_short_key().unwrap();
    let err = generator.generate_short_key().unwrap_err();

    assert_eq!(
        err,
        KeyGenError::ClockRollback {
            last: EPOCH + 100,
            observed: EPOCH + 50
        }
    );
}

#[test]
fn test_ids_decompose_to_current_time() {
    let generator = SnowflakeGenerator::new(9).unwrap();
    let before = chrono::Utc::now().timestamp_millis();
    let parts = decompose(generator.next_id().unwrap());
    let after = chrono::Utc::now().timestamp_millis();

    assert_eq!(parts.machine_id, 9);
    assert!((before..=after).contains(&parts.timestamp_ms));
}

#[test]
fn test_machine_id_out_of_range_is_rejected() {
    assert_eq!(
        SnowflakeGenerator::new(1024).unwrap_err(),
        KeyGenError::InvalidMachineId(1024)
    );
}
