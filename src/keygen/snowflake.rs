//! Time-ordered 64-bit ids and the short keys derived from them.

use parking_lot::Mutex;
use tracing::{debug, error, trace};

use super::base62::{KEY_SPACE, fold_to_key};
use super::clock::{Clock, SystemClock};

/// 2021-01-01T00:00:00Z in Unix milliseconds.
pub const EPOCH: i64 = 1_609_459_200_000;

pub const MACHINE_ID_BITS: u32 = 10;
pub const SEQUENCE_BITS: u32 = 12;
pub const TIMESTAMP_BITS: u32 = 41;

pub const MAX_MACHINE_ID: u16 = (1 << MACHINE_ID_BITS) - 1;
pub const MAX_SEQUENCE: u64 = (1 << SEQUENCE_BITS) - 1;
pub const MAX_TIMESTAMP_DELTA: i64 = (1 << TIMESTAMP_BITS) - 1;

const MACHINE_ID_SHIFT: u32 = SEQUENCE_BITS;
const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + MACHINE_ID_BITS;

/// Errors raised by [`SnowflakeGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyGenError {
    #[error("Machine id {0} is out of range (0..={max})", max = MAX_MACHINE_ID)]
    InvalidMachineId(u16),

    #[error("Fold modulus {0} must be between 1 and 62^8")]
    InvalidFoldModulus(u64),

    #[error("Clock moved backwards: last id at {last}ms, clock now reads {observed}ms")]
    ClockRollback { last: i64, observed: i64 },

    #[error("Timestamp {0}ms is outside the representable id range")]
    TimestampOutOfRange(i64),
}

/// Fields packed into an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParts {
    /// Unix milliseconds.
    pub timestamp_ms: i64,
    pub machine_id: u16,
    pub sequence: u16,
}

/// Splits an id back into timestamp, machine id and sequence.
pub fn decompose(id: u64) -> IdParts {
    IdParts {
        timestamp_ms: (id >> TIMESTAMP_SHIFT) as i64 + EPOCH,
        machine_id: ((id >> MACHINE_ID_SHIFT) & u64::from(MAX_MACHINE_ID)) as u16,
        sequence: (id & MAX_SEQUENCE) as u16,
    }
}

#[derive(Debug)]
struct GeneratorState {
    last_timestamp: i64,
    sequence: u64,
}

/// Snowflake id generator.
///
/// Ids are laid out as `[41 bits ms since EPOCH][10 bits machine][12 bits
/// sequence]`. Each instance keeps its last timestamp and sequence behind a
/// mutex, so callers on one instance serialize while separate instances
/// (with distinct machine ids) never coordinate.
///
/// # Examples
///
/// ```
/// use zaplink_core::keygen::SnowflakeGenerator;
///
/// let generator = SnowflakeGenerator::new(7).unwrap();
/// let key = generator.generate_short_key().unwrap();
/// assert_eq!(key.len(), 8);
/// ```
#[derive(Debug)]
pub struct SnowflakeGenerator<C: Clock = SystemClock> {
    machine_id: u16,
    fold_modulus: u64,
    clock: C,
    state: Mutex<GeneratorState>,
}

impl SnowflakeGenerator<SystemClock> {
    /// # Errors
    ///
    /// Returns [`KeyGenError::InvalidMachineId`] above 1023.
    pub fn new(machine_id: u16) -> Result<Self, KeyGenError> {
        Self::with_clock(machine_id, SystemClock)
    }
}

impl<C: Clock> SnowflakeGenerator<C> {
    /// Builds a generator reading time from `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyGenError::InvalidMachineId`] above 1023.
    pub fn with_clock(machine_id: u16, clock: C) -> Result<Self, KeyGenError> {
        if machine_id > MAX_MACHINE_ID {
            return Err(KeyGenError::InvalidMachineId(machine_id));
        }

        debug!(machine_id, "Created short key generator");
        Ok(Self {
            machine_id,
            fold_modulus: KEY_SPACE,
            clock,
            state: Mutex::new(GeneratorState {
                last_timestamp: -1,
                sequence: 0,
            }),
        })
    }

    /// Replaces the modulus used to fold ids into keys.
    ///
    /// # Errors
    ///
    /// Returns [`KeyGenError::InvalidFoldModulus`] unless `1 <= modulus <= 62^8`.
    pub fn with_fold_modulus(mut self, modulus: u64) -> Result<Self, KeyGenError> {
        if modulus == 0 || modulus > KEY_SPACE {
            return Err(KeyGenError::InvalidFoldModulus(modulus));
        }
        self.fold_modulus = modulus;
        Ok(self)
    }

    pub fn machine_id(&self) -> u16 {
        self.machine_id
    }

    pub fn fold_modulus(&self) -> u64 {
        self.fold_modulus
    }

    /// Produces the next id. Ids from one instance strictly increase while
    /// the clock does not move backwards.
    ///
    /// When 4096 ids have been issued within one millisecond, the call
    /// spins until the clock advances.
    ///
    /// # Errors
    ///
    /// - [`KeyGenError::ClockRollback`] if the clock reads earlier than the
    ///   last issued id
    /// - [`KeyGenError::TimestampOutOfRange`] before the epoch or after the
    ///   41-bit range runs out
    pub fn next_id(&self) -> Result<u64, KeyGenError> {
        let mut state = self.state.lock();
        let mut timestamp = self.clock.now_millis();

        if timestamp < state.last_timestamp {
            error!(
                last = state.last_timestamp,
                observed = timestamp,
                "Clock moved backwards, refusing to generate id"
            );
            metrics::counter!("short_key_clock_rollbacks_total").increment(1);
            return Err(KeyGenError::ClockRollback {
                last: state.last_timestamp,
                observed: timestamp,
            });
        }

        if timestamp == state.last_timestamp {
            state.sequence = (state.sequence + 1) & MAX_SEQUENCE;
            if state.sequence == 0 {
                trace!(timestamp, "Sequence exhausted, waiting for next millisecond");
                metrics::counter!("short_key_sequence_exhausted_total").increment(1);
                timestamp = self.wait_next_millis(state.last_timestamp);
            }
        } else {
            state.sequence = 0;
        }

        let delta = timestamp - EPOCH;
        if !(0..=MAX_TIMESTAMP_DELTA).contains(&delta) {
            return Err(KeyGenError::TimestampOutOfRange(timestamp));
        }

        state.last_timestamp = timestamp;

        Ok(((delta as u64) << TIMESTAMP_SHIFT)
            | (u64::from(self.machine_id) << MACHINE_ID_SHIFT)
            | state.sequence)
    }

    /// Mints a fresh 8-character Base62 key.
    ///
    /// # Errors
    ///
    /// Propagates any [`next_id`](Self::next_id) failure.
    pub fn generate_short_key(&self) -> Result<String, KeyGenError> {
        let id = self.next_id()?;
        let key = fold_to_key(id, self.fold_modulus);
        metrics::counter!("short_keys_generated_total").increment(1);
        trace!(id, key = %key, "Generated short key");
        Ok(key)
    }

    fn wait_next_millis(&self, last: i64) -> i64 {
        let mut timestamp = self.clock.now_millis();
        while timestamp <= last {
            std::hint::spin_loop();
            timestamp = self.clock.now_millis();
        }
        timestamp
    }
}
