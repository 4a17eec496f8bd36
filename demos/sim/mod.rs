//! A small seeded simulation feeding the dashboard.
//!
//! A user asks a database to create named streams. The database reserves
//! each name in a 64-slot pending table and asks the OS to create a file;
//! the OS completes those requests in random order. Every random choice
//! comes from seeded `SmallRng`s, so a seed replays the same run.

use dst_dashboard::{SnapshotSource, StatsSnapshot};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::{BinaryHeap, HashSet};
use std::ops::Range;

/// Simulated time covered by one run.
pub const MAX_TIME_MS: u64 = 24 * 60 * 60 * 1000;
/// Simulated time per step.
pub const STEP_MS: u64 = 10;

const CREATE_STREAM_CHANCE: f64 = 0.01;
const ADVANCE_OS_CHANCE: f64 = 0.1;
const MAX_STREAM_NAME_LEN: usize = 64;
const NAME_POOL_BYTES: usize = 1024;
const PENDING_SLOTS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CreateStreamError {
    DuplicateName,
    ReservationLimitExceeded,
}

/// Names waiting for their file, one per slot.
struct PendingNames {
    slots: [Option<Range<usize>>; PENDING_SLOTS],
    used: u64,
}

impl PendingNames {
    fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            used: 0,
        }
    }

    fn contains(&self, pool: &[u8], name: &[u8]) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|range| &pool[range.clone()] == name)
    }

    /// Claim the lowest free slot.
    fn reserve(&mut self, name: Range<usize>) -> Result<usize, CreateStreamError> {
        let slot = (!self.used).trailing_zeros() as usize;
        if slot >= PENDING_SLOTS {
            return Err(CreateStreamError::ReservationLimitExceeded);
        }
        self.used |= 1 << slot;
        self.slots[slot] = Some(name);
        Ok(slot)
    }

    fn release(&mut self, slot: usize) -> Option<Range<usize>> {
        self.used &= !(1 << slot);
        self.slots[slot].take()
    }
}

/// A pending OS request; the heap pops the highest priority first.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct OsEvent {
    priority: u64,
    slot: usize,
}

/// The whole simulated world.
pub struct Simulation {
    rng: SmallRng,
    os_rng: SmallRng,
    pool: Vec<u8>,
    pool_cursor: usize,
    pending: PendingNames,
    streams: HashSet<Vec<u8>>,
    os_events: BinaryHeap<OsEvent>,
    time_ms: u64,
    started: bool,
    stats: StatsSnapshot,
}

impl Simulation {
    /// Seed a new run.
    pub fn new(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let pool = (0..NAME_POOL_BYTES).map(|_| rng.random::<u8>()).collect();
        Self {
            rng,
            os_rng: SmallRng::seed_from_u64(seed),
            pool,
            pool_cursor: 0,
            pending: PendingNames::new(),
            streams: HashSet::new(),
            os_events: BinaryHeap::new(),
            time_ms: 0,
            started: false,
            stats: StatsSnapshot::default(),
        }
    }

    /// Take the next name from the pool, or `None` once it is used up.
    fn next_name(&mut self) -> Option<Range<usize>> {
        if self.pool_cursor >= self.pool.len() {
            return None;
        }
        let remaining = self.pool.len() - self.pool_cursor;
        let len = self
            .rng
            .random_range(0..=remaining.min(MAX_STREAM_NAME_LEN));
        let name = self.pool_cursor..self.pool_cursor + len;
        self.pool_cursor = name.end;
        Some(name)
    }

    fn create_stream(&mut self, name: Range<usize>) -> Result<(), CreateStreamError> {
        let bytes = &self.pool[name.clone()];
        if self.pending.contains(&self.pool, bytes) || self.streams.contains(bytes) {
            return Err(CreateStreamError::DuplicateName);
        }
        let slot = self.pending.reserve(name)?;
        self.os_events.push(OsEvent {
            priority: self.os_rng.random(),
            slot,
        });
        Ok(())
    }

    /// Complete one pending OS request, if any.
    fn advance_os(&mut self) {
        let Some(event) = self.os_events.pop() else {
            return;
        };
        self.stats.files_created += 1;
        if let Some(name) = self.pending.release(event.slot) {
            self.streams.insert(self.pool[name].to_vec());
            self.stats.streams_created += 1;
        }
    }

    fn tick(&mut self) {
        if self.rng.random::<f64>() < CREATE_STREAM_CHANCE {
            if let Some(name) = self.next_name() {
                match self.create_stream(name) {
                    Ok(()) => {}
                    Err(CreateStreamError::DuplicateName) => {
                        self.stats.stream_name_duplicates += 1;
                    }
                    Err(CreateStreamError::ReservationLimitExceeded) => {
                        self.stats.stream_name_reservation_limit_exceeded += 1;
                    }
                }
            }
        }
        if self.rng.random::<f64>() < ADVANCE_OS_CHANCE {
            self.advance_os();
        }
    }
}

impl SnapshotSource for Simulation {
    fn step(&mut self) -> bool {
        if self.started {
            if self.time_ms + STEP_MS > MAX_TIME_MS {
                return false;
            }
            self.time_ms += STEP_MS;
        }
        self.started = true;
        self.tick();
        self.stats.elapsed_ms = self.time_ms;
        true
    }

    fn snapshot(&self) -> StatsSnapshot {
        self.stats
    }
}
