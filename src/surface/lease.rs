//! Lease: process-wide exclusive ownership of a resource.

use std::sync::atomic::{AtomicBool, Ordering};

/// Exclusive hold on a process-wide flag, released on drop.
#[derive(Debug)]
pub struct Lease {
    flag: &'static AtomicBool,
}

impl Lease {
    /// Take the lease, or `None` if someone else holds it.
    pub fn acquire(flag: &'static AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
