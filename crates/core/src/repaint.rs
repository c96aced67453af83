//! Repaint notification from channel writers to whatever draws the channel.
//!
//! Writers run on adapter threads and must never draw synchronously, so a
//! hook only records that a repaint is wanted. The display side decides when
//! to act on it.

use std::sync::atomic::{AtomicBool, Ordering};

/// Receives a notification each time a bound channel is written
pub trait RepaintHook: Send + Sync {
    /// Must return immediately; called on the writer's thread.
    fn request_repaint(&self);
}

impl<F> RepaintHook for F
where
    F: Fn() + Send + Sync,
{
    fn request_repaint(&self) {
        self()
    }
}

/// Dirty flag polled by the display loop
#[derive(Debug, Default)]
pub struct RepaintFlag {
    dirty: AtomicBool,
}

impl RepaintFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the flag, returning whether a repaint was pending
    pub fn take(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }
}

impl RepaintHook for RepaintFlag {
    fn request_repaint(&self) {
        self.dirty.store(true, Ordering::Release);
    }
}
