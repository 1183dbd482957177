//! Input latch shared between an input source and the tick loop
//!
//! Key handlers write into the latch from any thread; the tick loop calls
//! `take` once per tick. The held direction persists, the start and pause
//! triggers are consumed by the read.

use std::sync::atomic::{AtomicBool, AtomicI8, Ordering};

use super::tick::TickInput;

#[derive(Debug, Default)]
pub struct InputLatch {
    direction: AtomicI8,
    start: AtomicBool,
    pause: AtomicBool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold a direction (-1, 0 or +1; other values clamp to their sign)
    pub fn set_direction(&self, direction: i8) {
        self.direction.store(direction.signum(), Ordering::Relaxed);
    }

    pub fn direction(&self) -> i8 {
        self.direction.load(Ordering::Relaxed)
    }

    pub fn press_start(&self) {
        self.start.store(true, Ordering::Relaxed);
    }

    pub fn press_pause(&self) {
        self.pause.store(true, Ordering::Relaxed);
    }

    /// Read the input for one tick, clearing one-shot triggers
    pub fn take(&self) -> TickInput {
        TickInput {
            direction: self.direction.load(Ordering::Relaxed),
            start: self.start.swap(false, Ordering::Relaxed),
            pause: self.pause.swap(false, Ordering::Relaxed),
        }
    }
}
