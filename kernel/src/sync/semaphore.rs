// Copyright (c) 2025 vivo Mobile Communication Co., Ltd.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::{
    wait_queue::{WaitQueue, Waiter},
    SpinLock,
};
use crate::{
    arch,
    error::{code, Error},
    time::{TickClock, TickDuration, TickInstant},
};
use core::cell::Cell;
use log::trace;

/// Counting semaphore, safe to post from interrupt context. Waiters are
/// released in FIFO order; the counter is the source of truth, so a woken
/// thread re-competes for it.
#[derive(Debug)]
pub struct Semaphore {
    value: Cell<usize>,
    max_value: usize,
    // We let the SpinLock protect the whole semaphore.
    pending: SpinLock<WaitQueue>,
}

unsafe impl Send for Semaphore {}
unsafe impl Sync for Semaphore {}

impl Semaphore {
    pub const fn const_new(initial: usize, max_value: usize) -> Self {
        assert!(initial <= max_value, "Initial value exceeds the maximum");
        Self {
            value: Cell::new(initial),
            max_value,
            pending: SpinLock::new(WaitQueue::new()),
        }
    }

    pub const fn new(initial: usize, max_value: usize) -> Self {
        Self::const_new(initial, max_value)
    }

    pub fn value(&self) -> usize {
        let _w = self.pending.irqsave_lock();
        self.value.get()
    }

    pub fn max_value(&self) -> usize {
        self.max_value
    }

    /// Takes a token without blocking. Legal from interrupt context.
    pub fn try_wait(&self) -> Result<(), Error> {
        let _w = self.pending.irqsave_lock();
        let old = self.value.get();
        if old == 0 {
            return Err(code::EAGAIN);
        }
        self.value.set(old - 1);
        Ok(())
    }

    pub fn wait(&self) -> Result<(), Error> {
        assert!(!arch::is_in_irq());
        self.wait_internal(None)
    }

    pub fn try_wait_for(&self, duration: TickDuration) -> Result<(), Error> {
        assert!(!arch::is_in_irq());
        self.wait_internal(Some(TickClock::now() + duration))
    }

    pub fn try_wait_until(&self, deadline: TickInstant) -> Result<(), Error> {
        assert!(!arch::is_in_irq());
        self.wait_internal(Some(deadline))
    }

    #[inline(never)]
    fn wait_internal(&self, deadline: Option<TickInstant>) -> Result<(), Error> {
        loop {
            let mut w = self.pending.irqsave_lock();
            let old = self.value.get();
            trace!(
                "[C#{}] reads counter to acquire: {}",
                arch::current_cpu_id(),
                old,
            );
            if old > 0 {
                self.value.set(old - 1);
                return Ok(());
            }
            if let Some(deadline) = deadline {
                if TickClock::now() >= deadline {
                    return Err(code::ETIMEDOUT);
                }
            }
            let mut waiter = Waiter::new();
            unsafe { w.enqueue(&mut waiter) };
            drop(w);

            let woken = waiter.block(deadline);

            let mut w = self.pending.irqsave_lock();
            w.remove(&mut waiter);
            if !woken {
                // The deadline passed while parked. A post may still have
                // arrived in between, so make one last attempt.
                let old = self.value.get();
                if old > 0 {
                    self.value.set(old - 1);
                    return Ok(());
                }
                return Err(code::ETIMEDOUT);
            }
        }
    }

    /// Returns a token and wakes the longest-waiting thread. Legal from
    /// interrupt context.
    #[inline(never)]
    pub fn post(&self) -> Result<(), Error> {
        let mut w = self.pending.irqsave_lock();
        let old = self.value.get();
        trace!(
            "[C#{}] reads counter to release: {}",
            arch::current_cpu_id(),
            old,
        );
        if old == self.max_value {
            return Err(code::EOVERFLOW);
        }
        self.value.set(old + 1);
        w.wake_one();
        Ok(())
    }
}
