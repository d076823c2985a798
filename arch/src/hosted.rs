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

// Hosted port. A host process has no interrupts to mask; mutual exclusion
// is carried by the spinlocks that wrap these calls. Parking maps directly
// onto the host scheduler.

use core::time::Duration;
use std::{sync::OnceLock, thread, time::Instant};

#[inline]
pub fn disable_local_irq_save() -> usize {
    0
}

#[inline]
pub fn enable_local_irq_restore(_flags: usize) {}

#[inline]
pub fn is_in_irq() -> bool {
    false
}

#[inline]
pub fn current_cpu_id() -> usize {
    0
}

/// Handle used to wake a parked thread.
#[derive(Clone, Debug)]
pub struct ThreadHandle(thread::Thread);

impl ThreadHandle {
    pub fn unpark(&self) {
        self.0.unpark();
    }
}

pub fn current_thread() -> ThreadHandle {
    ThreadHandle(thread::current())
}

pub fn park_current_thread() {
    thread::park();
}

pub fn park_current_thread_timeout(limit: Duration) {
    thread::park_timeout(limit);
}

static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Monotonic time since the first call in this process.
pub fn monotonic_now() -> Duration {
    EPOCH.get_or_init(Instant::now).elapsed()
}
