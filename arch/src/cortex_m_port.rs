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

use core::time::Duration;
use cortex_m::{asm, interrupt, peripheral::scb::VectActive, peripheral::SCB, register::primask};

#[inline]
pub fn disable_local_irq_save() -> usize {
    let active = primask::read().is_active();
    interrupt::disable();
    active as usize
}

#[inline]
pub fn enable_local_irq_restore(flags: usize) {
    if flags != 0 {
        // SAFETY: restores the state saved by disable_local_irq_save().
        unsafe { interrupt::enable() };
    }
}

#[inline]
pub fn is_in_irq() -> bool {
    SCB::vect_active() != VectActive::ThreadMode
}

#[inline]
pub fn current_cpu_id() -> usize {
    0
}

/// Handle used to wake a parked thread. Single-core, so waking is a plain
/// event signal.
#[derive(Clone, Debug)]
pub struct ThreadHandle;

impl ThreadHandle {
    pub fn unpark(&self) {
        asm::sev();
    }
}

pub fn current_thread() -> ThreadHandle {
    ThreadHandle
}

pub fn park_current_thread() {
    asm::wfe();
}

pub fn park_current_thread_timeout(_limit: Duration) {
    // The caller re-checks its deadline after every wake-up; the systick
    // event is enough to bound the sleep.
    asm::wfe();
}

pub fn monotonic_now() -> Duration {
    // Bare-metal timekeeping comes from the kernel's tick counter, not from
    // the architecture port.
    Duration::ZERO
}
