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

use crate::{
    arch,
    time::{TickClock, TickInstant},
};
use core::{
    ptr::NonNull,
    sync::atomic::{AtomicBool, Ordering},
};
use teal_infra::{
    impl_simple_intrusive_adapter,
    list::typed_ilist::{List, ListHead},
};

impl_simple_intrusive_adapter!(OffsetOfWait, Waiter, wait_node);

/// One blocked thread. Lives on the waiting thread's stack; linked into a
/// WaitQueue only between enqueue and remove, both under the owning lock.
#[derive(Debug)]
pub(crate) struct Waiter {
    wait_node: ListHead<Waiter, OffsetOfWait>,
    signaled: AtomicBool,
    thread: arch::ThreadHandle,
}

impl Waiter {
    pub fn new() -> Self {
        Self {
            wait_node: ListHead::new(),
            signaled: AtomicBool::new(false),
            thread: arch::current_thread(),
        }
    }

    fn node(&mut self) -> NonNull<ListHead<Waiter, OffsetOfWait>> {
        NonNull::from(&mut self.wait_node)
    }

    pub fn wake(&self) {
        self.signaled.store(true, Ordering::Release);
        self.thread.unpark();
    }

    /// Parks until woken. Returns false if `deadline` passed first.
    pub fn block(&self, deadline: Option<TickInstant>) -> bool {
        loop {
            if self.signaled.load(Ordering::Acquire) {
                return true;
            }
            match deadline {
                None => arch::park_current_thread(),
                Some(deadline) => {
                    let now = TickClock::now();
                    if now >= deadline {
                        return false;
                    }
                    arch::park_current_thread_timeout((deadline - now).as_duration());
                }
            }
        }
    }
}

/// FIFO of blocked threads; the caller's spinlock serializes every access.
#[derive(Debug)]
pub(crate) struct WaitQueue {
    list: List<Waiter, OffsetOfWait>,
}

impl WaitQueue {
    pub const fn new() -> Self {
        Self { list: List::new() }
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// # Safety
    ///
    /// `waiter` must outlive its membership and must be removed (or popped
    /// by a wake) before it is dropped.
    pub unsafe fn enqueue(&mut self, waiter: &mut Waiter) {
        self.list.push_back(waiter.node());
    }

    /// Wakes the longest-waiting thread. Returns false if none was queued.
    pub fn wake_one(&mut self) -> bool {
        let Some(node) = self.list.pop_front() else {
            return false;
        };
        unsafe { node.as_ref() }.owner().wake();
        true
    }

    /// Unlinks `waiter` if a wake-up did not already pop it.
    pub fn remove(&mut self, waiter: &mut Waiter) {
        unsafe {
            self.list.remove(waiter.node());
        }
    }
}
