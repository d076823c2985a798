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

//! Type-erased callables the queue cores invoke. The wait discipline and the
//! per-slot operation are arguments, not branches: every push/pop variant a
//! facade exposes is one semaphore functor plus one storage functor handed to
//! the single core code path. All functors live on the caller's stack and are
//! passed by reference, never boxed.

use crate::{
    error::Error,
    sync::Semaphore,
    time::{TickDuration, TickInstant},
};
use core::{marker::PhantomData, mem, ptr};

/// Wait discipline applied to one of the paired semaphores.
pub(crate) trait SemaphoreFunctor {
    fn wait_on(&self, semaphore: &Semaphore) -> Result<(), Error>;
}

pub(crate) struct SemaphoreWait;

impl SemaphoreFunctor for SemaphoreWait {
    fn wait_on(&self, semaphore: &Semaphore) -> Result<(), Error> {
        semaphore.wait()
    }
}

pub(crate) struct SemaphoreTryWait;

impl SemaphoreFunctor for SemaphoreTryWait {
    fn wait_on(&self, semaphore: &Semaphore) -> Result<(), Error> {
        semaphore.try_wait()
    }
}

pub(crate) struct SemaphoreTryWaitFor {
    pub duration: TickDuration,
}

impl SemaphoreFunctor for SemaphoreTryWaitFor {
    fn wait_on(&self, semaphore: &Semaphore) -> Result<(), Error> {
        semaphore.try_wait_for(self.duration)
    }
}

pub(crate) struct SemaphoreTryWaitUntil {
    pub deadline: TickInstant,
}

impl SemaphoreFunctor for SemaphoreTryWaitUntil {
    fn wait_on(&self, semaphore: &Semaphore) -> Result<(), Error> {
        semaphore.try_wait_until(self.deadline)
    }
}

/// Per-slot operation the core runs while its critical section holds the
/// slot address stable.
pub(crate) trait QueueFunctor {
    /// # Safety
    ///
    /// `slot` must be valid for the queue's element size, properly aligned
    /// for the element type, and (for constructing functors) uninitialized,
    /// or (for consuming functors) holding a live element. The core calls
    /// this exactly once per successful queue operation.
    unsafe fn operate(&mut self, slot: *mut u8);
}

/// Byte-copies the caller's buffer into the slot. Raw queues only.
pub(crate) struct MemcpyPush<'a> {
    pub data: &'a [u8],
}

impl QueueFunctor for MemcpyPush<'_> {
    unsafe fn operate(&mut self, slot: *mut u8) {
        ptr::copy_nonoverlapping(self.data.as_ptr(), slot, self.data.len());
    }
}

/// Byte-copies the slot into the caller's buffer. Raw queues only.
pub(crate) struct MemcpyPop<'a> {
    pub buffer: &'a mut [u8],
}

impl QueueFunctor for MemcpyPop<'_> {
    unsafe fn operate(&mut self, slot: *mut u8) {
        ptr::copy_nonoverlapping(slot, self.buffer.as_mut_ptr(), self.buffer.len());
    }
}

/// Clones the caller's value into the slot.
pub(crate) struct CopyConstruct<'a, T: Clone> {
    pub value: &'a T,
}

impl<T: Clone> QueueFunctor for CopyConstruct<'_, T> {
    unsafe fn operate(&mut self, slot: *mut u8) {
        slot.cast::<T>().write(self.value.clone());
    }
}

/// Moves the caller's value into the slot.
pub(crate) struct MoveConstruct<T> {
    value: Option<T>,
}

impl<T> MoveConstruct<T> {
    pub fn new(value: T) -> Self {
        Self { value: Some(value) }
    }
}

impl<T> QueueFunctor for MoveConstruct<T> {
    unsafe fn operate(&mut self, slot: *mut u8) {
        let Some(value) = self.value.take() else {
            unreachable!("move functor invoked twice");
        };
        slot.cast::<T>().write(value);
    }
}

/// Constructs the element in place from the held constructor arguments.
pub(crate) struct EmplaceConstruct<T, F: FnOnce() -> T> {
    ctor: Option<F>,
    _t: PhantomData<fn() -> T>,
}

impl<T, F: FnOnce() -> T> EmplaceConstruct<T, F> {
    pub fn new(ctor: F) -> Self {
        Self {
            ctor: Some(ctor),
            _t: PhantomData,
        }
    }
}

impl<T, F: FnOnce() -> T> QueueFunctor for EmplaceConstruct<T, F> {
    unsafe fn operate(&mut self, slot: *mut u8) {
        let Some(ctor) = self.ctor.take() else {
            unreachable!("emplace functor invoked twice");
        };
        slot.cast::<T>().write(ctor());
    }
}

/// Exchanges the slot's element with the caller's destination object, then
/// destroys what is now in the slot.
pub(crate) struct SwapPop<'a, T> {
    pub value: &'a mut T,
}

impl<T> QueueFunctor for SwapPop<'_, T> {
    unsafe fn operate(&mut self, slot: *mut u8) {
        let slot = slot.cast::<T>();
        mem::swap(self.value, &mut *slot);
        ptr::drop_in_place(slot);
    }
}

/// Destroys the slot's element in place. Used when draining a typed queue on
/// drop, where no destination object exists.
pub(crate) struct DropPop<T> {
    _t: PhantomData<fn() -> T>,
}

impl<T> DropPop<T> {
    pub fn new() -> Self {
        Self { _t: PhantomData }
    }
}

impl<T> QueueFunctor for DropPop<T> {
    unsafe fn operate(&mut self, slot: *mut u8) {
        ptr::drop_in_place(slot.cast::<T>());
    }
}
