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

//! Dynamic-storage adapters: allocate the slot arrays on the heap at
//! construction and forward everything else to the wrapped queue. The
//! storage handle deletes the buffer when the queue is dropped.

use super::{
    fifo_queue::FifoQueue,
    message_queue::MessageQueue,
    message_queue_base::{Entry, EntryStorage},
    raw_fifo_queue::RawFifoQueue,
    raw_message_queue::RawMessageQueue,
    storage::QueueStorage,
};
use crate::{
    config::ALIGN_SIZE,
    error::{code, Error},
    support::align_up_size,
};
use alloc::vec;
use core::{alloc::Layout, ops::Deref};

fn raw_layout(element_size: usize, capacity: usize) -> Result<Layout, Error> {
    if element_size == 0 || capacity == 0 {
        return Err(code::EINVAL);
    }
    let size = element_size.checked_mul(capacity).ok_or(code::EINVAL)?;
    Layout::from_size_align(align_up_size(size, ALIGN_SIZE), ALIGN_SIZE)
        .map_err(|_| code::EINVAL)
}

fn typed_layout<T>(capacity: usize) -> Result<Layout, Error> {
    if capacity == 0 {
        return Err(code::EINVAL);
    }
    Layout::array::<T>(capacity).map_err(|_| code::EINVAL)
}

fn entry_array(capacity: usize) -> Result<EntryStorage, Error> {
    u16::try_from(capacity)?;
    Ok(EntryStorage::Owned(
        vec![Entry::new(); capacity].into_boxed_slice(),
    ))
}

pub struct DynamicFifoQueue<T>(FifoQueue<T>);

impl<T> DynamicFifoQueue<T> {
    pub fn new(capacity: usize) -> Result<Self, Error> {
        let storage = QueueStorage::dynamic(typed_layout::<T>(capacity)?)?;
        Ok(Self(FifoQueue::with_storage(storage, capacity)))
    }
}

impl<T> Deref for DynamicFifoQueue<T> {
    type Target = FifoQueue<T>;

    fn deref(&self) -> &FifoQueue<T> {
        &self.0
    }
}

pub struct DynamicRawFifoQueue(RawFifoQueue);

impl DynamicRawFifoQueue {
    pub fn new(element_size: usize, capacity: usize) -> Result<Self, Error> {
        let storage = QueueStorage::dynamic(raw_layout(element_size, capacity)?)?;
        Ok(Self(RawFifoQueue::with_storage(
            storage,
            element_size,
            capacity,
        )))
    }
}

impl Deref for DynamicRawFifoQueue {
    type Target = RawFifoQueue;

    fn deref(&self) -> &RawFifoQueue {
        &self.0
    }
}

pub struct DynamicMessageQueue<T>(MessageQueue<T>);

impl<T> DynamicMessageQueue<T> {
    pub fn new(capacity: usize) -> Result<Self, Error> {
        let entries = entry_array(capacity)?;
        let values = QueueStorage::dynamic(typed_layout::<T>(capacity)?)?;
        Ok(Self(MessageQueue::with_storage(entries, values, capacity)))
    }
}

impl<T> Deref for DynamicMessageQueue<T> {
    type Target = MessageQueue<T>;

    fn deref(&self) -> &MessageQueue<T> {
        &self.0
    }
}

pub struct DynamicRawMessageQueue(RawMessageQueue);

impl DynamicRawMessageQueue {
    pub fn new(element_size: usize, capacity: usize) -> Result<Self, Error> {
        let entries = entry_array(capacity)?;
        let values = QueueStorage::dynamic(raw_layout(element_size, capacity)?)?;
        Ok(Self(RawMessageQueue::with_storage(
            entries,
            values,
            element_size,
            capacity,
        )))
    }
}

impl Deref for DynamicRawMessageQueue {
    type Target = RawMessageQueue;

    fn deref(&self) -> &RawMessageQueue {
        &self.0
    }
}
