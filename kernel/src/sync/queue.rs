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

//! Blocking queues built on a pair of counting semaphores: `push_semaphore`
//! counts free slots, `pop_semaphore` counts occupied ones, so producers and
//! consumers wake each other without polling. The cores know nothing about
//! the element type; facades pass type-erased functors that perform the
//! per-slot operation while a short critical section holds the slot address
//! stable.

mod dynamic;
mod fifo_queue;
mod fifo_queue_base;
mod functor;
mod message_queue;
mod message_queue_base;
mod raw_fifo_queue;
mod raw_message_queue;
mod storage;

pub use dynamic::{
    DynamicFifoQueue, DynamicMessageQueue, DynamicRawFifoQueue, DynamicRawMessageQueue,
};
pub use fifo_queue::FifoQueue;
pub use message_queue::MessageQueue;
pub use message_queue_base::Entry;
pub use raw_fifo_queue::RawFifoQueue;
pub use raw_message_queue::RawMessageQueue;
