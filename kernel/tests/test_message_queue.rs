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

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use teal_kernel::{
    error::code,
    sync::queue::{DynamicMessageQueue, DynamicRawMessageQueue},
};

#[test]
fn test_priority_ordering_with_fifo_ties() {
    let queue = DynamicRawMessageQueue::new(1, 4).unwrap();

    queue.try_push(1, b"a").unwrap();
    queue.try_push(3, b"b").unwrap();
    queue.try_push(2, b"c").unwrap();
    queue.try_push(3, b"d").unwrap();

    let mut buffer = [0u8];
    assert_eq!(queue.try_pop(&mut buffer).unwrap(), 3);
    assert_eq!(&buffer, b"b");
    assert_eq!(queue.try_pop(&mut buffer).unwrap(), 3);
    assert_eq!(&buffer, b"d");
    assert_eq!(queue.try_pop(&mut buffer).unwrap(), 2);
    assert_eq!(&buffer, b"c");
    assert_eq!(queue.try_pop(&mut buffer).unwrap(), 1);
    assert_eq!(&buffer, b"a");
    assert_eq!(queue.try_pop(&mut buffer), Err(code::EAGAIN));
}

#[test]
fn test_equal_priorities_degenerate_to_fifo() {
    let queue = DynamicRawMessageQueue::new(4, 8).unwrap();

    for value in 0..8u32 {
        queue.try_push(5, &value.to_ne_bytes()).unwrap();
    }
    assert_eq!(queue.try_push(5, &9u32.to_ne_bytes()), Err(code::EAGAIN));

    for expected in 0..8u32 {
        let mut buffer = [0u8; 4];
        assert_eq!(queue.try_pop(&mut buffer).unwrap(), 5);
        assert_eq!(u32::from_ne_bytes(buffer), expected);
    }
}

#[test]
fn test_raw_message_queue_size_mismatch() {
    let queue = DynamicRawMessageQueue::new(4, 2).unwrap();

    assert_eq!(queue.try_push(0, &[1u8, 2]), Err(code::EMSGSIZE));
    let mut long = [0u8; 8];
    assert_eq!(queue.try_pop(&mut long), Err(code::EMSGSIZE));

    queue.try_push(0, &7u32.to_ne_bytes()).unwrap();
    queue.try_push(0, &8u32.to_ne_bytes()).unwrap();
    assert_eq!(queue.try_push(0, &9u32.to_ne_bytes()), Err(code::EAGAIN));
}

#[test]
fn test_typed_message_queue_push_pop_matrix() {
    let queue = DynamicMessageQueue::<String>::new(4).unwrap();

    queue.try_push(2, String::from("move")).unwrap();
    queue.try_push_cloned(9, &String::from("clone")).unwrap();
    queue.try_emplace(5, || String::from("emplace")).unwrap();

    let mut out = String::new();
    assert_eq!(queue.try_pop(&mut out).unwrap(), 9);
    assert_eq!(out, "clone");
    assert_eq!(queue.try_pop(&mut out).unwrap(), 5);
    assert_eq!(out, "emplace");
    assert_eq!(queue.try_pop(&mut out).unwrap(), 2);
    assert_eq!(out, "move");
}

/// Element whose drops are observable from the outside.
#[derive(Clone)]
struct Tracked {
    tag: u32,
    drops: Arc<AtomicUsize>,
}

impl Tracked {
    fn new(tag: u32, drops: &Arc<AtomicUsize>) -> Self {
        Self {
            tag,
            drops: Arc::clone(drops),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn test_swap_pop_destroys_previous_destination() {
    let drops = Arc::new(AtomicUsize::new(0));
    let queue = DynamicMessageQueue::<Tracked>::new(2).unwrap();

    queue.try_emplace(1, || Tracked::new(100, &drops)).unwrap();
    queue.try_push(2, Tracked::new(200, &drops)).unwrap();
    assert_eq!(drops.load(Ordering::Relaxed), 0);

    let mut out = Tracked::new(0, &drops);
    // the swap leaves the old destination in the slot, which is destroyed
    assert_eq!(queue.try_pop(&mut out).unwrap(), 2);
    assert_eq!(out.tag, 200);
    assert_eq!(drops.load(Ordering::Relaxed), 1);
    drop(out);
    assert_eq!(drops.load(Ordering::Relaxed), 2);

    // one element (tag 100) still queued; dropping the queue destroys it
    drop(queue);
    assert_eq!(drops.load(Ordering::Relaxed), 3);
}

#[test]
fn test_queue_drop_destroys_each_leftover_exactly_once() {
    let drops = Arc::new(AtomicUsize::new(0));
    let queue = teal_kernel::sync::queue::DynamicFifoQueue::<Tracked>::new(8).unwrap();
    for tag in 0..5 {
        queue.try_push(Tracked::new(tag, &drops)).unwrap();
    }
    assert_eq!(drops.load(Ordering::Relaxed), 0);

    drop(queue);
    assert_eq!(drops.load(Ordering::Relaxed), 5);
}
