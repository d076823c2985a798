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

use std::{sync::Arc, thread};
use teal_kernel::{
    error::code,
    sync::queue::{DynamicFifoQueue, DynamicRawFifoQueue},
};

fn push_u32(queue: &DynamicRawFifoQueue, value: u32) {
    queue.try_push(&value.to_ne_bytes()).unwrap();
}

fn pop_u32(queue: &DynamicRawFifoQueue) -> u32 {
    let mut buffer = [0u8; 4];
    queue.try_pop(&mut buffer).unwrap();
    u32::from_ne_bytes(buffer)
}

#[test]
fn test_raw_fifo_basic_order() {
    let queue = DynamicRawFifoQueue::new(4, 4).unwrap();
    assert_eq!(queue.capacity(), 4);
    assert_eq!(queue.element_size(), 4);

    push_u32(&queue, 0x11111111);
    push_u32(&queue, 0x22222222);
    push_u32(&queue, 0x33333333);

    assert_eq!(pop_u32(&queue), 0x11111111);
    assert_eq!(pop_u32(&queue), 0x22222222);
    assert_eq!(pop_u32(&queue), 0x33333333);

    let mut buffer = [0u8; 4];
    assert_eq!(queue.try_pop(&mut buffer), Err(code::EAGAIN));
}

#[test]
fn test_raw_fifo_full_then_drain() {
    let queue = DynamicRawFifoQueue::new(4, 4).unwrap();

    for value in [1u32, 2, 3, 4] {
        push_u32(&queue, value);
    }
    assert_eq!(queue.try_push(&0xdeadbeefu32.to_ne_bytes()), Err(code::EAGAIN));

    assert_eq!(pop_u32(&queue), 1);
    queue.try_push(&0xdeadbeefu32.to_ne_bytes()).unwrap();

    assert_eq!(pop_u32(&queue), 2);
    assert_eq!(pop_u32(&queue), 3);
    assert_eq!(pop_u32(&queue), 4);
    assert_eq!(pop_u32(&queue), 0xdeadbeef);
}

#[test]
fn test_raw_fifo_size_mismatch_leaves_queue_untouched() {
    let queue = DynamicRawFifoQueue::new(4, 4).unwrap();

    assert_eq!(queue.try_push(&[0u8; 3]), Err(code::EMSGSIZE));
    let mut short = [0u8; 3];
    assert_eq!(queue.try_pop(&mut short), Err(code::EMSGSIZE));

    // the failed calls consumed no slot: a full round of pushes still fits
    for value in 0..4u32 {
        push_u32(&queue, value);
    }
    assert_eq!(queue.try_push(&0u32.to_ne_bytes()), Err(code::EAGAIN));
    for value in 0..4u32 {
        assert_eq!(pop_u32(&queue), value);
    }
}

#[test]
fn test_raw_fifo_capacity_one_and_wraparound() {
    let queue = DynamicRawFifoQueue::new(4, 1).unwrap();

    for round in 0..10u32 {
        push_u32(&queue, round);
        assert_eq!(queue.try_push(&round.to_ne_bytes()), Err(code::EAGAIN));
        assert_eq!(pop_u32(&queue), round);
    }
}

#[test]
fn test_typed_fifo_move_round_trip() {
    let queue = DynamicFifoQueue::<String>::new(2).unwrap();

    queue.try_push(String::from("first")).unwrap();
    queue.try_push(String::from("second")).unwrap();

    let mut out = String::new();
    queue.try_pop(&mut out).unwrap();
    assert_eq!(out, "first");
    queue.try_pop(&mut out).unwrap();
    assert_eq!(out, "second");
    assert_eq!(queue.try_pop(&mut out), Err(code::EAGAIN));
}

#[test]
fn test_typed_fifo_clone_and_emplace() {
    let queue = DynamicFifoQueue::<Vec<u8>>::new(3).unwrap();

    let original = vec![1u8, 2, 3];
    queue.try_push_cloned(&original).unwrap();
    assert_eq!(original, [1, 2, 3]);

    queue.try_emplace(|| vec![4u8, 5]).unwrap();

    let mut out = Vec::new();
    queue.try_pop(&mut out).unwrap();
    assert_eq!(out, [1, 2, 3]);
    queue.try_pop(&mut out).unwrap();
    assert_eq!(out, [4, 5]);
}

#[test]
fn test_blocking_producer_consumer_preserves_order() {
    const COUNT: u32 = 2000;
    let queue = Arc::new(DynamicRawFifoQueue::new(4, 8).unwrap());
    let producer_queue = Arc::clone(&queue);

    let producer = thread::spawn(move || {
        for value in 0..COUNT {
            producer_queue.push(&value.to_ne_bytes()).unwrap();
        }
    });

    for expected in 0..COUNT {
        let mut buffer = [0u8; 4];
        queue.pop(&mut buffer).unwrap();
        assert_eq!(u32::from_ne_bytes(buffer), expected);
    }
    producer.join().unwrap();

    let mut buffer = [0u8; 4];
    assert_eq!(queue.try_pop(&mut buffer), Err(code::EAGAIN));
}

#[test]
fn test_two_producers_interleave_without_loss() {
    const PER_PRODUCER: u32 = 500;
    let queue = Arc::new(DynamicRawFifoQueue::new(4, 4).unwrap());

    let producers: Vec<_> = [0u32, 1]
        .into_iter()
        .map(|id| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    queue.push(&(id << 16 | i).to_ne_bytes()).unwrap();
                }
            })
        })
        .collect();

    let mut last_seen = [None::<u32>; 2];
    for _ in 0..2 * PER_PRODUCER {
        let mut buffer = [0u8; 4];
        queue.pop(&mut buffer).unwrap();
        let value = u32::from_ne_bytes(buffer);
        let (id, seq) = ((value >> 16) as usize, value & 0xffff);
        // each producer's own pushes arrive in order
        if let Some(previous) = last_seen[id] {
            assert!(seq > previous);
        }
        last_seen[id] = Some(seq);
    }
    assert_eq!(last_seen[0], Some(PER_PRODUCER - 1));
    assert_eq!(last_seen[1], Some(PER_PRODUCER - 1));
    for producer in producers {
        producer.join().unwrap();
    }
}
