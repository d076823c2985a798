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

use std::{sync::Arc, thread, time::Duration, time::Instant};
use teal_kernel::{
    error::code,
    sync::queue::DynamicRawFifoQueue,
    time::{TickClock, TickDuration},
};

#[test]
fn test_timed_pop_expires_then_succeeds() {
    let queue = Arc::new(DynamicRawFifoQueue::new(4, 4).unwrap());

    let start = Instant::now();
    let mut buffer = [0u8; 4];
    let result = queue.try_pop_for(TickDuration::from_millis(10), &mut buffer);
    let elapsed = start.elapsed();

    assert_eq!(result, Err(code::ETIMEDOUT));
    assert!(elapsed >= Duration::from_millis(8), "returned after {elapsed:?}");
    assert!(elapsed < Duration::from_millis(500), "returned after {elapsed:?}");

    queue.try_push(&42u32.to_ne_bytes()).unwrap();
    queue
        .try_pop_for(TickDuration::from_millis(10), &mut buffer)
        .unwrap();
    assert_eq!(u32::from_ne_bytes(buffer), 42);
}

#[test]
fn test_timed_pop_wakes_on_concurrent_push() {
    let queue = Arc::new(DynamicRawFifoQueue::new(4, 4).unwrap());
    let producer_queue = Arc::clone(&queue);

    let producer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        producer_queue.try_push(&7u32.to_ne_bytes()).unwrap();
    });

    let mut buffer = [0u8; 4];
    queue
        .try_pop_for(TickDuration::from_millis(500), &mut buffer)
        .unwrap();
    assert_eq!(u32::from_ne_bytes(buffer), 7);
    producer.join().unwrap();
}

#[test]
fn test_zero_duration_behaves_like_try() {
    let queue = DynamicRawFifoQueue::new(4, 1).unwrap();
    let mut buffer = [0u8; 4];

    let start = Instant::now();
    assert_eq!(
        queue.try_pop_for(TickDuration::ZERO, &mut buffer),
        Err(code::ETIMEDOUT)
    );
    assert!(start.elapsed() < Duration::from_millis(100));

    queue.try_push(&1u32.to_ne_bytes()).unwrap();
    let start = Instant::now();
    assert_eq!(
        queue.try_push_for(TickDuration::ZERO, &2u32.to_ne_bytes()),
        Err(code::ETIMEDOUT)
    );
    assert!(start.elapsed() < Duration::from_millis(100));
}

#[test]
fn test_past_deadline_behaves_like_try() {
    let queue = DynamicRawFifoQueue::new(4, 1).unwrap();
    let mut buffer = [0u8; 4];
    let past = TickClock::now();

    assert_eq!(
        queue.try_pop_until(past, &mut buffer),
        Err(code::ETIMEDOUT)
    );

    queue.try_push(&3u32.to_ne_bytes()).unwrap();
    // an expired deadline still takes an immediately available element
    queue.try_pop_until(past, &mut buffer).unwrap();
    assert_eq!(u32::from_ne_bytes(buffer), 3);
}

#[test]
fn test_failed_timed_waits_leave_semaphores_alone() {
    let queue = DynamicRawFifoQueue::new(4, 2).unwrap();
    let mut buffer = [0u8; 4];

    // failed pops must not free phantom slots
    for _ in 0..3 {
        assert_eq!(
            queue.try_pop_for(TickDuration::ZERO, &mut buffer),
            Err(code::ETIMEDOUT)
        );
    }
    queue.try_push(&1u32.to_ne_bytes()).unwrap();
    queue.try_push(&2u32.to_ne_bytes()).unwrap();
    assert_eq!(queue.try_push(&3u32.to_ne_bytes()), Err(code::EAGAIN));

    // failed pushes must not conjure phantom elements
    for _ in 0..3 {
        assert_eq!(
            queue.try_push_for(TickDuration::ZERO, &4u32.to_ne_bytes()),
            Err(code::ETIMEDOUT)
        );
    }
    queue.try_pop(&mut buffer).unwrap();
    assert_eq!(u32::from_ne_bytes(buffer), 1);
    queue.try_pop(&mut buffer).unwrap();
    assert_eq!(u32::from_ne_bytes(buffer), 2);
    assert_eq!(queue.try_pop(&mut buffer), Err(code::EAGAIN));
}
