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
    sync::Semaphore,
    time::{TickClock, TickDuration},
};

#[test]
fn test_wait_blocks_until_posted() {
    let semaphore = Arc::new(Semaphore::new(0, 1));
    let poster = Arc::clone(&semaphore);

    let start = Instant::now();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(30));
        poster.post().unwrap();
    });

    semaphore.wait().unwrap();
    assert!(start.elapsed() >= Duration::from_millis(20));
    assert_eq!(semaphore.value(), 0);
    handle.join().unwrap();
}

#[test]
fn test_posts_wake_every_waiter() {
    let semaphore = Arc::new(Semaphore::new(0, 4));

    let waiters: Vec<_> = (0..3)
        .map(|_| {
            let semaphore = Arc::clone(&semaphore);
            thread::spawn(move || semaphore.wait())
        })
        .collect();

    thread::sleep(Duration::from_millis(20));
    for _ in 0..3 {
        semaphore.post().unwrap();
    }
    for waiter in waiters {
        assert!(waiter.join().unwrap().is_ok());
    }
    assert_eq!(semaphore.value(), 0);
}

#[test]
fn test_timed_wait_succeeds_when_posted_in_time() {
    let semaphore = Arc::new(Semaphore::new(0, 1));
    let poster = Arc::clone(&semaphore);

    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        poster.post().unwrap();
    });

    let result = semaphore.try_wait_for(TickDuration::from_millis(500));
    assert!(result.is_ok());
    handle.join().unwrap();
}

#[test]
fn test_timed_wait_expiry_takes_about_the_requested_time() {
    let semaphore = Semaphore::new(0, 1);

    let start = Instant::now();
    let result = semaphore.try_wait_for(TickDuration::from_millis(25));
    let elapsed = start.elapsed();

    assert_eq!(result, Err(code::ETIMEDOUT));
    assert!(elapsed >= Duration::from_millis(20), "returned after {elapsed:?}");
    assert!(elapsed < Duration::from_millis(500), "returned after {elapsed:?}");
}

#[test]
fn test_wait_until_deadline_in_the_past() {
    let semaphore = Semaphore::new(0, 1);
    let past = TickClock::now();
    assert_eq!(semaphore.try_wait_until(past), Err(code::ETIMEDOUT));
}
