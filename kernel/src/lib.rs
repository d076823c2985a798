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

//! Kernel support library centered on the blocking synchronization queues:
//! a counting semaphore paired per queue, a FIFO ring, a priority-ordered
//! message queue, and raw/typed facades over both.

#![cfg_attr(not(test), no_std)]

pub extern crate alloc;

#[cfg(not(target_os = "none"))]
extern crate std;

pub use teal_arch as arch;

pub mod config;
pub mod error;
#[cfg(not(target_os = "none"))]
pub mod logger;
pub mod support;
pub mod sync;
pub mod time;
