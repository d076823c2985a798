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

/// System tick rate. The hosted port runs a 1 ms tick.
pub const TICKS_PER_SECOND: u64 = 1000;

/// Allocation alignment for raw queue slot buffers.
pub const ALIGN_SIZE: usize = core::mem::size_of::<usize>();
