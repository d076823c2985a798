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
    error::{code, Error},
    support::is_aligned,
};
use alloc::alloc::{alloc, dealloc};
use core::{alloc::Layout, ptr::NonNull};

/// Owning handle for a queue's raw slot buffer. The dynamic constructor
/// releases the heap allocation on drop; the borrowed constructor releases
/// nothing, for buffers whose storage outlives the queue.
pub(crate) struct QueueStorage {
    ptr: NonNull<u8>,
    layout: Layout,
    owned: bool,
}

// The buffer is exclusively owned by the queue holding this handle.
unsafe impl Send for QueueStorage {}

impl QueueStorage {
    pub fn dynamic(layout: Layout) -> Result<Self, Error> {
        if layout.size() == 0 {
            // SAFETY: any alignment is a valid non-null address for a
            // zero-sized buffer.
            let ptr = unsafe { NonNull::new_unchecked(layout.align() as *mut u8) };
            return Ok(Self {
                ptr,
                layout,
                owned: false,
            });
        }
        // SAFETY: layout has non-zero size.
        let raw = unsafe { alloc(layout) };
        let Some(ptr) = NonNull::new(raw) else {
            return Err(code::ENOMEM);
        };
        Ok(Self {
            ptr,
            layout,
            owned: true,
        })
    }

    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `layout` for the lifetime
    /// of the returned storage, with no other users of the buffer.
    pub unsafe fn from_raw(ptr: NonNull<u8>, layout: Layout) -> Self {
        debug_assert!(is_aligned(ptr.as_ptr() as usize, layout.align()));
        Self {
            ptr,
            layout,
            owned: false,
        }
    }

    #[inline]
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }
}

impl Drop for QueueStorage {
    fn drop(&mut self) {
        if self.owned {
            // SAFETY: allocated in dynamic() with this exact layout.
            unsafe { dealloc(self.ptr.as_ptr(), self.layout) };
        }
    }
}
