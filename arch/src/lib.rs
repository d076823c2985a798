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

//! Architecture port: local interrupt masking, IRQ-context query and thread
//! parking. Bare-metal ARM targets use PRIMASK and wfe/sev; everything else
//! gets the hosted port so the kernel can be exercised on a development
//! machine.

#![cfg_attr(not(test), no_std)]

#[cfg(not(target_os = "none"))]
extern crate std;

cfg_if::cfg_if! {
    if #[cfg(all(target_arch = "arm", target_os = "none"))] {
        mod cortex_m_port;
        use cortex_m_port as port;
    } else if #[cfg(target_os = "none")] {
        compile_error!("no architecture port for this bare-metal target");
    } else {
        mod hosted;
        use hosted as port;
    }
}

pub use port::{
    current_cpu_id, current_thread, disable_local_irq_save, enable_local_irq_restore, is_in_irq,
    monotonic_now, park_current_thread, park_current_thread_timeout, ThreadHandle,
};
