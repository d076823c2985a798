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

use core::{ffi::CStr, num::TryFromIntError};

pub mod code {
    pub const EAGAIN: super::Error = super::Error(-libc::EAGAIN);
    pub const ETIMEDOUT: super::Error = super::Error(-libc::ETIMEDOUT);
    pub const EMSGSIZE: super::Error = super::Error(-libc::EMSGSIZE);
    pub const EINTR: super::Error = super::Error(-libc::EINTR);
    pub const EINVAL: super::Error = super::Error(-libc::EINVAL);
    pub const ENOMEM: super::Error = super::Error(-libc::ENOMEM);
    pub const EOVERFLOW: super::Error = super::Error(-libc::EOVERFLOW);
}

const UNKNOWN_STR: &CStr = c"Unknown error";
const EAGAIN_STR: &CStr = c"Try again";
const ETIMEDOUT_STR: &CStr = c"Timed out";
const EMSGSIZE_STR: &CStr = c"Message too long";
const EINTR_STR: &CStr = c"Interrupted system call";
const EINVAL_STR: &CStr = c"Invalid argument";
const ENOMEM_STR: &CStr = c"Cannot allocate memory";
const EOVERFLOW_STR: &CStr = c"Value too large to be stored in data type";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Error(i32);

impl Error {
    pub fn from_errno(errno: i32) -> Error {
        Error(errno)
    }

    pub fn to_errno(self) -> i32 {
        self.0
    }

    pub fn name(&self) -> &'static CStr {
        match self {
            &code::EAGAIN => EAGAIN_STR,
            &code::ETIMEDOUT => ETIMEDOUT_STR,
            &code::EMSGSIZE => EMSGSIZE_STR,
            &code::EINTR => EINTR_STR,
            &code::EINVAL => EINVAL_STR,
            &code::ENOMEM => ENOMEM_STR,
            &code::EOVERFLOW => EOVERFLOW_STR,
            _ => UNKNOWN_STR,
        }
    }
}

impl From<TryFromIntError> for Error {
    fn from(_: TryFromIntError) -> Error {
        code::EINVAL
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let err_msg = self.name().to_str().unwrap_or("Unknown error");
        write!(f, "Error({}): {}", self.0, err_msg)
    }
}
