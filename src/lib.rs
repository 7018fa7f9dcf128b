// FFI functions perform null checks before dereferencing raw pointers.
// Clippy cannot verify this statically, so we allow it at crate level.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

//! C ABI over the Singlish → Sinhala engine, for embedding in host
//! applications (editors, web views, input method frontends).

mod ffi;
pub mod trace_init;

pub use ffi::*;
pub use singlish_core::{convert, Engine};
