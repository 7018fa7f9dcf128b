//! Incremental re-evaluation of a changing text buffer.
//!
//! [`Controller`] is a deterministic, caller-clocked debouncer suitable for
//! event loops and tests. [`ConversionWorker`] runs the same policy on a
//! background thread for hosts that must not convert on the input thread.
//! Both recompute the whole buffer from scratch and drop superseded work.

mod controller;
mod worker;

#[cfg(test)]
mod tests;

pub use controller::{Controller, ControllerState};
pub use worker::{ConversionWorker, WorkerError};

/// A finished conversion, tagged with the edit generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub generation: u64,
    pub text: String,
}
