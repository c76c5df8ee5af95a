// src/core/mod.rs

pub mod retry;
pub mod sanitize;

pub use retry::{Attempts, RetryPolicy};
