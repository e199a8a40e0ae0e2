//! Request handlers.

pub mod sort;
