//! # Engine Module
//!
//! Configuration values and progress reporting shared by the reader, the writer
//! and the workflows built on top of them.

pub mod config;
pub mod progress;
