//! Basic types and utilities shared across the crate.

pub mod display_ext;
