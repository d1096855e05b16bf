//! Utilities Module
//!
//! Common utilities used by the boundary layers.

pub mod logging;
