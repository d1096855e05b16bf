//! Transaction Module
//!
//! Builds, serializes and signs Massa transfer operations.

mod builder;
mod signer;

pub use builder::*;
pub use signer::*;
