//! Value runtime for the Aurora scripting language: the universal [`Value`]
//! type, operator dispatch across its variants, the native call convention,
//! and the fatal diagnostic channel.
//!
//! [`Value`]: runtime::Value

pub mod config;
pub mod diagnostics;
pub mod runtime;

pub use config::RuntimeConfig;
pub use diagnostics::Fatal;
pub use runtime::{Runtime, RuntimeError, RuntimeResult, Value};
