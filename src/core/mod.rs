//! Core types for the evaluation engine
//!
//! This module contains the fundamental types:
//! - `MathScalar` - generic floating-point scalar bound
//! - `EvalError` - error taxonomy
//! - `Policy` / `OverflowBehavior` - per-call numeric configuration
//! - `Scaled` - the `mantissa * exp(log_scale)` value convention

pub(crate) mod error; // Error types (EvalError)
pub(crate) mod policy; // Policy, Scaled, renormalization helpers
pub(crate) mod traits; // MathScalar scalar bound

// Public re-exports (for external API)
pub use error::EvalError;
pub use policy::{OverflowBehavior, Policy, Scaled};
pub use traits::MathScalar;
