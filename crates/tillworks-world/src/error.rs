//! Error types for the `tillworks-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`].

/// Errors that can occur while planning farm geometry.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in world calculation")]
    ArithmeticOverflow,
}
