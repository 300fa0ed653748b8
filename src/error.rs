// src/error.rs
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors surfaced by leaderboard operations.
///
/// An unknown customer id on a neighbor query is not an error; it yields an
/// empty result.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RankError {
    /// Update delta outside the accepted band.
    #[error("delta {0} outside allowed range [-1000, 1000]")]
    OutOfRange(Decimal),

    /// Structurally invalid update or query argument.
    #[error("bad argument: {0}")]
    BadArgument(&'static str),
}
