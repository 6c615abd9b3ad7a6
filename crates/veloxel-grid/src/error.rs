use std::time::Duration;

use thiserror::Error;

/// Why a grid-size change was not applied.
///
/// Every variant is non-fatal: controller state is left untouched and the
/// same request may succeed on a later cycle.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum Rejection {
    #[error("no grid sink registered")]
    Disabled,

    #[error("candidate size {candidate} above the configured maximum")]
    AboveMax { candidate: f64 },

    #[error("candidate size {candidate} below the configured minimum")]
    BelowMin { candidate: f64 },

    #[error("cooldown active for another {remaining:?}")]
    Cooldown { remaining: Duration },
}

/// Result type for grid-size operations.
pub type GridResult<T> = Result<T, Rejection>;
