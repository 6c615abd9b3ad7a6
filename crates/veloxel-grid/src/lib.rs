//! Discrete, rate-limited grid-resolution control.
//!
//! The controller owns a single number: the spatial grid size of an upstream
//! voxel filter. It is fed advisory signals by the pipeline (typically from a
//! load estimator) and moves the size one step at a time through an injected
//! sink, with bounds and a cooldown guarding against oscillation.
//!
//! ## Features
//!
//! - **Injected sink**: the controller decides sizes; applying them is a
//!   capability supplied at registration (any `FnMut(f64)` works)
//! - **Hysteresis by cooldown**: successful changes start a cooldown window
//!   during which further changes are rejected
//! - **Typed rejections**: disabled, out-of-bounds and cooldown outcomes are
//!   distinct, non-fatal and retryable on a later cycle
//! - **Caller-supplied time**: cooldown checks take `Instant`s from the
//!   caller, so tests are deterministic
//!
//! ## Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//!
//! use veloxel_grid::{GridController, GridOptions};
//!
//! let mut grid = GridController::new(GridOptions {
//!     max_size: 1.0,
//!     min_size: 0.4,
//!     step: 0.2,
//!     cooldown: Duration::from_secs(0),
//! });
//!
//! // Registration enables the controller at the coarsest size.
//! grid.register(|size: f64| println!("voxel size -> {size}"));
//! assert_eq!(grid.size(), 1.0);
//!
//! // Refine one step.
//! let size = grid.scale_up(Instant::now()).expect("bounds and cooldown allow it");
//! assert_eq!(size, 0.8);
//! ```

#![forbid(unsafe_code)]

mod controller;
mod error;
mod types;

pub use controller::{GridController, GridSink};
pub use error::{GridResult, Rejection};
pub use types::GridOptions;
