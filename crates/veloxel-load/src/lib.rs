//! Cycle-budget load prediction and admission control for point-cloud
//! pipelines.
//!
//! Learns the processing cost per kilopoint from recent cycles, predicts
//! whether the next batch will blow the cycle budget, and recommends a
//! downsample coefficient that brings the prediction back under it. A
//! companion scorer maps a three-axis spread measurement onto a bounded
//! quality score.
//!
//! ## Features
//!
//! - **Windowed smoothing**: every rate estimate rides on a fixed-capacity
//!   moving average, so one slow cycle cannot flip a decision
//! - **Distinct outcomes**: "not enough history" and "fits the budget" are
//!   separate result codes, never one overloaded failure
//! - **Grid advisories**: with grid context, predictions carry
//!   upscale/downscale signals for a resolution controller
//! - **Configurable**: secondary time smoothing and interval-compliance
//!   tracking can each be disabled to get the minimal controller
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use veloxel_load::{LoadEstimator, LoadOptions, PredictOutcome};
//!
//! let mut est = LoadEstimator::new(LoadOptions {
//!     rate_window: 3,
//!     interval_ms: 100.0,
//!     target_slack_ms: 0.0,
//!     ..LoadOptions::default()
//! });
//!
//! // Three observed cycles: 100k points in 50 ms each.
//! for _ in 0..3 {
//!     est.update_ratio(100_000, Duration::from_millis(50));
//! }
//!
//! // 400k points would take ~200 ms; half of them fit the budget.
//! let p = est.predict(400_000);
//! assert_eq!(p.outcome, PredictOutcome::DownsizeRequired);
//! assert!(p.status.downsample_coef < 100.0);
//! ```

#![forbid(unsafe_code)]

mod estimator;
mod quality;
mod smoother;
mod types;

pub use estimator::LoadEstimator;
pub use quality::QualityEstimator;
pub use smoother::Smoother;
pub use types::{LoadOptions, LoadStatus, PredictOutcome, Prediction};
