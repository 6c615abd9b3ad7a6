/// Outcome of a prediction call.
///
/// "Not enough history" and "fits the budget" used to share one failure code;
/// they are distinct here so callers never have to guess from status fields.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PredictOutcome {
    /// The rate window has not filled yet; no estimate exists.
    InsufficientHistory,
    /// The batch is predicted to fit the cycle budget as-is.
    WithinBudget,
    /// The batch must be downsampled to meet the cycle budget.
    DownsizeRequired,
}

/// Snapshot of the most recent prediction.
///
/// Overwritten wholly on every predict call and read-only between calls.
/// Fields are populated according to the returned [`PredictOutcome`]; on
/// `InsufficientHistory` only the neutral coefficient is meaningful.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadStatus {
    /// Smoothed processing rate, milliseconds per 1000 points.
    pub rate_ms_per_kpts: f64,
    /// Predicted cycle time without any downsampling, in ms.
    pub predicted_ms_raw: f64,
    /// Predicted cycle time after the recommended downsampling, in ms.
    pub predicted_ms_controlled: f64,
    /// Recommended number of points to retain.
    pub optimal_points: u32,
    /// Percentage of points to retain; 100 means no downsampling.
    pub downsample_coef: f64,
    /// True when the coefficient was clamped to the configured floor.
    pub downsample_limited: bool,
    /// Projected cycle time half a step finer, in ms.
    pub projected_ms_upscale: f64,
    /// Projected cycle time half a step coarser, in ms.
    pub projected_ms_downscale: f64,
    /// Smoothed fraction of recent cycles outside the interval tolerance.
    pub out_of_tolerance_ratio: f64,
    /// A finer grid is affordable within the comfort band.
    pub upscale_advised: bool,
    /// A coarser grid is needed to get back into the comfort band.
    pub downscale_advised: bool,
}

impl Default for LoadStatus {
    fn default() -> Self {
        Self {
            rate_ms_per_kpts: 0.0,
            predicted_ms_raw: 0.0,
            predicted_ms_controlled: 0.0,
            optimal_points: 0,
            downsample_coef: 100.0,
            downsample_limited: false,
            projected_ms_upscale: 0.0,
            projected_ms_downscale: 0.0,
            out_of_tolerance_ratio: 0.0,
            upscale_advised: false,
            downscale_advised: false,
        }
    }
}

/// Result of a prediction: outcome code plus the full status snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    pub outcome: PredictOutcome,
    pub status: LoadStatus,
}

/// Configuration for [`LoadEstimator`](crate::LoadEstimator).
///
/// Immutable after construction. Disabling both optional windows yields the
/// minimal admission controller: one rate smoother, no stabilization, no
/// interval tracking.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Rate smoother window, in samples.
    pub rate_window: usize,
    /// Window for smoothing the raw predicted time; `None` disables the
    /// secondary smoother.
    pub time_window: Option<usize>,
    /// Window for interval-compliance tracking; `None` disables it.
    pub interval_window: Option<usize>,
    /// Cycle interval budget, in ms.
    pub interval_ms: f64,
    /// Slack reserved out of the budget, in ms.
    pub target_slack_ms: f64,
    /// Floor for the downsample coefficient, in percent.
    pub min_downsample_coef: f64,
    /// Linear grid cost model: time multiplier = a * grid_size + b.
    pub grid_cost_a: f64,
    /// Constant term of the grid cost model.
    pub grid_cost_b: f64,
    /// Lower edge of the predicted-time comfort band, in ms.
    pub lower_bound_ms: f64,
    /// Upper edge of the predicted-time comfort band, in ms.
    pub upper_bound_ms: f64,
    /// Half-width of the interval compliance band, in ms.
    pub interval_tolerance_ms: f64,
    /// Out-of-tolerance fraction above which coarsening is advised.
    pub sanity_threshold: f64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            rate_window: 10,
            time_window: Some(5),
            interval_window: Some(50),
            interval_ms: 100.0,
            target_slack_ms: 10.0,
            min_downsample_coef: 30.0,
            grid_cost_a: 0.0,
            grid_cost_b: 1.0,
            lower_bound_ms: 60.0,
            upper_bound_ms: 90.0,
            interval_tolerance_ms: 10.0,
            sanity_threshold: 0.2,
        }
    }
}
