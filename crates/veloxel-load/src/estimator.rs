use std::time::Duration;

use tracing::debug;

use super::{LoadOptions, LoadStatus, PredictOutcome, Prediction, Smoother};

/// Closed-loop admission controller for a fixed-budget processing cycle.
///
/// Learns the per-kilopoint processing cost from recent cycles, predicts the
/// next cycle's duration, and recommends a downsample coefficient that brings
/// the prediction back under budget. With grid context supplied, predictions
/// additionally carry upscale/downscale advisories for a resolution
/// controller; acting on them is the caller's job.
pub struct LoadEstimator {
    opts: LoadOptions,
    rate: Smoother,
    time: Option<Smoother>,
    interval: Option<Smoother>,
    status: LoadStatus,
}

impl LoadEstimator {
    #[must_use]
    pub fn new(opts: LoadOptions) -> Self {
        let rate = Smoother::new(opts.rate_window);
        let time = opts.time_window.map(Smoother::new);
        let interval = opts.interval_window.map(Smoother::new);
        Self {
            opts,
            rate,
            time,
            interval,
            status: LoadStatus::default(),
        }
    }

    /// Feed one completed cycle: batch size and its measured processing time.
    ///
    /// Normalizes the elapsed time to milliseconds per 1000 points before it
    /// enters the rate window. Empty batches carry no rate information and
    /// are skipped.
    pub fn update_ratio(&mut self, point_count: u32, elapsed: Duration) {
        if point_count == 0 {
            debug!("update_ratio: skipping empty batch");
            return;
        }
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        let ms_per_kpts = elapsed_ms / (f64::from(point_count) / 1000.0);
        self.rate.update(ms_per_kpts);
    }

    /// Feed one measured inter-cycle interval, in ms.
    ///
    /// Counts the cycle as compliant (0) when the measurement falls within
    /// the tolerance band around the interval budget, as a miss (1)
    /// otherwise. The smoothed value is the running out-of-tolerance
    /// fraction. No-op when interval tracking is disabled.
    pub fn update_interval(&mut self, measured_ms: f64) {
        let Some(interval) = self.interval.as_mut() else {
            return;
        };
        let miss = (measured_ms - self.opts.interval_ms).abs() > self.opts.interval_tolerance_ms;
        interval.update(if miss { 1.0 } else { 0.0 });
    }

    /// Admission decision for the next batch, without grid advisories.
    pub fn predict(&mut self, point_count: u32) -> Prediction {
        self.predict_inner(point_count, None)
    }

    /// Admission decision plus grid advisories for the current resolution.
    pub fn predict_with_grid(
        &mut self,
        point_count: u32,
        grid_size: f64,
        grid_step: f64,
    ) -> Prediction {
        self.predict_inner(point_count, Some((grid_size, grid_step)))
    }

    /// Last prediction snapshot. Overwritten wholly on each predict call.
    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    fn predict_inner(&mut self, point_count: u32, grid: Option<(f64, f64)>) -> Prediction {
        self.status = LoadStatus::default();

        let Some(rate) = self.rate.get() else {
            debug!(point_count, "predict: rate window not filled yet");
            return self.finish(PredictOutcome::InsufficientHistory);
        };

        let points = f64::from(point_count);
        let predicted = rate * points / 1000.0;
        // Stabilize the raw prediction against transient spikes; fall back to
        // the unsmoothed value until the secondary window fills.
        let raw = match self.time.as_mut() {
            Some(sm) => {
                sm.update(predicted);
                sm.get().unwrap_or(predicted)
            }
            None => predicted,
        };

        self.status.rate_ms_per_kpts = rate;
        self.status.predicted_ms_raw = raw;
        if let Some(sm) = &self.interval {
            self.status.out_of_tolerance_ratio = sm.get().unwrap_or(0.0);
        }
        if let Some((grid_size, grid_step)) = grid {
            self.advise(raw, grid_size, grid_step);
        }

        let available_ms = self.opts.interval_ms - self.opts.target_slack_ms;
        let max_points = available_ms / rate * 1000.0;
        let excess = points - max_points;
        if excess <= 0.0 {
            self.status.predicted_ms_controlled = raw;
            self.status.optimal_points = point_count;
            debug!(point_count, raw_ms = raw, "predict: within budget");
            return self.finish(PredictOutcome::WithinBudget);
        }

        let mut coef = (points - excess) / points * 100.0;
        let limited = coef < self.opts.min_downsample_coef;
        if limited {
            coef = self.opts.min_downsample_coef;
        }
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        // coef is clamped to [floor, 100], so the product stays in range
        let optimal = (points * coef / 100.0) as u32;
        self.status.downsample_coef = coef;
        self.status.downsample_limited = limited;
        self.status.optimal_points = optimal;
        self.status.predicted_ms_controlled = rate * f64::from(optimal) / 1000.0;
        debug!(
            point_count,
            optimal,
            coef,
            limited,
            controlled_ms = self.status.predicted_ms_controlled,
            "predict: downsize required"
        );
        self.finish(PredictOutcome::DownsizeRequired)
    }

    fn advise(&mut self, raw: f64, grid_size: f64, grid_step: f64) {
        let o = &self.opts;
        let up = raw * (o.grid_cost_a * (grid_size - grid_step / 2.0) + o.grid_cost_b);
        let down = raw / (o.grid_cost_a * (grid_size + grid_step / 2.0) + o.grid_cost_b);
        self.status.projected_ms_upscale = up;
        self.status.projected_ms_downscale = down;
        self.status.upscale_advised = raw < o.lower_bound_ms && up < o.upper_bound_ms;
        self.status.downscale_advised = self.status.out_of_tolerance_ratio > o.sanity_threshold
            || (raw > o.upper_bound_ms && down > o.lower_bound_ms);
    }

    fn finish(&self, outcome: PredictOutcome) -> Prediction {
        Prediction {
            outcome,
            status: self.status,
        }
    }
}
