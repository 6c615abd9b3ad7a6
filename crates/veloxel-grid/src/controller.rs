use std::time::Instant;

#[cfg(test)]
use mockall::automock;
use tracing::debug;

use crate::{GridOptions, GridResult, Rejection};

/// Applies a newly decided grid size to the real filtering stage.
///
/// The controller depends on this capability, not on any concrete filter
/// implementation. Closures taking an `f64` implement it directly.
#[cfg_attr(test, automock)]
pub trait GridSink {
    fn apply(&mut self, size: f64);
}

impl<F: FnMut(f64)> GridSink for F {
    fn apply(&mut self, size: f64) {
        self(size);
    }
}

/// Discrete, rate-limited spatial-resolution controller.
///
/// Disabled until a [`GridSink`] is registered; registration resets the grid
/// to the coarsest configured size. Size changes move one step at a time,
/// respect the configured bounds, and are throttled by a cooldown so the
/// resolution cannot oscillate cycle-to-cycle. All rejections are non-fatal
/// and the same request may be retried on a later cycle.
///
/// Time is supplied by the caller, which keeps cooldown behavior
/// deterministic under test.
pub struct GridController<S: GridSink> {
    opts: GridOptions,
    size: f64,
    last_change: Option<Instant>,
    sink: Option<S>,
}

impl<S: GridSink> GridController<S> {
    #[must_use]
    pub fn new(opts: GridOptions) -> Self {
        let size = opts.max_size;
        Self {
            opts,
            size,
            last_change: None,
            sink: None,
        }
    }

    /// Bind the sink that applies sizes to the filtering stage.
    ///
    /// Enables the controller, resets the grid to the coarsest configured
    /// size and issues it through the sink. Any pending cooldown is cleared.
    pub fn register(&mut self, sink: S) {
        self.sink = Some(sink);
        self.reset_inner();
        debug!(size = self.size, "grid controller enabled");
    }

    /// Back to the coarsest configured size.
    pub fn reset(&mut self) -> GridResult<f64> {
        if self.sink.is_none() {
            return Err(Rejection::Disabled);
        }
        self.reset_inner();
        debug!(size = self.size, "grid reset");
        Ok(self.size)
    }

    /// Refine: one step towards the finest size.
    pub fn scale_up(&mut self, now: Instant) -> GridResult<f64> {
        self.apply_candidate(round1(self.size - self.opts.step), now)
    }

    /// Coarsen: one step towards the coarsest size.
    pub fn scale_down(&mut self, now: Instant) -> GridResult<f64> {
        self.apply_candidate(round1(self.size + self.opts.step), now)
    }

    /// Current grid size.
    #[must_use]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Whether a sink has been registered.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.sink.is_some()
    }

    fn reset_inner(&mut self) {
        self.size = self.opts.max_size;
        self.last_change = None;
        if let Some(sink) = self.sink.as_mut() {
            sink.apply(self.size);
        }
    }

    fn apply_candidate(&mut self, candidate: f64, now: Instant) -> GridResult<f64> {
        let Some(sink) = self.sink.as_mut() else {
            return Err(Rejection::Disabled);
        };
        if candidate > self.opts.max_size {
            debug!(candidate, max = self.opts.max_size, "grid change rejected: above max");
            return Err(Rejection::AboveMax { candidate });
        }
        if candidate < self.opts.min_size {
            debug!(candidate, min = self.opts.min_size, "grid change rejected: below min");
            return Err(Rejection::BelowMin { candidate });
        }
        if let Some(last) = self.last_change {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.opts.cooldown {
                let remaining = self.opts.cooldown - elapsed;
                debug!(candidate, ?remaining, "grid change rejected: cooldown");
                return Err(Rejection::Cooldown { remaining });
            }
        }

        sink.apply(candidate);
        self.size = candidate;
        self.last_change = Some(now);
        debug!(size = candidate, "grid size applied");
        Ok(candidate)
    }
}

/// Round to one decimal place; grid sizes are discretized at 0.1.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc, time::Duration};

    use mockall::predicate::eq;

    use super::*;

    fn options() -> GridOptions {
        GridOptions {
            max_size: 1.0,
            min_size: 0.4,
            step: 0.2,
            cooldown: Duration::from_secs(3),
        }
    }

    /// Controller with a recording closure sink; returns the applied sizes.
    fn recording() -> (GridController<impl GridSink>, Rc<RefCell<Vec<f64>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink_log = Rc::clone(&log);
        let mut grid = GridController::new(options());
        grid.register(move |size: f64| sink_log.borrow_mut().push(size));
        (grid, log)
    }

    #[test]
    fn starts_disabled_and_rejects_everything() {
        let mut grid: GridController<fn(f64)> = GridController::new(options());
        assert!(!grid.enabled());
        assert_eq!(grid.size(), 1.0);
        assert_eq!(grid.scale_up(Instant::now()), Err(Rejection::Disabled));
        assert_eq!(grid.scale_down(Instant::now()), Err(Rejection::Disabled));
        assert_eq!(grid.reset(), Err(Rejection::Disabled));
        assert_eq!(grid.size(), 1.0);
    }

    #[test]
    fn register_enables_and_issues_the_maximum() {
        let mut sink = MockGridSink::new();
        sink.expect_apply().with(eq(1.0)).times(1).return_const(());

        let mut grid = GridController::new(options());
        grid.register(sink);
        assert!(grid.enabled());
        assert_eq!(grid.size(), 1.0);
    }

    #[test]
    fn scale_up_refines_one_step() {
        let (mut grid, log) = recording();
        let t0 = Instant::now();
        assert_eq!(grid.scale_up(t0), Ok(0.8));
        assert_eq!(grid.size(), 0.8);
        assert_eq!(*log.borrow(), vec![1.0, 0.8]);
    }

    #[test]
    fn scale_down_above_max_fails_and_leaves_size_unchanged() {
        let (mut grid, log) = recording();
        let t0 = Instant::now();
        assert_eq!(
            grid.scale_down(t0),
            Err(Rejection::AboveMax { candidate: 1.2 })
        );
        assert_eq!(grid.size(), 1.0);
        assert_eq!(log.borrow().len(), 1); // only the register reset
    }

    #[test]
    fn scale_up_below_min_fails_and_leaves_size_unchanged() {
        let opts = GridOptions {
            cooldown: Duration::ZERO,
            ..options()
        };
        let mut grid = GridController::new(opts);
        grid.register(|_size: f64| {});
        let t0 = Instant::now();

        assert_eq!(grid.scale_up(t0), Ok(0.8));
        assert_eq!(grid.scale_up(t0), Ok(0.6));
        assert_eq!(grid.scale_up(t0), Ok(0.4));
        assert_eq!(
            grid.scale_up(t0),
            Err(Rejection::BelowMin { candidate: 0.2 })
        );
        assert_eq!(grid.size(), 0.4);
    }

    #[test]
    fn cooldown_blocks_until_elapsed() {
        let (mut grid, _log) = recording();
        let t0 = Instant::now();

        assert_eq!(grid.scale_up(t0), Ok(0.8));

        let blocked = grid.scale_up(t0 + Duration::from_secs(1));
        assert_eq!(
            blocked,
            Err(Rejection::Cooldown {
                remaining: Duration::from_secs(2)
            })
        );
        assert_eq!(grid.size(), 0.8);

        // Exactly at the cooldown boundary the change goes through.
        assert_eq!(grid.scale_up(t0 + Duration::from_secs(3)), Ok(0.6));
    }

    #[test]
    fn reset_returns_to_max_and_clears_the_cooldown() {
        let (mut grid, log) = recording();
        let t0 = Instant::now();

        grid.scale_up(t0).unwrap();
        assert_eq!(grid.reset(), Ok(1.0));
        assert_eq!(grid.size(), 1.0);

        // The reset cleared the cooldown; the next change needs no waiting.
        assert_eq!(grid.scale_up(t0), Ok(0.8));
        assert_eq!(*log.borrow(), vec![1.0, 0.8, 1.0, 0.8]);
    }

    #[test]
    fn candidates_are_rounded_to_one_decimal() {
        let opts = GridOptions {
            step: 0.25,
            ..options()
        };
        let mut grid = GridController::new(opts);
        grid.register(|_size: f64| {});

        // 1.0 - 0.25 rounds up to 0.8 at one-decimal resolution.
        assert_eq!(grid.scale_up(Instant::now()), Ok(0.8));
    }

    #[test]
    fn sink_fires_once_per_success_and_never_on_rejection() {
        let mut sink = MockGridSink::new();
        sink.expect_apply().with(eq(1.0)).times(1).return_const(());
        sink.expect_apply().with(eq(0.8)).times(1).return_const(());

        let mut grid = GridController::new(options());
        grid.register(sink);
        let t0 = Instant::now();

        assert_eq!(grid.scale_up(t0), Ok(0.8));
        // Cooldown rejections: the mock would panic on an unexpected apply.
        assert!(grid.scale_up(t0).is_err());
        assert!(matches!(
            grid.scale_down(t0 + Duration::from_secs(1)),
            Err(Rejection::Cooldown { .. })
        ));
    }
}
