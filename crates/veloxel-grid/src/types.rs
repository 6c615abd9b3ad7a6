use std::time::Duration;

/// Configuration for [`GridController`](crate::GridController).
#[derive(Clone, Debug)]
pub struct GridOptions {
    /// Coarsest (largest) grid size; also the reset target.
    pub max_size: f64,
    /// Finest (smallest) grid size.
    pub min_size: f64,
    /// Per-change size increment.
    pub step: f64,
    /// Minimum time between successful size changes.
    pub cooldown: Duration,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            max_size: 2.0,
            min_size: 0.4,
            step: 0.1,
            cooldown: Duration::from_secs(3),
        }
    }
}
