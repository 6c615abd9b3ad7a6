/// Fixed-capacity windowed moving average.
///
/// Backs every rate estimate in this crate. Samples enter a ring buffer and
/// the sum is maintained incrementally (subtract the evicted sample, add the
/// new one); once per full traversal of the buffer the sum is recomputed from
/// the buffer contents, so floating-point drift never outlives one window.
#[derive(Clone, Debug)]
pub struct Smoother {
    samples: Vec<f64>,
    sum: f64,
    cursor: usize,
    filled: bool,
}

impl Smoother {
    /// Create a smoother over a window of `window` samples (clamped to 1).
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            samples: vec![0.0; window.max(1)],
            sum: 0.0,
            cursor: 0,
            filled: false,
        }
    }

    /// Push a sample, evicting the oldest, and return the current mean.
    ///
    /// The returned value is meaningful only once [`Smoother::available`]
    /// reports `true`.
    pub fn update(&mut self, value: f64) -> f64 {
        if self.cursor == 0 {
            // Full pass completed: resync the running sum with the buffer.
            self.samples[0] = value;
            self.sum = self.samples.iter().sum();
        } else {
            self.sum -= self.samples[self.cursor];
            self.samples[self.cursor] = value;
            self.sum += value;
        }
        self.cursor += 1;
        if self.cursor == self.samples.len() {
            self.cursor = 0;
            self.filled = true;
        }
        self.mean()
    }

    /// Whether a full window of samples has been observed. Latches `true`
    /// permanently after the first wrap.
    #[must_use]
    pub fn available(&self) -> bool {
        self.filled
    }

    /// Current mean without consuming a sample, `None` until a full window
    /// has been observed.
    #[must_use]
    pub fn get(&self) -> Option<f64> {
        self.available().then(|| self.mean())
    }

    /// Window capacity.
    #[must_use]
    pub fn window(&self) -> usize {
        self.samples.len()
    }

    #[expect(clippy::cast_precision_loss)] // window sizes are far below 2^52
    fn mean(&self) -> f64 {
        self.sum / self.samples.len() as f64
    }
}
