/// Receives batch progress as `completed` out of `total`.
///
/// Calls arrive in order with `completed` strictly increasing from 1 to `total`.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, completed: usize, total: usize);

    /// Called once when the batch is done, regardless of outcome.
    fn finish(&self) {}
}

/// Discards progress updates.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _completed: usize, _total: usize) {}
}

/// Logs progress every `every` items and on the final item.
pub struct LogProgress {
    pub every: usize,
}

impl ProgressReporter for LogProgress {
    fn report(&self, completed: usize, total: usize) {
        if completed == total || (self.every > 0 && completed % self.every == 0) {
            tracing::info!(completed, total, "Backtest progress");
        }
    }
}
