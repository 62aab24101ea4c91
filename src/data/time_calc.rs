use std::time::Duration;

/// Running totals of post-processing time.
#[derive(Debug, Default, Clone)]
pub struct TimeCalc {
    n: usize,
    total: Duration,
    max: Duration,
}

impl TimeCalc {
    pub fn push(&mut self, x: Duration) {
        self.n += 1;
        self.total += x;
        self.max = self.max.max(x);
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn avg(&self) -> Duration {
        if self.n == 0 {
            return Duration::ZERO;
        }
        self.total / self.n as u32
    }
}
