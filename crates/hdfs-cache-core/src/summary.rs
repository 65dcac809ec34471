use std::fmt;
use std::time::Duration;

use crate::pool::PoolStatus;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub cached: usize,
    pub elapsed: Duration,
    pub pool: PoolStatus,
}

impl RunSummary {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time taken to cache {}={} ms", self.cached, self.elapsed_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_count_and_elapsed() {
        let summary = RunSummary {
            cached: 5,
            elapsed: Duration::from_micros(1_234_900),
            pool: PoolStatus::Existing,
        };
        assert_eq!(summary.to_string(), "Time taken to cache 5=1234 ms");
    }
}
