use crate::shared::time::Duration;

/// Tuning knobs for a single search.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Minimum buffer between arriving and boarding a different line.
    pub min_transfer_time: Duration,
    /// How many departures after the current time the resolver looks at per neighbour.
    pub scan_window: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            min_transfer_time: Duration::from_minutes(2.0),
            scan_window: 10,
        }
    }
}

impl RouterConfig {
    pub fn with_min_transfer_time(mut self, duration: Duration) -> Self {
        self.min_transfer_time = duration;
        self
    }

    pub fn with_scan_window(mut self, window: usize) -> Self {
        self.scan_window = window;
        self
    }
}

#[test]
fn default_config() {
    let config = RouterConfig::default();
    assert_eq!(config.min_transfer_time, Duration::from_minutes(2.0));
    assert_eq!(config.scan_window, 10);
}
