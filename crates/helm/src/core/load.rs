use std::time::Duration;

/// Rolling measure of how much of the frame budget drawing takes.
/// The reading only changes once per full sample window.
pub struct LoadMeter {
    /// Frames per reading.
    window: u32,
    /// Time available per frame.
    budget: f64,
    /// Draw time accumulated in the current window.
    sum: f64,
    count: u32,
    load: f64,
}

impl LoadMeter {
    pub fn new(window: u32, frame_dt: f64) -> Self {
        Self {
            window: window.max(1),
            budget: frame_dt,
            sum: 0.0,
            count: 0,
            load: 0.0,
        }
    }

    /// Add one frame's draw time. Returns true when a new reading is ready.
    pub fn record(&mut self, elapsed: Duration) -> bool {
        self.sum += elapsed.as_secs_f64();
        self.count += 1;
        if self.count < self.window {
            return false;
        }
        self.load = self.sum / (f64::from(self.window) * self.budget);
        self.sum = 0.0;
        self.count = 0;
        true
    }

    /// Last reading, as a fraction of the frame budget.
    pub fn load(&self) -> f64 {
        self.load
    }

    pub fn label(&self) -> String {
        format!("{}% GPU", (self.load * 100.0).round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_updates_once_per_window() {
        let mut meter = LoadMeter::new(4, 0.01);
        for _ in 0..3 {
            assert!(!meter.record(Duration::from_millis(5)));
        }
        assert_eq!(meter.label(), "0% GPU");
        assert!(meter.record(Duration::from_millis(5)));
        assert_eq!(meter.label(), "50% GPU");
    }

    #[test]
    fn zero_window_is_treated_as_one() {
        let mut meter = LoadMeter::new(0, 0.01);
        assert!(meter.record(Duration::from_millis(10)));
        assert!((meter.load() - 1.0).abs() < 1e-9);
    }
}
