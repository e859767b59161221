//! Frame clock for the host loop
//!
//! Turns animation-frame timestamps (milliseconds) into simulation steps and
//! tracks whether the loop should keep requesting frames.

/// Longest step fed to the simulation (seconds)
pub const MAX_FRAME_DT: f32 = 0.1;
/// Step used for the first frame after a (re)start
pub const DEFAULT_FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    running: bool,
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start (or resume) the loop; returns false if it was already running
    pub fn play(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.last_time = None;
        true
    }

    /// Stop the loop; the next [`FrameClock::tick`] yields no step
    pub fn end(&mut self) {
        self.running = false;
    }

    /// Step length for a frame stamped `time_ms`, or `None` once stopped
    pub fn tick(&mut self, time_ms: f64) -> Option<f32> {
        if !self.running {
            return None;
        }
        let dt = match self.last_time {
            Some(last) => (((time_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => DEFAULT_FRAME_DT,
        };
        self.last_time = Some(time_ms);
        Some(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_clock_yields_nothing() {
        let mut clock = FrameClock::new();
        assert!(!clock.is_running());
        assert_eq!(clock.tick(16.0), None);
    }

    #[test]
    fn test_tick_measures_and_clamps() {
        let mut clock = FrameClock::new();
        assert!(clock.play());
        assert_eq!(clock.tick(1000.0), Some(DEFAULT_FRAME_DT));
        let dt = clock.tick(1020.0).expect("running");
        assert!((dt - 0.02).abs() < 1e-6);
        // Long stall (tab in background) is capped
        assert_eq!(clock.tick(5000.0), Some(MAX_FRAME_DT));
    }

    #[test]
    fn test_end_then_play_restarts_timing() {
        let mut clock = FrameClock::new();
        clock.play();
        clock.tick(100.0);
        clock.end();
        assert_eq!(clock.tick(116.0), None);
        assert!(clock.play());
        assert_eq!(clock.tick(9000.0), Some(DEFAULT_FRAME_DT));
        assert!(!clock.play());
    }
}
