use std::time::{Duration, Instant};

/// Restartable elapsed-time source.
///
/// Animated textures measure how long the current frame has been visible
/// through this trait, so playback can be driven by a real clock or by a
/// deterministic one.
pub trait Stopwatch {
    /// Resets the elapsed time to zero.
    fn restart(&mut self);

    /// Time since construction or the last [`Stopwatch::restart`].
    fn elapsed(&self) -> Duration;
}

/// Monotonic stopwatch backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start: Instant::now(),
        }
    }

    pub fn started_at(&self) -> Instant {
        self.start
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch for Timer {
    fn restart(&mut self) {
        self.start = Instant::now();
    }

    fn elapsed(&self) -> Duration {
        Instant::now().saturating_duration_since(self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_moves_the_zero_point_forward() {
        let mut timer = Timer::new();
        let first = timer.started_at();

        std::thread::sleep(Duration::from_millis(2));
        assert!(timer.elapsed() >= Duration::from_millis(2));

        timer.restart();
        assert!(timer.started_at() > first);
        assert!(timer.elapsed() < Duration::from_secs(1));
    }
}
