use std::time::Duration;
use tokio::time::Instant;

/// Tracks the deadline for the seat currently on the clock. The engine
/// loop checks [`Timer::expired`] on every tick and, if so, injects an
/// auto-action (spec §4.1's failure semantics: check if legal, else
/// fold) rather than waiting indefinitely on a stalled or disconnected
/// player — disconnection during a turn is deliberately treated no
/// differently than a plain timeout (spec §9, open question).
#[derive(Debug)]
pub struct Timer {
    action_timeout: Duration,
    deadline: Option<Instant>,
}

impl Timer {
    pub fn new(action_timeout: Duration) -> Self {
        Self { action_timeout, deadline: None }
    }

    pub fn start(&mut self) {
        self.deadline = Some(Instant::now() + self.action_timeout);
    }

    pub fn clear(&mut self) {
        self.deadline = None;
    }

    pub fn expired(&self) -> bool {
        self.deadline.map(|d| Instant::now() >= d).unwrap_or(false)
    }

    pub fn running(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_cleared() {
        let timer = Timer::new(Duration::from_secs(10));
        assert!(!timer.running());
        assert!(!timer.expired());
    }

    #[test]
    fn clear_stops_tracking() {
        let mut timer = Timer::new(Duration::from_millis(1));
        timer.start();
        timer.clear();
        assert!(!timer.running());
    }
}
