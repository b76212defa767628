//! Periodic timers on a caller-supplied clock
//!
//! Stand-ins for `setInterval` that never fire on their own: the controller
//! advances a shared clock and asks each timer when it is next due.

/// A fixed-period timer that is either armed or stopped
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period_ms: f64,
    /// Clock time of the next firing, `None` while stopped
    next_due_ms: Option<f64>,
}

impl IntervalTimer {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            next_due_ms: None,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    pub fn is_armed(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Arm the timer so it first fires one period after `now_ms`.
    ///
    /// Any previous schedule is discarded, so arming twice never yields two
    /// interleaved schedules.
    pub fn start(&mut self, now_ms: f64) {
        self.stop();
        self.next_due_ms = Some(now_ms + self.period_ms);
    }

    /// Disarm the timer. Safe to call when already stopped.
    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    /// Next firing time if armed and due at or before `until_ms`
    pub fn due_by(&self, until_ms: f64) -> Option<f64> {
        self.next_due_ms.filter(|&due| due <= until_ms)
    }

    /// Consume the pending firing and schedule the next one
    pub fn fire(&mut self) {
        if let Some(due) = self.next_due_ms.as_mut() {
            *due += self.period_ms;
        }
    }
}
