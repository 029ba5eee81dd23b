use super::state::State;
use crate::field::{max_abs_diff, Component};

// ---------------------------------------------------------------------------
// Run events
// ---------------------------------------------------------------------------

/// Kinds of run events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// A field picked up a NaN or infinite value.
    Diverged,
    /// Consecutive frames differ by no more than the detector tolerance.
    SteadyState,
    Custom(String),
}

/// An event observed between two recorded frames.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub frame: usize,
    pub time: f64,
    pub kind: EventKind,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive frames and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &State, current: &State) -> Option<EventKind>;
}

/// Fires on the first frame containing a non-finite value.
#[derive(Debug, Default)]
pub struct DivergenceDetector {
    fired: bool,
}

impl DivergenceDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventDetector for DivergenceDetector {
    fn check(&mut self, _prev: &State, current: &State) -> Option<EventKind> {
        if self.fired || current.is_finite() {
            return None;
        }
        self.fired = true;
        Some(EventKind::Diverged)
    }
}

/// Fires once both fields change by at most `tolerance` in every cell
/// between frames.
#[derive(Debug)]
pub struct SteadyStateDetector {
    pub tolerance: f64,
    fired: bool,
}

impl SteadyStateDetector {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance, fired: false }
    }
}

impl EventDetector for SteadyStateDetector {
    fn check(&mut self, prev: &State, current: &State) -> Option<EventKind> {
        if self.fired || !current.is_finite() {
            return None;
        }
        let change = max_abs_diff(&prev.a, &current.a).max(max_abs_diff(&prev.b, &current.b));
        if change <= self.tolerance {
            self.fired = true;
            Some(EventKind::SteadyState)
        } else {
            None
        }
    }
}

/// Fires when the maximum of a field first rises through `level`.
#[derive(Debug)]
pub struct ThresholdDetector {
    pub component: Component,
    pub level: f64,
    fired: bool,
}

impl ThresholdDetector {
    pub fn new(component: Component, level: f64) -> Self {
        Self { component, level, fired: false }
    }
}

impl EventDetector for ThresholdDetector {
    fn check(&mut self, prev: &State, current: &State) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        let before = prev.stats(self.component).max;
        let after = current.stats(self.component).max;
        if before < self.level && after >= self.level {
            self.fired = true;
            Some(EventKind::Custom(format!(
                "{} reached {}",
                self.component.label(),
                self.level
            )))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_state(step: u64, a: f64, b: f64) -> State {
        let mut s = State::zeros(3, 3);
        s.step = step;
        s.a.fill(a);
        s.b.fill(b);
        s
    }

    #[test]
    fn divergence_detected_once() {
        let mut det = DivergenceDetector::new();
        let prev = make_state(0, 0.1, 0.1);
        let mut curr = make_state(1, 0.1, 0.1);
        assert!(det.check(&prev, &curr).is_none());
        curr.b[(2, 0)] = f64::INFINITY;
        assert_eq!(det.check(&prev, &curr), Some(EventKind::Diverged));
        assert!(det.check(&prev, &curr).is_none());
    }

    #[test]
    fn steady_state_respects_tolerance() {
        let mut det = SteadyStateDetector::new(1e-6);
        let prev = make_state(0, 0.5, 0.5);
        assert!(det.check(&prev, &make_state(1, 0.5 + 1e-3, 0.5)).is_none());
        assert_eq!(det.check(&prev, &make_state(1, 0.5 + 1e-7, 0.5)), Some(EventKind::SteadyState));
    }

    #[test]
    fn threshold_fires_on_upward_crossing() {
        let mut det = ThresholdDetector::new(Component::A, 1.0);
        assert!(det.check(&make_state(0, 1.2, 0.0), &make_state(1, 1.5, 0.0)).is_none());
        let kind = det.check(&make_state(1, 0.9, 0.0), &make_state(2, 1.1, 0.0));
        assert_eq!(kind, Some(EventKind::Custom("A reached 1".into())));
        assert!(det.check(&make_state(1, 0.9, 0.0), &make_state(2, 1.1, 0.0)).is_none());
    }
}
