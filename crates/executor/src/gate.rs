#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Eligible,
    Throttled,
}

/// Throttles output finalization to the bridge's configured submission
/// interval, scaled by a threshold fraction in (0, 1].
#[derive(Debug, Clone, Copy)]
pub struct SubmissionGate {
    threshold: f64,
}

impl SubmissionGate {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(f64::MIN_POSITIVE, 1.0),
        }
    }

    /// `Eligible` once `now >= last + floor(interval * threshold)`, and
    /// always eligible when nothing was ever submitted.
    pub fn evaluate(
        &self,
        now: i64,
        last_submitted: Option<i64>,
        submission_interval_secs: u64,
    ) -> GateState {
        let Some(last) = last_submitted else {
            return GateState::Eligible;
        };
        let wait = (submission_interval_secs as f64 * self.threshold).floor() as i64;
        if now >= last + wait {
            GateState::Eligible
        } else {
            GateState::Throttled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligible_when_nothing_submitted_yet() {
        let gate = SubmissionGate::new(0.9);
        assert_eq!(gate.evaluate(0, None, 600), GateState::Eligible);
    }

    #[test]
    fn boundary_sits_at_the_scaled_interval() {
        let gate = SubmissionGate::new(0.9);
        let t = 1_700_000_000;
        // interval 600s, threshold 0.9 -> 540s
        assert_eq!(gate.evaluate(t + 539, Some(t), 600), GateState::Throttled);
        assert_eq!(gate.evaluate(t + 540, Some(t), 600), GateState::Eligible);
        assert_eq!(gate.evaluate(t + 600, Some(t), 600), GateState::Eligible);
    }

    #[test]
    fn threshold_one_waits_the_full_interval() {
        let gate = SubmissionGate::new(1.0);
        let t = 1_000;
        assert_eq!(gate.evaluate(t + 599, Some(t), 600), GateState::Throttled);
        assert_eq!(gate.evaluate(t + 600, Some(t), 600), GateState::Eligible);
    }

    #[test]
    fn scaled_wait_is_floored() {
        let gate = SubmissionGate::new(0.75);
        let t = 0;
        // 10s * 0.75 = 7.5 -> floor 7
        assert_eq!(gate.evaluate(6, Some(t), 10), GateState::Throttled);
        assert_eq!(gate.evaluate(7, Some(t), 10), GateState::Eligible);
    }

    #[test]
    fn out_of_range_thresholds_are_clamped() {
        let gate = SubmissionGate::new(7.0);
        let t = 0;
        assert_eq!(gate.evaluate(600, Some(t), 600), GateState::Eligible);
        assert_eq!(gate.evaluate(599, Some(t), 600), GateState::Throttled);
    }
}
