use serde::Serialize;

/// Whether timed rounds are being issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Running,
}

/// Lifecycle of a training session.
///
/// `round` only grows by one per completed round and only goes back to zero
/// on a reset, a data regeneration or a boundary change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrainingState {
    phase: Phase,
    round: u64,
}

impl TrainingState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Moves to `phase`, returns whether it changed.
    pub(crate) fn transition(&mut self, phase: Phase) -> bool {
        let changed = self.phase != phase;
        self.phase = phase;
        changed
    }

    #[inline]
    pub(crate) fn inc_round(&mut self) -> u64 {
        self.round += 1;
        self.round
    }

    #[inline]
    pub(crate) fn rewind(&mut self) {
        self.round = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_at_round_zero() {
        let state = TrainingState::default();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.round(), 0);
    }

    #[test]
    fn transitions_report_changes() {
        let mut state = TrainingState::default();
        assert!(state.transition(Phase::Running));
        assert!(!state.transition(Phase::Running));
        assert!(state.is_running());
        assert!(state.transition(Phase::Idle));
    }

    #[test]
    fn rounds() {
        let mut state = TrainingState::default();
        assert_eq!(state.inc_round(), 1);
        assert_eq!(state.inc_round(), 2);
        state.rewind();
        assert_eq!(state.round(), 0);
    }
}
