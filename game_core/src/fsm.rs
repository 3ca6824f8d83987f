//! Session phase machine
//!
//! Idle and Ended both accept a start; Running only ends on a win.

/// Coarse session phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Ended,
}

/// Actions that trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Start,
    Win,
}

/// Result of a phase transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    success: bool,
    from: Phase,
    to: Phase,
    action: SessionAction,
}

impl TransitionResult {
    pub fn success(&self) -> bool {
        self.success
    }

    #[allow(clippy::wrong_self_convention)]
    pub fn from(&self) -> Phase {
        self.from
    }

    pub fn to(&self) -> Phase {
        self.to
    }

    pub fn action(&self) -> SessionAction {
        self.action
    }
}

/// Phase state machine
#[derive(Debug, Clone)]
pub struct PhaseMachine {
    phase: Phase,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    /// Get current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: SessionAction) -> bool {
        self.next_phase(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: SessionAction) -> TransitionResult {
        let from = self.phase;

        match self.next_phase(action) {
            Some(to) => {
                self.phase = to;
                tracing::info!(?from, ?to, ?action, "phase transition");
                TransitionResult {
                    success: true,
                    from,
                    to,
                    action,
                }
            }
            None => {
                tracing::debug!(?from, ?action, "rejected phase transition");
                TransitionResult {
                    success: false,
                    from,
                    to: from,
                    action,
                }
            }
        }
    }

    /// Get next phase for a given action (if valid)
    fn next_phase(&self, action: SessionAction) -> Option<Phase> {
        match (self.phase, action) {
            (Phase::Idle, SessionAction::Start) => Some(Phase::Running),
            (Phase::Ended, SessionAction::Start) => Some(Phase::Running),
            (Phase::Running, SessionAction::Win) => Some(Phase::Ended),

            // Invalid transition
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}
