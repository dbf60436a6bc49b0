//! Frost - an optional full freeze that always thaws into a chill
//!
//! The phase machine is Freezing -> Chilling -> ended. A frozen target never
//! goes straight back to full speed: when the freeze elapses the instance
//! swaps its registry entry from Frozen to Chilled and keeps running for the
//! chill duration. Ending straight out of Freezing would skip the thaw and
//! is not a legal transition.

use crate::effect::FrostParams;
use crate::types::StatusKind;

/// Phase of a frost instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrostPhase {
    /// Speed forced to zero, registry shows Frozen
    Freezing,
    /// Partial slow, registry shows Chilled
    Chilling,
}

/// Live frost state
#[derive(Debug, Clone)]
pub struct FrostState {
    /// Parameters with both phase durations already resistance-scaled
    pub params: FrostParams,
    pub phase: FrostPhase,
}

impl FrostState {
    /// A fresh instance enters Freezing when the chance roll succeeded,
    /// Chilling otherwise
    pub fn new(params: FrostParams, frozen: bool) -> Self {
        FrostState {
            params,
            phase: if frozen {
                FrostPhase::Freezing
            } else {
                FrostPhase::Chilling
            },
        }
    }

    /// Duration of the current phase
    pub fn phase_duration(&self) -> f64 {
        match self.phase {
            FrostPhase::Freezing => self.params.freeze_duration,
            FrostPhase::Chilling => self.params.chill_duration,
        }
    }

    /// Movement multiplier the current phase imposes
    pub fn speed_multiplier(&self) -> f64 {
        match self.phase {
            FrostPhase::Freezing => 0.0,
            FrostPhase::Chilling => (1.0 - self.params.chill_slow_amount).clamp(0.0, 1.0),
        }
    }

    /// Registry kind the current phase owns
    pub fn kind(&self) -> StatusKind {
        match self.phase {
            FrostPhase::Freezing => StatusKind::Frozen,
            FrostPhase::Chilling => StatusKind::Chilled,
        }
    }

    /// Move from Freezing into Chilling
    pub fn thaw(&mut self) {
        self.phase = FrostPhase::Chilling;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> FrostParams {
        FrostParams {
            direct_damage: 12.0,
            freeze_chance: 1.0,
            freeze_duration: 2.0,
            chill_duration: 4.0,
            chill_slow_amount: 0.3,
        }
    }

    #[test]
    fn test_frozen_entry_phase() {
        let state = FrostState::new(params(), true);
        assert_eq!(state.phase, FrostPhase::Freezing);
        assert_eq!(state.kind(), StatusKind::Frozen);
        assert!((state.speed_multiplier() - 0.0).abs() < f64::EPSILON);
        assert!((state.phase_duration() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failed_roll_enters_chilling() {
        let state = FrostState::new(params(), false);
        assert_eq!(state.phase, FrostPhase::Chilling);
        assert_eq!(state.kind(), StatusKind::Chilled);
        assert!((state.speed_multiplier() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_thaw_swaps_phase() {
        let mut state = FrostState::new(params(), true);
        state.thaw();
        assert_eq!(state.phase, FrostPhase::Chilling);
        assert_eq!(state.kind(), StatusKind::Chilled);
        assert!((state.phase_duration() - 4.0).abs() < f64::EPSILON);
    }
}
