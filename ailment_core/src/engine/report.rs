//! TickReport - everything that happened during one engine update

use crate::types::{ActorId, EffectId, StatusKind};
use serde::{Deserialize, Serialize};

/// Why an instance left the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Ran out its full duration
    Elapsed,
    /// Owning target was destroyed; absorbed silently
    TargetDestroyed,
    /// Removed externally (cure ability, explicit cancel)
    Cleansed,
    /// Replaced by a fresh application of the same non-stacking kind
    Overwritten,
}

/// One application of periodic damage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    pub target: ActorId,
    pub kind: StatusKind,
    pub amount: f64,
    /// True when the target was a splash secondary rather than the primary
    pub splash: bool,
}

/// A frost instance moving from Frozen into Chilled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseShift {
    pub effect: EffectId,
    pub target: ActorId,
    pub from: StatusKind,
    pub to: StatusKind,
}

/// An instance that ended during the pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndedEffect {
    pub effect: EffectId,
    pub target: ActorId,
    /// Registry kind the instance owned when it ended
    pub kind: StatusKind,
    pub reason: EndReason,
}

/// Outcome of a single [`EffectEngine::update`](crate::EffectEngine::update)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickReport {
    pub damage: Vec<DamageEvent>,
    pub shifts: Vec<PhaseShift>,
    pub ended: Vec<EndedEffect>,
    /// Sum of all damage events this pass
    pub total_damage: f64,
}

impl TickReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_damage(&mut self, target: ActorId, kind: StatusKind, amount: f64, splash: bool) {
        self.damage.push(DamageEvent {
            target,
            kind,
            amount,
            splash,
        });
        self.total_damage += amount;
    }

    /// True when nothing ticked, shifted or ended
    pub fn is_quiet(&self) -> bool {
        self.damage.is_empty() && self.shifts.is_empty() && self.ended.is_empty()
    }

    /// Damage events against one target
    pub fn damage_to(&self, target: ActorId) -> impl Iterator<Item = &DamageEvent> {
        self.damage.iter().filter(move |e| e.target == target)
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.total_damage > 0.0 {
            parts.push(format!(
                "{:.1} damage over {} ticks",
                self.total_damage,
                self.damage.len()
            ));
        }

        for shift in &self.shifts {
            parts.push(format!("{:?} thawed to {:?}", shift.from, shift.to));
        }

        for ended in &self.ended {
            parts.push(format!("{:?} ended ({:?})", ended.kind, ended.reason));
        }

        if parts.is_empty() {
            "quiet".to_string()
        } else {
            parts.join(", ")
        }
    }
}
