//! Damage model: body locations, critical slots, and hit resolution

pub mod critical_slot;
pub mod hit_data;
pub mod location;
pub mod piloting;
pub mod report;
pub mod resolution;
pub mod unit;

pub use critical_slot::{CriticalSlot, SlotKind, SlotState, SystemComponent};
pub use hit_data::{HitData, HitEffect};
pub use location::{transfer_location, Location};
pub use piloting::{stand_check, PilotingModifier, PilotingRoll};
pub use report::{Report, RoundReports};
pub use resolution::{
    apply_critical_roll, apply_damage, commit_doomed, critical_roll, doom_critical,
    resolve_aimed_hit, resolve_hit, roll_2d6, AttackDirection, BipedHitTable, CommitReport,
    CriticalOutcome, CriticalRoll, DamageOutcome, HitTable, LocationDamage,
};
pub use unit::{CombatUnit, LocationLayout, LocationStats, LocationState, UnitConfig};
