//! Per-round damage reports
//!
//! A [`RoundReports`] has one owner that appends to it. Anyone else gets a
//! copy through [`RoundReports::snapshot`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::damage::critical_slot::CriticalSlot;
use crate::damage::location::Location;
use crate::damage::resolution::{CommitReport, CriticalOutcome, DamageOutcome};
use crate::targeting::TargetId;

/// One line of combat log about one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub subject: TargetId,
    pub text: String,
}

impl Report {
    pub fn new(subject: TargetId, text: impl Into<String>) -> Self {
        Self {
            subject,
            text: text.into(),
        }
    }

    /// Describe a damage application step by step
    pub fn from_outcome(subject: TargetId, outcome: &DamageOutcome) -> Vec<Report> {
        let mut reports: Vec<Report> = outcome
            .steps
            .iter()
            .map(|step| {
                Report::new(
                    subject,
                    format!(
                        "{} takes {} armor, {} structure",
                        step.location, step.armor, step.internal
                    ),
                )
            })
            .collect();

        reports.extend(
            outcome
                .destroyed_locations
                .iter()
                .map(|location| Report::new(subject, format!("{} destroyed", location))),
        );
        if outcome.voided > 0 {
            reports.push(Report::new(
                subject,
                format!("{} damage absorbed", outcome.voided),
            ));
        }
        if outcome.unit_destroyed {
            reports.push(Report::new(subject, "unit destroyed"));
        }
        reports
    }

    /// Describe a critical roll against one location
    pub fn from_critical(
        subject: TargetId,
        location: Location,
        critical: &CriticalOutcome,
    ) -> Vec<Report> {
        let mut reports: Vec<Report> = critical
            .doomed
            .iter()
            .map(|slot| {
                Report::new(
                    subject,
                    format!("critical hit: {} in {}", slot_name(slot), location),
                )
            })
            .collect();
        reports.extend(
            critical
                .destroyed_locations
                .iter()
                .map(|lost| Report::new(subject, format!("{} blown off", lost))),
        );
        if critical.unit_destroyed {
            reports.push(Report::new(subject, "unit destroyed"));
        }
        reports
    }

    pub fn from_commit(subject: TargetId, commit: &CommitReport) -> Vec<Report> {
        let mut reports: Vec<Report> = commit
            .destroyed
            .iter()
            .map(|(location, slot)| {
                Report::new(
                    subject,
                    format!("{} in {} destroyed", slot_name(slot), location),
                )
            })
            .collect();
        if commit.unit_destroyed {
            reports.push(Report::new(subject, "unit destroyed"));
        }
        reports
    }
}

fn slot_name(slot: &CriticalSlot) -> String {
    match slot.system_component() {
        Some(component) => format!("{:?}", component),
        None => format!("{:?} {}", slot.kind(), slot.index()),
    }
}

/// Reports grouped by round number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReports {
    rounds: BTreeMap<u32, Vec<Report>>,
}

impl RoundReports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append entries to a round in the order given
    ///
    /// An empty batch leaves the log untouched (no empty round is created).
    /// Adding to the same round twice appends the second batch after the
    /// first.
    pub fn add(&mut self, round: u32, entries: Vec<Report>) {
        if entries.is_empty() {
            return;
        }
        self.rounds.entry(round).or_default().extend(entries);
    }

    pub fn round(&self, round: u32) -> &[Report] {
        self.rounds.get(&round).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rounds(&self) -> impl Iterator<Item = (u32, &[Report])> {
        self.rounds.iter().map(|(r, reports)| (*r, reports.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.rounds.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Independent copy for consumers outside the owning writer
    pub fn snapshot(&self) -> RoundReports {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CombatConfig;
    use crate::damage::hit_data::HitData;
    use crate::damage::resolution::{apply_critical_roll, apply_damage, doom_critical};
    use crate::damage::unit::{CombatUnit, UnitConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty_add_is_noop() {
        let mut log = RoundReports::new();
        log.add(1, Vec::new());
        assert!(log.is_empty());
        assert!(log.round(1).is_empty());
    }

    #[test]
    fn test_repeated_add_appends() {
        let mut log = RoundReports::new();
        log.add(2, vec![Report::new(1, "first")]);
        log.add(2, vec![Report::new(1, "second"), Report::new(1, "third")]);
        let texts: Vec<&str> = log.round(2).iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["first", "second", "third"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut log = RoundReports::new();
        log.add(1, vec![Report::new(1, "hit")]);
        let copy = log.snapshot();
        log.add(1, vec![Report::new(1, "again")]);
        assert_eq!(copy.round(1).len(), 1);
        assert_eq!(log.round(1).len(), 2);
    }

    #[test]
    fn test_rounds_in_order() {
        let mut log = RoundReports::new();
        log.add(3, vec![Report::new(1, "c")]);
        log.add(1, vec![Report::new(1, "a")]);
        let order: Vec<u32> = log.rounds().map(|(r, _)| r).collect();
        assert_eq!(order, [1, 3]);
    }

    #[test]
    fn test_reports_from_outcome() {
        let mut unit = CombatUnit::biped(7, "Armless", UnitConfig::armless());
        let outcome = apply_damage(&mut unit, &HitData::new(Location::RightArm), 30);
        let reports = Report::from_outcome(unit.id, &outcome);
        let texts: Vec<&str> = reports.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(
            texts,
            [
                "Right Arm takes 16 armor, 8 structure",
                "Right Arm destroyed",
                "6 damage absorbed",
            ]
        );
        assert!(reports.iter().all(|r| r.subject == 7));
    }

    #[test]
    fn test_reports_from_blown_off_limb() {
        let mut unit = CombatUnit::biped(8, "Jenner", UnitConfig::standard());
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let critical = apply_critical_roll(
            &mut unit,
            Location::LeftArm,
            12,
            &CombatConfig::default(),
            &mut rng,
        );
        let reports = Report::from_critical(unit.id, Location::LeftArm, &critical);
        let texts: Vec<&str> = reports.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["Left Arm blown off"]);
    }

    #[test]
    fn test_reports_from_doomed_slot() {
        let mut unit = CombatUnit::biped(9, "Jenner", UnitConfig::standard());
        let slot = doom_critical(&mut unit, Location::RightLeg, 0).unwrap();
        let critical = CriticalOutcome {
            doomed: vec![slot],
            ..CriticalOutcome::default()
        };
        let reports = Report::from_critical(unit.id, Location::RightLeg, &critical);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].text, "critical hit: Hip in Right Leg");
    }
}
