use crate::availability::{free_intervals, DefaultPolicy};
use crate::band::Band;
use crate::error::{BandroomError, Result};
use crate::interval::TimeInterval;
use crate::member::Member;
use crate::rehearsal::Rehearsal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// ConflictReport
// ---------------------------------------------------------------------------

/// The computed objections to a proposed rehearsal slot.
///
/// Derived and ephemeral, never persisted. An empty report means the slot is
/// safe to commit; whether a non-empty report blocks the booking (or "3 of 5
/// free is good enough") is the caller's policy, not the engine's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Roster members not free for the whole proposed interval.
    pub unavailable_members: Vec<Uuid>,
    /// Same-band rehearsals overlapping the proposed interval.
    pub overlapping_rehearsals: Vec<Uuid>,
}

impl ConflictReport {
    pub fn is_clear(&self) -> bool {
        self.unavailable_members.is_empty() && self.overlapping_rehearsals.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Conflict detection
// ---------------------------------------------------------------------------

/// Check a proposed interval against a band's roster and existing bookings.
///
/// `members` must carry every member on the band's roster; `existing` is the
/// current rehearsal snapshot from storage. On reschedule, `exclude` names the
/// rehearsal being moved so it does not collide with itself. Partial
/// availability counts as unavailable: a member must be free for the entire
/// proposed interval. Pure over its inputs, so identical calls yield
/// identical reports.
pub fn check_conflicts(
    band: &Band,
    members: &[Member],
    proposed: TimeInterval,
    existing: &[Rehearsal],
    exclude: Option<Uuid>,
    policy: DefaultPolicy,
) -> Result<ConflictReport> {
    if band.roster.is_empty() {
        return Err(BandroomError::InvalidBand(band.slug.clone()));
    }

    let mut overlapping_rehearsals: Vec<Uuid> = existing
        .iter()
        .filter(|r| r.band_slug == band.slug)
        .filter(|r| Some(r.id) != exclude)
        .filter(|r| r.interval.overlaps(&proposed))
        .map(|r| r.id)
        .collect();
    overlapping_rehearsals.dedup();

    let mut unavailable_members = Vec::new();
    for member_id in &band.roster {
        let member = members
            .iter()
            .find(|m| m.id == *member_id)
            .ok_or_else(|| BandroomError::MemberNotFound(member_id.to_string()))?;
        let free = free_intervals(&member.rules, &proposed, policy);
        let covered = free.iter().any(|iv| iv.contains(&proposed));
        if !covered {
            unavailable_members.push(member.id);
        }
    }

    Ok(ConflictReport {
        unavailable_members,
        overlapping_rehearsals,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::RuleKind;
    use chrono::{TimeZone, Utc};

    const POLICY: DefaultPolicy = DefaultPolicy::UnavailableUnlessMarkedFree;

    fn slot(day: u32, start_hour: u32, end_hour: u32) -> TimeInterval {
        let start = Utc.with_ymd_and_hms(2026, 3, day, start_hour, 0, 0).unwrap();
        let end = if end_hour == 24 {
            Utc.with_ymd_and_hms(2026, 3, day + 1, 0, 0, 0).unwrap()
        } else {
            Utc.with_ymd_and_hms(2026, 3, day, end_hour, 0, 0).unwrap()
        };
        TimeInterval::from_datetimes(start, end).unwrap()
    }

    fn member_free(name: &str, free: TimeInterval) -> Member {
        let mut member = Member::new(name);
        member
            .add_rule(RuleKind::OneOff {
                interval: free,
                busy: false,
            })
            .unwrap();
        member
    }

    fn band_of(members: &[&Member]) -> Band {
        let mut band = Band::new("trio", "Trio");
        for m in members {
            band.add_member(m.id).unwrap();
        }
        band
    }

    #[test]
    fn empty_roster_is_invalid() {
        let band = Band::new("empty", "Empty");
        let result = check_conflicts(&band, &[], slot(2, 18, 20), &[], None, POLICY);
        assert!(matches!(result, Err(BandroomError::InvalidBand(_))));
    }

    #[test]
    fn fully_free_member_with_no_bookings_is_clear() {
        let alice = member_free("Alice", slot(2, 17, 22));
        let band = band_of(&[&alice]);
        let report =
            check_conflicts(&band, &[alice.clone()], slot(2, 18, 20), &[], None, POLICY).unwrap();
        assert!(report.is_clear());
    }

    #[test]
    fn busy_one_off_covering_proposal_marks_member_unavailable() {
        let mut alice = member_free("Alice", slot(2, 0, 24));
        alice
            .add_rule(RuleKind::OneOff {
                interval: slot(2, 18, 20),
                busy: true,
            })
            .unwrap();
        let band = band_of(&[&alice]);
        let report =
            check_conflicts(&band, &[alice.clone()], slot(2, 18, 20), &[], None, POLICY).unwrap();
        assert_eq!(report.unavailable_members, vec![alice.id]);
    }

    #[test]
    fn partial_coverage_counts_as_unavailable() {
        // Free 18:00-19:00 only; proposal runs to 20:00.
        let alice = member_free("Alice", slot(2, 18, 19));
        let band = band_of(&[&alice]);
        let report =
            check_conflicts(&band, &[alice.clone()], slot(2, 18, 20), &[], None, POLICY).unwrap();
        assert_eq!(report.unavailable_members, vec![alice.id]);
    }

    #[test]
    fn overlapping_booking_is_reported() {
        let alice = member_free("Alice", slot(2, 0, 24));
        let band = band_of(&[&alice]);
        let booked = Rehearsal::new("trio", slot(2, 19, 21));
        let report = check_conflicts(
            &band,
            &[alice],
            slot(2, 18, 20),
            std::slice::from_ref(&booked),
            None,
            POLICY,
        )
        .unwrap();
        assert_eq!(report.overlapping_rehearsals, vec![booked.id]);
    }

    #[test]
    fn adjacent_booking_does_not_conflict() {
        let alice = member_free("Alice", slot(2, 0, 24));
        let band = band_of(&[&alice]);
        let booked = Rehearsal::new("trio", slot(2, 20, 22));
        let report = check_conflicts(
            &band,
            &[alice],
            slot(2, 18, 20),
            std::slice::from_ref(&booked),
            None,
            POLICY,
        )
        .unwrap();
        assert!(report.is_clear());
    }

    #[test]
    fn other_bands_bookings_are_ignored() {
        let alice = member_free("Alice", slot(2, 0, 24));
        let band = band_of(&[&alice]);
        let other = Rehearsal::new("quartet", slot(2, 18, 20));
        let report = check_conflicts(
            &band,
            &[alice],
            slot(2, 18, 20),
            std::slice::from_ref(&other),
            None,
            POLICY,
        )
        .unwrap();
        assert!(report.is_clear());
    }

    #[test]
    fn reschedule_excludes_own_booking() {
        let alice = member_free("Alice", slot(2, 0, 24));
        let band = band_of(&[&alice]);
        let booked = Rehearsal::new("trio", slot(2, 18, 20));
        let report = check_conflicts(
            &band,
            &[alice],
            slot(2, 18, 20),
            std::slice::from_ref(&booked),
            Some(booked.id),
            POLICY,
        )
        .unwrap();
        assert!(report.is_clear());
    }

    #[test]
    fn missing_roster_member_data_is_an_error() {
        let alice = member_free("Alice", slot(2, 0, 24));
        let band = band_of(&[&alice]);
        let result = check_conflicts(&band, &[], slot(2, 18, 20), &[], None, POLICY);
        assert!(matches!(result, Err(BandroomError::MemberNotFound(_))));
    }

    #[test]
    fn identical_inputs_yield_identical_reports() {
        let alice = member_free("Alice", slot(2, 18, 19));
        let band = band_of(&[&alice]);
        let booked = Rehearsal::new("trio", slot(2, 19, 21));
        let first = check_conflicts(
            &band,
            std::slice::from_ref(&alice),
            slot(2, 18, 20),
            std::slice::from_ref(&booked),
            None,
            POLICY,
        )
        .unwrap();
        let second = check_conflicts(
            &band,
            std::slice::from_ref(&alice),
            slot(2, 18, 20),
            std::slice::from_ref(&booked),
            None,
            POLICY,
        )
        .unwrap();
        assert_eq!(first, second);
    }
}
