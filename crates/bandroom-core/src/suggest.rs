use crate::availability::{free_intervals, DefaultPolicy};
use crate::band::Band;
use crate::error::{BandroomError, Result};
use crate::interval::{intersect_sets, subtract_set, TimeInterval, MINUTE_MS};
use crate::member::Member;
use crate::rehearsal::Rehearsal;
use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Slot suggestion
// ---------------------------------------------------------------------------

/// Propose up to `max_suggestions` feasible rehearsal slots of exactly
/// `duration_minutes` inside the search window, earliest first.
///
/// The candidate space is the intersection of every roster member's free
/// time, minus the band's existing bookings; fixed-duration slots are then
/// tiled from the start of each remaining range. An empty result is a valid
/// answer, not an error.
pub fn suggest_slots(
    band: &Band,
    members: &[Member],
    duration_minutes: i64,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    existing: &[Rehearsal],
    max_suggestions: usize,
    policy: DefaultPolicy,
) -> Result<Vec<TimeInterval>> {
    if duration_minutes <= 0 {
        return Err(BandroomError::InvalidDuration(duration_minutes));
    }
    if window_start >= window_end {
        return Err(BandroomError::InvalidWindow);
    }
    if band.roster.is_empty() {
        return Err(BandroomError::InvalidBand(band.slug.clone()));
    }
    let window = TimeInterval::from_datetimes(window_start, window_end)?;

    // Intersect free time across the whole roster.
    let mut common: Option<Vec<TimeInterval>> = None;
    for member_id in &band.roster {
        let member = members
            .iter()
            .find(|m| m.id == *member_id)
            .ok_or_else(|| BandroomError::MemberNotFound(member_id.to_string()))?;
        let free = free_intervals(&member.rules, &window, policy);
        common = Some(match common {
            Some(prev) => intersect_sets(&prev, &free),
            None => free,
        });
        if common.as_ref().is_some_and(|c| c.is_empty()) {
            return Ok(Vec::new());
        }
    }
    let common = common.unwrap_or_default();

    // Carve out slots already booked by this band.
    let booked: Vec<TimeInterval> = existing
        .iter()
        .filter(|r| r.band_slug == band.slug)
        .map(|r| r.interval)
        .collect();
    let open = subtract_set(&common, &booked);

    // Tile fixed-duration slots from the start of each open range. A
    // duration longer than the whole window can never fit; that check also
    // keeps `start + duration_ms` below the overflow line, since both are
    // bounded by the window once the multiply succeeds.
    let duration_ms = match duration_minutes.checked_mul(MINUTE_MS) {
        Some(ms) if ms <= window.end_ms() - window.start_ms() => ms,
        _ => return Ok(Vec::new()),
    };
    let mut slots = Vec::new();
    for range in open {
        if slots.len() == max_suggestions {
            break;
        }
        let mut start = range.start_ms();
        while slots.len() < max_suggestions && start + duration_ms <= range.end_ms() {
            slots.push(TimeInterval::new(start, start + duration_ms)?);
            start += duration_ms;
        }
    }
    Ok(slots)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
