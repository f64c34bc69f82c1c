use crate::error::{BandroomError, Result};
use crate::interval::{coalesce, subtract_set, TimeInterval, MINUTE_MS};
use chrono::{DateTime, Datelike, NaiveTime, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

// ---------------------------------------------------------------------------
// DefaultPolicy
// ---------------------------------------------------------------------------

/// Base calendar assumed before any rules apply.
///
/// Deployment-wide knob, passed explicitly into every aggregator call so the
/// engine stays free of ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultPolicy {
    /// Members are assumed free except where a busy rule says otherwise.
    AvailableUnlessMarkedBusy,
    /// Members are assumed busy except where a free rule says otherwise.
    #[default]
    UnavailableUnlessMarkedFree,
}

// ---------------------------------------------------------------------------
// AvailabilityRule
// ---------------------------------------------------------------------------

/// A member's declaration of being free or busy for some period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub id: Uuid,
    #[serde(flatten)]
    pub kind: RuleKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    /// A single concrete period.
    OneOff { interval: TimeInterval, busy: bool },
    /// A weekly slot between two minutes-from-midnight marks (UTC), active
    /// within an effective date range. An absent `effective_until` means the
    /// rule never expires; expansion is still finite because it is always
    /// bounded by the query window.
    Recurring {
        weekday: Weekday,
        start_minute: u32,
        end_minute: u32,
        busy: bool,
        effective_from: DateTime<Utc>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        effective_until: Option<DateTime<Utc>>,
    },
}

impl AvailabilityRule {
    pub fn new(kind: RuleKind) -> Result<Self> {
        let rule = Self {
            id: Uuid::new_v4(),
            kind,
        };
        rule.validate()?;
        Ok(rule)
    }

    pub fn validate(&self) -> Result<()> {
        if let RuleKind::Recurring {
            start_minute,
            end_minute,
            effective_from,
            effective_until,
            ..
        } = &self.kind
        {
            if start_minute >= end_minute || *end_minute > MINUTES_PER_DAY {
                return Err(BandroomError::InvalidRule(format!(
                    "daily slot {start_minute}..{end_minute} must satisfy start < end <= {MINUTES_PER_DAY}"
                )));
            }
            if let Some(until) = effective_until {
                if until <= effective_from {
                    return Err(BandroomError::InvalidRule(
                        "effective_until must follow effective_from".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn is_busy(&self) -> bool {
        match self.kind {
            RuleKind::OneOff { busy, .. } => busy,
            RuleKind::Recurring { busy, .. } => busy,
        }
    }

    /// Expand into concrete intervals clamped to `window`.
    ///
    /// Recurring rules walk the window day by day, so the result is a finite
    /// ordered sequence even for rules with no end date.
    pub fn expand(&self, window: &TimeInterval) -> Vec<TimeInterval> {
        match &self.kind {
            RuleKind::OneOff { interval, .. } => {
                interval.clamp_to(window).into_iter().collect()
            }
            RuleKind::Recurring {
                weekday,
                start_minute,
                end_minute,
                effective_from,
                effective_until,
                ..
            } => {
                let mut effective = match TimeInterval::from_datetimes(
                    *effective_from,
                    effective_until.unwrap_or(DateTime::<Utc>::MAX_UTC),
                ) {
                    Ok(iv) => iv,
                    Err(_) => return Vec::new(),
                };
                effective = match effective.clamp_to(window) {
                    Some(iv) => iv,
                    None => return Vec::new(),
                };

                let mut out = Vec::new();
                let mut day = effective.start().date_naive();
                let last = effective.end().date_naive();
                while day <= last {
                    if day.weekday() == *weekday {
                        let midnight = Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN));
                        let start_ms = midnight.timestamp_millis()
                            + i64::from(*start_minute) * MINUTE_MS;
                        let end_ms = midnight.timestamp_millis()
                            + i64::from(*end_minute) * MINUTE_MS;
                        if let Ok(occurrence) = TimeInterval::new(start_ms, end_ms) {
                            if let Some(clamped) = occurrence.clamp_to(&effective) {
                                out.push(clamped);
                            }
                        }
                    }
                    day = match day.succ_opt() {
                        Some(next) => next,
                        None => break,
                    };
                }
                out
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Compute a member's free time within `window`.
///
/// Free rules add to the base calendar, busy rules subtract from the result,
/// so a busy rule always wins over a free rule covering the same instant.
/// Output is chronologically ordered and non-overlapping. Pure and
/// side-effect-free; identical inputs always yield identical output.
pub fn free_intervals(
    rules: &[AvailabilityRule],
    window: &TimeInterval,
    policy: DefaultPolicy,
) -> Vec<TimeInterval> {
    let mut free: Vec<TimeInterval> = match policy {
        DefaultPolicy::AvailableUnlessMarkedBusy => vec![*window],
        DefaultPolicy::UnavailableUnlessMarkedFree => Vec::new(),
    };
    let mut busy: Vec<TimeInterval> = Vec::new();

    for rule in rules {
        let expanded = rule.expand(window);
        if rule.is_busy() {
            busy.extend(expanded);
        } else {
            free.extend(expanded);
        }
    }

    let free = coalesce(free);
    let busy = coalesce(busy);
    coalesce(subtract_set(&free, &busy))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn window(y: i32, mo: u32, d1: u32, d2: u32) -> TimeInterval {
        TimeInterval::from_datetimes(at(y, mo, d1, 0, 0), at(y, mo, d2, 0, 0)).unwrap()
    }

    fn one_off(start: DateTime<Utc>, end: DateTime<Utc>, busy: bool) -> AvailabilityRule {
        AvailabilityRule::new(RuleKind::OneOff {
            interval: TimeInterval::from_datetimes(start, end).unwrap(),
            busy,
        })
        .unwrap()
    }

    fn weekly(
        weekday: Weekday,
        start_minute: u32,
        end_minute: u32,
        busy: bool,
        from: DateTime<Utc>,
    ) -> AvailabilityRule {
        AvailabilityRule::new(RuleKind::Recurring {
            weekday,
            start_minute,
            end_minute,
            busy,
            effective_from: from,
            effective_until: None,
        })
        .unwrap()
    }

    #[test]
    fn rejects_inverted_daily_slot() {
        let result = AvailabilityRule::new(RuleKind::Recurring {
            weekday: Weekday::Mon,
            start_minute: 600,
            end_minute: 600,
            busy: false,
            effective_from: at(2026, 1, 1, 0, 0),
            effective_until: None,
        });
        assert!(matches!(result, Err(BandroomError::InvalidRule(_))));
    }

    #[test]
    fn rejects_slot_past_midnight() {
        let result = AvailabilityRule::new(RuleKind::Recurring {
            weekday: Weekday::Mon,
            start_minute: 0,
            end_minute: MINUTES_PER_DAY + 1,
            busy: false,
            effective_from: at(2026, 1, 1, 0, 0),
            effective_until: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn recurring_expands_once_per_matching_weekday() {
        // 2026-01-05 is a Monday; a two-week window holds two Mondays.
        let rule = weekly(Weekday::Mon, 18 * 60, 21 * 60, false, at(2026, 1, 1, 0, 0));
        let w = window(2026, 1, 5, 19);
        let expanded = rule.expand(&w);
        assert_eq!(expanded.len(), 2);
        assert_eq!(expanded[0].start(), at(2026, 1, 5, 18, 0));
        assert_eq!(expanded[0].end(), at(2026, 1, 5, 21, 0));
        assert_eq!(expanded[1].start(), at(2026, 1, 12, 18, 0));
    }

    #[test]
    fn recurring_respects_effective_range() {
        let rule = AvailabilityRule::new(RuleKind::Recurring {
            weekday: Weekday::Mon,
            start_minute: 18 * 60,
            end_minute: 21 * 60,
            busy: false,
            effective_from: at(2026, 1, 10, 0, 0),
            effective_until: Some(at(2026, 1, 14, 0, 0)),
        })
        .unwrap();
        // Window covers Mondays Jan 5 and Jan 12; only Jan 12 is effective.
        let expanded = rule.expand(&window(2026, 1, 5, 19));
        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[0].start(), at(2026, 1, 12, 18, 0));
    }

    #[test]
    fn free_intervals_empty_without_rules_under_default_policy() {
        let w = window(2026, 1, 5, 6);
        let free = free_intervals(&[], &w, DefaultPolicy::UnavailableUnlessMarkedFree);
        assert!(free.is_empty());
    }

    #[test]
    fn free_intervals_whole_window_under_open_policy() {
        let w = window(2026, 1, 5, 6);
        let free = free_intervals(&[], &w, DefaultPolicy::AvailableUnlessMarkedBusy);
        assert_eq!(free, vec![w]);
    }

    #[test]
    fn busy_rule_wins_over_free_rule() {
        let w = window(2026, 1, 5, 6);
        let rules = vec![
            one_off(at(2026, 1, 5, 9, 0), at(2026, 1, 5, 17, 0), false),
            one_off(at(2026, 1, 5, 12, 0), at(2026, 1, 5, 13, 0), true),
        ];
        let free = free_intervals(&rules, &w, DefaultPolicy::UnavailableUnlessMarkedFree);
        assert_eq!(
            free,
            vec![
                TimeInterval::from_datetimes(at(2026, 1, 5, 9, 0), at(2026, 1, 5, 12, 0))
                    .unwrap(),
                TimeInterval::from_datetimes(at(2026, 1, 5, 13, 0), at(2026, 1, 5, 17, 0))
                    .unwrap(),
            ]
        );
    }

    #[test]
    fn overlapping_free_rules_are_coalesced() {
        let w = window(2026, 1, 5, 6);
        let rules = vec![
            one_off(at(2026, 1, 5, 9, 0), at(2026, 1, 5, 12, 0), false),
            one_off(at(2026, 1, 5, 11, 0), at(2026, 1, 5, 14, 0), false),
        ];
        let free = free_intervals(&rules, &w, DefaultPolicy::UnavailableUnlessMarkedFree);
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].start(), at(2026, 1, 5, 9, 0));
        assert_eq!(free[0].end(), at(2026, 1, 5, 14, 0));
    }

    #[test]
    fn output_is_ordered_and_non_overlapping() {
        let w = window(2026, 1, 5, 12);
        let rules = vec![
            weekly(Weekday::Fri, 10 * 60, 12 * 60, false, at(2026, 1, 1, 0, 0)),
            weekly(Weekday::Mon, 18 * 60, 21 * 60, false, at(2026, 1, 1, 0, 0)),
            one_off(at(2026, 1, 7, 8, 0), at(2026, 1, 7, 9, 0), false),
        ];
        let free = free_intervals(&rules, &w, DefaultPolicy::UnavailableUnlessMarkedFree);
        for pair in free.windows(2) {
            assert!(pair[0].end_ms() <= pair[1].start_ms());
        }
        assert_eq!(free.len(), 3);
    }

    #[test]
    fn recurring_busy_rule_punches_weekly_holes() {
        let w = window(2026, 1, 5, 19);
        let rules = vec![
            one_off(at(2026, 1, 5, 0, 0), at(2026, 1, 19, 0, 0), false),
            weekly(Weekday::Wed, 0, MINUTES_PER_DAY, true, at(2026, 1, 1, 0, 0)),
        ];
        let free = free_intervals(&rules, &w, DefaultPolicy::UnavailableUnlessMarkedFree);
        // Two Wednesdays removed from a continuous fortnight leaves 3 ranges.
        assert_eq!(free.len(), 3);
    }

    #[test]
    fn rule_serde_roundtrip() {
        let rule = weekly(Weekday::Mon, 18 * 60, 21 * 60, false, at(2026, 1, 1, 0, 0));
        let yaml = serde_yaml::to_string(&rule).unwrap();
        assert!(yaml.contains("kind: recurring"), "yaml: {yaml}");
        let back: AvailabilityRule = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, rule);
    }

    #[test]
    fn policy_serde_snake_case() {
        let json = serde_json::to_string(&DefaultPolicy::UnavailableUnlessMarkedFree).unwrap();
        assert_eq!(json, "\"unavailable_unless_marked_free\"");
    }
}
