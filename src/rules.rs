use crate::models::{CheckIn, RiskLevel};

/// Consecutive weeks a symptom must hold for a persistence rule to fire.
pub const WEEKS_FOR_TREND: usize = 2;

pub const MAX_CONFIDENCE: u32 = 100;

/// A single scoring rule. `check` sees the current check-in and the history
/// (most recent first) and returns the trigger text when the rule fires.
pub struct Rule {
    pub points: u32,
    pub check: fn(&CheckIn, &[CheckIn]) -> Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub score: u32,
    pub triggers: Vec<String>,
}

impl RuleOutcome {
    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.score)
    }

    pub fn confidence(&self) -> u32 {
        self.score.min(MAX_CONFIDENCE)
    }
}

/// Runs every rule in order. Rules are independent; each one that fires adds
/// its points and appends its trigger.
pub fn evaluate(rules: &[Rule], current: &CheckIn, history: &[CheckIn]) -> RuleOutcome {
    let mut outcome = RuleOutcome {
        score: 0,
        triggers: Vec::new(),
    };

    for rule in rules {
        if let Some(trigger) = (rule.check)(current, history) {
            tracing::debug!(points = rule.points, %trigger, "rule fired");
            outcome.score += rule.points;
            outcome.triggers.push(trigger);
        }
    }

    outcome
}

/// Counts matches over the window `[current, history[..window - 1]]`.
/// `history` must already be sorted most recent first.
pub fn count_recent_matching<F>(
    current: &CheckIn,
    history: &[CheckIn],
    window: usize,
    predicate: F,
) -> usize
where
    F: Fn(&CheckIn) -> bool,
{
    if window == 0 {
        return 0;
    }

    std::iter::once(current)
        .chain(history.iter().take(window - 1))
        .filter(|check_in| predicate(check_in))
        .count()
}

/// True when the predicate holds for the current week and each of the
/// preceding `WEEKS_FOR_TREND - 1` weeks.
pub fn persists<F>(current: &CheckIn, history: &[CheckIn], predicate: F) -> bool
where
    F: Fn(&CheckIn) -> bool,
{
    count_recent_matching(current, history, WEEKS_FOR_TREND, predicate) >= WEEKS_FOR_TREND
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{Duration, TimeZone, Utc};

    use crate::models::CheckIn;

    /// Mid-range check-in with no clinical readings.
    pub fn check_in(week: u32) -> CheckIn {
        let start = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
        CheckIn {
            week,
            date: start + Duration::weeks(i64::from(week)),
            headache: 3,
            swelling: 3,
            sleep_quality: 3,
            fatigue: 3,
            mood: 3,
            dizziness: 3,
            blood_pressure: None,
            blood_sugar: None,
            activity_level: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::check_in;
    use super::*;

    fn always(points: u32) -> Rule {
        Rule {
            points,
            check: |current, _| Some(format!("week {}", current.week)),
        }
    }

    fn never() -> Rule {
        Rule {
            points: 99,
            check: |_, _| None,
        }
    }

    #[test]
    fn evaluate_sums_fired_rules_in_order() {
        let rules = [always(20), never(), always(15)];
        let outcome = evaluate(&rules, &check_in(10), &[]);
        assert_eq!(outcome.score, 35);
        assert_eq!(outcome.triggers, vec!["week 10", "week 10"]);
        assert_eq!(outcome.level(), RiskLevel::Moderate);
    }

    #[test]
    fn confidence_is_capped() {
        let rules = [always(40), always(40), always(40)];
        let outcome = evaluate(&rules, &check_in(10), &[]);
        assert_eq!(outcome.score, 120);
        assert_eq!(outcome.confidence(), 100);
    }

    #[test]
    fn window_only_looks_at_most_recent_entries() {
        let current = check_in(12);
        let mut older = check_in(10);
        older.swelling = 5;
        let history = vec![check_in(11), older];

        let matches = count_recent_matching(&current, &history, 2, |c| c.swelling >= 4);
        assert_eq!(matches, 0);

        let matches = count_recent_matching(&current, &history, 3, |c| c.swelling >= 4);
        assert_eq!(matches, 1);
    }

    #[test]
    fn persistence_needs_current_and_previous_week() {
        let mut current = check_in(12);
        current.fatigue = 4;
        assert!(!persists(&current, &[], |c| c.fatigue >= 4));

        let mut previous = check_in(11);
        previous.fatigue = 5;
        assert!(persists(&current, &[previous], |c| c.fatigue >= 4));
    }

    #[test]
    fn zero_window_counts_nothing() {
        assert_eq!(count_recent_matching(&check_in(1), &[], 0, |_| true), 0);
    }
}
