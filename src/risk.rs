use chrono::{DateTime, Utc};

use crate::actions;
use crate::models::{Assessment, CheckIn, Condition, RiskIndicator, RiskLevel};
use crate::rules::{self, Rule};

pub const ELEVATED_SYSTOLIC: u16 = 140;
pub const ELEVATED_DIASTOLIC: u16 = 90;
pub const BP_RISE_FROM_BASELINE: i32 = 10;
pub const ELEVATED_BLOOD_SUGAR: f64 = 140.0;
pub const HIGH_SYMPTOM: u8 = 4;
pub const LOW_RATING: u8 = 2;
pub const HEADACHE_DIZZINESS_COMBO: u16 = 7;
pub const MOOD_SLEEP_COMBO: u16 = 6;

static HYPERTENSIVE_RULES: [Rule; 4] = [
    Rule {
        points: 40,
        check: elevated_blood_pressure,
    },
    Rule {
        points: 25,
        check: blood_pressure_trend,
    },
    Rule {
        points: 20,
        check: persistent_swelling,
    },
    Rule {
        points: 15,
        check: headache_dizziness_combo,
    },
];

static GLYCEMIC_RULES: [Rule; 3] = [
    Rule {
        points: 40,
        check: elevated_blood_sugar,
    },
    Rule {
        points: 25,
        check: persistent_fatigue,
    },
    Rule {
        points: 20,
        check: activity_drop_with_fatigue,
    },
];

static MOOD_RULES: [Rule; 4] = [
    Rule {
        points: 30,
        check: low_mood,
    },
    Rule {
        points: 30,
        check: persistent_low_mood,
    },
    Rule {
        points: 20,
        check: declining_sleep,
    },
    Rule {
        points: 20,
        check: mood_sleep_combo,
    },
];

fn elevated_blood_pressure(current: &CheckIn, _history: &[CheckIn]) -> Option<String> {
    let bp = current.blood_pressure?;
    (bp.systolic >= ELEVATED_SYSTOLIC || bp.diastolic >= ELEVATED_DIASTOLIC)
        .then(|| format!("Elevated reading: blood pressure {bp} mmHg"))
}

fn blood_pressure_trend(current: &CheckIn, history: &[CheckIn]) -> Option<String> {
    let bp = current.blood_pressure?;
    let baseline = history.iter().find_map(|c| c.blood_pressure)?;
    let systolic_rise = i32::from(bp.systolic) - i32::from(baseline.systolic);
    let diastolic_rise = i32::from(bp.diastolic) - i32::from(baseline.diastolic);

    (systolic_rise >= BP_RISE_FROM_BASELINE || diastolic_rise >= BP_RISE_FROM_BASELINE)
        .then(|| format!("Upward trend: blood pressure {baseline} to {bp} mmHg"))
}

fn persistent_swelling(current: &CheckIn, history: &[CheckIn]) -> Option<String> {
    rules::persists(current, history, |c| c.swelling >= HIGH_SYMPTOM).then(|| {
        format!(
            "Persistent swelling: {} consecutive weeks",
            rules::WEEKS_FOR_TREND
        )
    })
}

fn headache_dizziness_combo(current: &CheckIn, _history: &[CheckIn]) -> Option<String> {
    let combined = u16::from(current.headache) + u16::from(current.dizziness);
    (combined >= HEADACHE_DIZZINESS_COMBO).then(|| {
        format!(
            "Headache+dizziness combo: headache {}/5, dizziness {}/5",
            current.headache, current.dizziness
        )
    })
}

fn elevated_blood_sugar(current: &CheckIn, _history: &[CheckIn]) -> Option<String> {
    let sugar = current.blood_sugar?;
    (sugar >= ELEVATED_BLOOD_SUGAR).then(|| format!("Elevated blood sugar reading ({sugar} mg/dL)"))
}

fn persistent_fatigue(current: &CheckIn, history: &[CheckIn]) -> Option<String> {
    rules::persists(current, history, |c| c.fatigue >= HIGH_SYMPTOM).then(|| {
        format!(
            "Persistent fatigue for {} consecutive weeks",
            rules::WEEKS_FOR_TREND
        )
    })
}

fn activity_drop_with_fatigue(current: &CheckIn, history: &[CheckIn]) -> Option<String> {
    let previous = history.first()?;
    let activity = current.activity_level?;
    let previous_activity = previous.activity_level?;

    (activity < previous_activity && current.fatigue > previous.fatigue).then(|| {
        format!(
            "Activity dropped ({previous_activity} to {activity}) while fatigue rose ({} to {})",
            previous.fatigue, current.fatigue
        )
    })
}

fn low_mood(current: &CheckIn, _history: &[CheckIn]) -> Option<String> {
    (current.mood <= LOW_RATING).then(|| format!("Low mood reported ({}/5)", current.mood))
}

fn persistent_low_mood(current: &CheckIn, history: &[CheckIn]) -> Option<String> {
    rules::persists(current, history, |c| c.mood <= LOW_RATING).then(|| {
        format!(
            "Low mood for {} consecutive weeks",
            rules::WEEKS_FOR_TREND
        )
    })
}

fn declining_sleep(current: &CheckIn, history: &[CheckIn]) -> Option<String> {
    let previous = history.first()?;
    (current.sleep_quality < previous.sleep_quality && current.sleep_quality <= LOW_RATING).then(
        || {
            format!(
                "Sleep quality declined ({} to {})",
                previous.sleep_quality, current.sleep_quality
            )
        },
    )
}

fn mood_sleep_combo(current: &CheckIn, _history: &[CheckIn]) -> Option<String> {
    let combined = u16::from(current.mood) + u16::from(current.sleep_quality);
    (combined <= MOOD_SLEEP_COMBO).then(|| {
        format!(
            "Low mood ({}/5) together with poor sleep ({}/5)",
            current.mood, current.sleep_quality
        )
    })
}

fn rules_for(condition: Condition) -> &'static [Rule] {
    match condition {
        Condition::Preeclampsia => &HYPERTENSIVE_RULES,
        Condition::GestationalDiabetes => &GLYCEMIC_RULES,
        Condition::PerinatalDepression => &MOOD_RULES,
    }
}

pub fn explanation(condition: Condition, level: RiskLevel) -> &'static str {
    match (condition, level) {
        (Condition::Preeclampsia, RiskLevel::High) => {
            "Your recent check-ins show several signs that can be linked to high blood pressure in pregnancy."
        }
        (Condition::Preeclampsia, RiskLevel::Moderate) => {
            "A few of your recent check-ins show signs worth keeping an eye on for blood pressure."
        }
        (Condition::Preeclampsia, RiskLevel::Low) => {
            "Nothing in your recent check-ins points to a blood pressure concern."
        }
        (Condition::GestationalDiabetes, RiskLevel::High) => {
            "Your recent check-ins show a pattern that can be linked to blood sugar changes in pregnancy."
        }
        (Condition::GestationalDiabetes, RiskLevel::Moderate) => {
            "Some of your recent energy and activity changes are worth watching alongside blood sugar."
        }
        (Condition::GestationalDiabetes, RiskLevel::Low) => {
            "Nothing in your recent check-ins points to a blood sugar concern."
        }
        (Condition::PerinatalDepression, RiskLevel::High) => {
            "Your mood and sleep have been low in a way that deserves real support right now."
        }
        (Condition::PerinatalDepression, RiskLevel::Moderate) => {
            "Your mood or sleep has dipped recently. That is common, and worth paying attention to."
        }
        (Condition::PerinatalDepression, RiskLevel::Low) => {
            "Your mood and sleep look steady in your recent check-ins."
        }
    }
}

pub fn recommendation(condition: Condition, level: RiskLevel) -> &'static str {
    match (condition, level) {
        (Condition::Preeclampsia, RiskLevel::High) => {
            "Contact your doctor or midwife today and share this summary. Seek urgent care for severe headache, vision changes or chest pain."
        }
        (Condition::Preeclampsia, RiskLevel::Moderate) => {
            "Check your blood pressure more often and mention these symptoms at your next appointment."
        }
        (Condition::Preeclampsia, RiskLevel::Low) => {
            "Keep logging your weekly check-ins and attend your routine appointments."
        }
        (Condition::GestationalDiabetes, RiskLevel::High) => {
            "Ask your care team about a glucose test and share your recent readings with them."
        }
        (Condition::GestationalDiabetes, RiskLevel::Moderate) => {
            "Favour balanced meals with steady carbohydrates and gentle daily movement, and mention fatigue at your next visit."
        }
        (Condition::GestationalDiabetes, RiskLevel::Low) => {
            "Keep up balanced meals and regular light activity."
        }
        (Condition::PerinatalDepression, RiskLevel::High) => {
            "Please talk to your doctor, midwife or a mental health professional soon. If you feel unsafe, contact emergency services."
        }
        (Condition::PerinatalDepression, RiskLevel::Moderate) => {
            "Reach out to someone you trust and consider a peer support group. Protect time for rest."
        }
        (Condition::PerinatalDepression, RiskLevel::Low) => {
            "Keep making time for rest and the people who support you."
        }
    }
}

fn score_condition(condition: Condition, current: &CheckIn, history: &[CheckIn]) -> RiskIndicator {
    let outcome = rules::evaluate(rules_for(condition), current, history);
    let level = outcome.level();

    RiskIndicator {
        condition,
        level,
        confidence: outcome.confidence(),
        triggers: outcome.triggers,
        explanation: explanation(condition, level).to_string(),
        recommendation: recommendation(condition, level).to_string(),
    }
}

/// Hypertensive-pattern indicator. `history` must be sorted most recent first.
pub fn score_preeclampsia(current: &CheckIn, history: &[CheckIn]) -> RiskIndicator {
    score_condition(Condition::Preeclampsia, current, history)
}

/// Glycemic-pattern indicator. `history` must be sorted most recent first.
pub fn score_gestational_diabetes(current: &CheckIn, history: &[CheckIn]) -> RiskIndicator {
    score_condition(Condition::GestationalDiabetes, current, history)
}

/// Mood-pattern indicator. `history` must be sorted most recent first.
pub fn score_perinatal_depression(current: &CheckIn, history: &[CheckIn]) -> RiskIndicator {
    score_condition(Condition::PerinatalDepression, current, history)
}

pub fn overall_level(indicators: &[RiskIndicator]) -> RiskLevel {
    indicators
        .iter()
        .map(|indicator| indicator.level)
        .max()
        .unwrap_or(RiskLevel::Low)
}

/// Assesses `current` against `history` (sorted most recent first) and
/// stamps the result with the current time.
pub fn assess_risk(current: &CheckIn, history: &[CheckIn]) -> Assessment {
    assess_risk_at(current, history, Utc::now())
}

pub fn assess_risk_at(
    current: &CheckIn,
    history: &[CheckIn],
    timestamp: DateTime<Utc>,
) -> Assessment {
    let indicators = vec![
        score_preeclampsia(current, history),
        score_gestational_diabetes(current, history),
        score_perinatal_depression(current, history),
    ];
    let overall_level = overall_level(&indicators);
    let system_actions = actions::derive_actions(&indicators);

    tracing::debug!(
        week = current.week,
        history = history.len(),
        overall = %overall_level,
        actions = system_actions.len(),
        "assessed check-in"
    );

    Assessment {
        overall_level,
        week: current.week,
        timestamp,
        indicators,
        system_actions,
    }
}
