use std::fmt::Write;

use crate::models::{Assessment, CheckIn, Condition, RiskLevel};

pub const RECENT_CHECK_INS: usize = 4;

pub const DISCLAIMER: &str = "Generated from self-reported check-ins. Not a diagnosis; \
     indicators are pattern flags for clinical review.";

fn condition_heading(condition: Condition) -> String {
    condition.as_str().to_uppercase().replace('_', " ")
}

/// Plain-text summary for a clinician. Field order is stable; the output is
/// meant to be read, not parsed.
pub fn generate_doctor_summary(assessment: &Assessment, check_ins: &[CheckIn]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "MATERNAL HEALTH CHECK-IN SUMMARY");
    let _ = writeln!(
        output,
        "Week {} | Generated {}",
        assessment.week,
        assessment.timestamp.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output, "{DISCLAIMER}");
    let _ = writeln!(output);
    let _ = writeln!(output, "RISK INDICATORS");

    let elevated: Vec<_> = assessment
        .indicators
        .iter()
        .filter(|i| i.level != RiskLevel::Low)
        .collect();

    if elevated.is_empty() {
        let _ = writeln!(output, "No elevated indicators.");
    } else {
        for indicator in elevated {
            let _ = writeln!(
                output,
                "{}: {} (confidence {}%)",
                condition_heading(indicator.condition),
                indicator.level.as_str().to_uppercase(),
                indicator.confidence
            );
            for trigger in &indicator.triggers {
                let _ = writeln!(output, "  - {trigger}");
            }
        }
    }

    let mut recent: Vec<&CheckIn> = check_ins.iter().collect();
    recent.sort_by(|a, b| b.week.cmp(&a.week));
    let _ = writeln!(output);
    let _ = writeln!(output, "RECENT CHECK-IN DATA");

    if recent.is_empty() {
        let _ = writeln!(output, "No check-ins recorded.");
    } else {
        for check_in in recent.iter().take(RECENT_CHECK_INS) {
            let mut line = format!(
                "Week {} ({}): mood {}/5, sleep {}/5, fatigue {}/5",
                check_in.week,
                check_in.date.format("%Y-%m-%d"),
                check_in.mood,
                check_in.sleep_quality,
                check_in.fatigue
            );
            if let Some(bp) = check_in.blood_pressure {
                let _ = write!(line, ", BP {bp} mmHg");
            }
            if let Some(sugar) = check_in.blood_sugar {
                let _ = write!(line, ", blood sugar {sugar} mg/dL");
            }
            let _ = writeln!(output, "{line}");
        }
    }

    output
}

/// Compact indicator summary handed to an external insight service. The
/// service only ever sees this text; nothing it returns feeds back into
/// levels, confidence or triggers.
pub fn insight_context(assessment: &Assessment) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Week {} overall risk: {}",
        assessment.week, assessment.overall_level
    );
    for indicator in &assessment.indicators {
        let triggers = if indicator.triggers.is_empty() {
            "none".to_string()
        } else {
            indicator.triggers.join("; ")
        };
        let _ = writeln!(
            output,
            "- {}: {} ({}), triggers: {}",
            indicator.condition, indicator.level, indicator.confidence, triggers
        );
    }
    output
}
