use chrono::{DateTime, Duration, TimeZone, Utc};
use maternal_risk::{
    assess_risk, assess_risk_at, build_risk_trajectory, generate_doctor_summary,
    history_before, ActionType, BloodPressure, CheckIn, Condition, RiskLevel,
};

fn at(week: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap() + Duration::weeks(i64::from(week))
}

fn uniform(week: u32, rating: u8) -> CheckIn {
    CheckIn {
        week,
        date: at(week),
        headache: rating,
        swelling: rating,
        sleep_quality: rating,
        fatigue: rating,
        mood: rating,
        dizziness: rating,
        blood_pressure: None,
        blood_sugar: None,
        activity_level: None,
    }
}

#[test]
fn very_low_mood_and_sleep_is_high_depression_risk() {
    let assessment = assess_risk(&uniform(16, 1), &[]);

    let mood = assessment.indicator(Condition::PerinatalDepression).unwrap();
    assert_eq!(mood.confidence, 50);
    assert_eq!(mood.level, RiskLevel::High);
    assert_eq!(mood.triggers.len(), 2);
    assert_eq!(assessment.level_for(Condition::Preeclampsia), RiskLevel::Low);
    assert_eq!(
        assessment.level_for(Condition::GestationalDiabetes),
        RiskLevel::Low
    );
    assert_eq!(assessment.overall_level, RiskLevel::High);
}

#[test]
fn persistent_swelling_with_high_pressure_alerts_doctor() {
    let week_one = CheckIn {
        swelling: 4,
        ..uniform(30, 1)
    };
    let week_two = CheckIn {
        swelling: 4,
        blood_pressure: Some(BloodPressure {
            systolic: 145,
            diastolic: 95,
        }),
        ..uniform(31, 1)
    };

    let assessment = assess_risk(&week_two, &[week_one]);
    let hypertensive = assessment.indicator(Condition::Preeclampsia).unwrap();
    assert_eq!(hypertensive.confidence, 60);
    assert_eq!(hypertensive.level, RiskLevel::High);
    assert!(assessment
        .system_actions
        .iter()
        .any(|a| a.action_type == ActionType::DoctorAlert));
}

#[test]
fn mid_range_single_check_in_is_quiet() {
    let assessment = assess_risk(&uniform(12, 3), &[]);
    assert!(assessment
        .indicators
        .iter()
        .all(|i| i.level == RiskLevel::Low));
    assert_eq!(assessment.overall_level, RiskLevel::Low);
    assert!(assessment.system_actions.is_empty());
}

#[test]
fn identical_inputs_give_identical_assessments() {
    let history = vec![
        CheckIn {
            fatigue: 4,
            activity_level: Some(4),
            ..uniform(21, 2)
        },
        uniform(20, 3),
    ];
    let current = CheckIn {
        fatigue: 5,
        activity_level: Some(2),
        blood_sugar: Some(150.0),
        ..uniform(22, 2)
    };

    let first = assess_risk_at(&current, &history, at(22));
    let second = assess_risk_at(&current, &history, at(22));
    assert_eq!(first, second);
}

#[test]
fn trajectory_is_exact_replay_without_lookahead() {
    let check_ins: Vec<CheckIn> = vec![
        CheckIn {
            mood: 2,
            sleep_quality: 4,
            blood_pressure: Some(BloodPressure {
                systolic: 118,
                diastolic: 76,
            }),
            ..uniform(24, 3)
        },
        CheckIn {
            swelling: 4,
            fatigue: 4,
            ..uniform(22, 2)
        },
        CheckIn {
            swelling: 4,
            mood: 1,
            sleep_quality: 2,
            blood_pressure: Some(BloodPressure {
                systolic: 131,
                diastolic: 88,
            }),
            ..uniform(25, 4)
        },
        uniform(23, 3),
    ];

    let points = build_risk_trajectory(&check_ins);
    assert_eq!(points.len(), check_ins.len());

    for point in &points {
        let current = check_ins.iter().find(|c| c.week == point.week).unwrap();
        let history = history_before(&check_ins, point.week);
        let expected = assess_risk(current, &history);

        assert_eq!(point.date, current.date);
        assert_eq!(point.overall_level, expected.overall_level);
        assert_eq!(
            point.preeclampsia,
            expected.level_for(Condition::Preeclampsia)
        );
        assert_eq!(
            point.gestational_diabetes,
            expected.level_for(Condition::GestationalDiabetes)
        );
        assert_eq!(
            point.perinatal_depression,
            expected.level_for(Condition::PerinatalDepression)
        );
    }
}

#[test]
fn overall_level_is_maximum_of_indicators() {
    for rating in 1..=5 {
        for bp in [None, Some((150, 85)), Some((120, 70))] {
            let current = CheckIn {
                blood_pressure: bp.map(|(systolic, diastolic)| BloodPressure {
                    systolic,
                    diastolic,
                }),
                ..uniform(28, rating)
            };
            let assessment = assess_risk(&current, &[uniform(27, rating)]);
            let max = assessment.indicators.iter().map(|i| i.level).max().unwrap();
            assert_eq!(assessment.overall_level, max);
        }
    }
}

#[test]
fn summary_reflects_assessment_and_recent_weeks() {
    let history = vec![
        CheckIn {
            swelling: 4,
            ..uniform(30, 1)
        },
        uniform(29, 2),
    ];
    let current = CheckIn {
        swelling: 4,
        blood_pressure: Some(BloodPressure {
            systolic: 145,
            diastolic: 95,
        }),
        blood_sugar: Some(101.0),
        ..uniform(31, 1)
    };
    let assessment = assess_risk_at(&current, &history, at(31));

    let mut check_ins = history.clone();
    check_ins.push(current);
    let summary = generate_doctor_summary(&assessment, &check_ins);

    assert!(summary.contains("RISK INDICATORS"));
    assert!(summary.contains("PREECLAMPSIA: HIGH (confidence 60%)"));
    assert!(summary.contains("  - Persistent swelling: 2 consecutive weeks"));
    assert!(summary.contains("BP 145/95 mmHg, blood sugar 101 mg/dL"));
    let weeks_pos = |w: &str| summary.find(w).unwrap();
    assert!(weeks_pos("Week 31 (") < weeks_pos("Week 30 ("));
}
