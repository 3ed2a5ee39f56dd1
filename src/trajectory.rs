use crate::models::{CheckIn, Condition, RiskTrajectoryPoint};
use crate::risk;

/// Replays the assessment for every check-in, oldest first. Each point only
/// sees the check-ins that precede it.
pub fn build_risk_trajectory(check_ins: &[CheckIn]) -> Vec<RiskTrajectoryPoint> {
    let mut sorted: Vec<&CheckIn> = check_ins.iter().collect();
    sorted.sort_by_key(|c| c.week);

    let mut points = Vec::with_capacity(sorted.len());
    for (index, current) in sorted.iter().enumerate() {
        let history: Vec<CheckIn> = sorted[..index]
            .iter()
            .rev()
            .map(|c| (*c).clone())
            .collect();
        let assessment = risk::assess_risk_at(current, &history, current.date);

        points.push(RiskTrajectoryPoint {
            week: current.week,
            date: current.date,
            overall_level: assessment.overall_level,
            preeclampsia: assessment.level_for(Condition::Preeclampsia),
            gestational_diabetes: assessment.level_for(Condition::GestationalDiabetes),
            perinatal_depression: assessment.level_for(Condition::PerinatalDepression),
        });
    }

    points
}
