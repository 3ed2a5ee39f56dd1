use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: u16,
    pub diastolic: u16,
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// One weekly self-reported check-in.
///
/// Ratings are 1-5. `sleep_quality` and `mood` run the other way from the
/// symptom ratings: 1 is poor, 5 is excellent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub week: u32,
    pub date: DateTime<Utc>,
    pub headache: u8,
    pub swelling: u8,
    pub sleep_quality: u8,
    pub fatigue: u8,
    pub mood: u8,
    pub dizziness: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<BloodPressure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_sugar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            50.. => RiskLevel::High,
            25..=49 => RiskLevel::Moderate,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Preeclampsia,
    GestationalDiabetes,
    PerinatalDepression,
}

impl Condition {
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Preeclampsia => "preeclampsia",
            Condition::GestationalDiabetes => "gestational_diabetes",
            Condition::PerinatalDepression => "perinatal_depression",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskIndicator {
    pub condition: Condition,
    pub level: RiskLevel,
    /// Additive rule score capped at 100.
    pub confidence: u32,
    pub triggers: Vec<String>,
    pub explanation: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    NutritionAdjust,
    ChatTone,
    CommunitySuggest,
    DoctorAlert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPriority {
    Low,
    Medium,
    High,
}

impl ActionPriority {
    /// Priority that mirrors a non-low risk level.
    pub fn mirroring(level: RiskLevel) -> Self {
        match level {
            RiskLevel::High => ActionPriority::High,
            _ => ActionPriority::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub description: String,
    pub priority: ActionPriority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub overall_level: RiskLevel,
    pub week: u32,
    pub timestamp: DateTime<Utc>,
    pub indicators: Vec<RiskIndicator>,
    pub system_actions: Vec<SystemAction>,
}

impl Assessment {
    pub fn indicator(&self, condition: Condition) -> Option<&RiskIndicator> {
        self.indicators.iter().find(|i| i.condition == condition)
    }

    pub fn level_for(&self, condition: Condition) -> RiskLevel {
        self.indicator(condition)
            .map(|i| i.level)
            .unwrap_or(RiskLevel::Low)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskTrajectoryPoint {
    pub week: u32,
    pub date: DateTime<Utc>,
    pub overall_level: RiskLevel,
    pub preeclampsia: RiskLevel,
    pub gestational_diabetes: RiskLevel,
    pub perinatal_depression: RiskLevel,
}
