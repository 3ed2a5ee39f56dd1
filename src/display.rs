use serde::Serialize;

use crate::models::RiskLevel;

/// Presentation metadata for a risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskLevelDisplay {
    pub label: &'static str,
    pub message: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

const LOW: RiskLevelDisplay = RiskLevelDisplay {
    label: "Low",
    message: "Everything looks on track this week.",
    color: "#2E7D32",
    icon: "check-circle",
};

const MODERATE: RiskLevelDisplay = RiskLevelDisplay {
    label: "Moderate",
    message: "A few signs are worth keeping an eye on.",
    color: "#F9A825",
    icon: "alert-circle",
};

const HIGH: RiskLevelDisplay = RiskLevelDisplay {
    label: "High",
    message: "Please reach out to your care team soon.",
    color: "#C62828",
    icon: "alert-triangle",
};

pub fn get_risk_level_display(level: RiskLevel) -> RiskLevelDisplay {
    match level {
        RiskLevel::Low => LOW,
        RiskLevel::Moderate => MODERATE,
        RiskLevel::High => HIGH,
    }
}
