//! Rule-based maternal-health risk indicators.
//!
//! Scores weekly check-ins for three patterns (preeclampsia-like blood
//! pressure, gestational-diabetes-like glycemic changes, perinatal
//! depression-like mood changes), aggregates them into an assessment with
//! downstream actions, replays history into a trajectory and renders a
//! clinician summary. Pure and deterministic; no I/O. Not a diagnostic tool.

pub mod actions;
pub mod display;
pub mod error;
pub mod models;
pub mod report;
pub mod risk;
pub mod rules;
pub mod trajectory;
pub mod validate;

pub use display::{get_risk_level_display, RiskLevelDisplay};
pub use error::CheckInError;
pub use models::{
    ActionPriority, ActionType, Assessment, BloodPressure, CheckIn, Condition, RiskIndicator,
    RiskLevel, RiskTrajectoryPoint, SystemAction,
};
pub use report::generate_doctor_summary;
pub use risk::{assess_risk, assess_risk_at};
pub use trajectory::build_risk_trajectory;
pub use validate::{ensure_descending, history_before, validate_check_in};
