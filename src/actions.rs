use crate::models::{
    ActionPriority, ActionType, Condition, RiskIndicator, RiskLevel, SystemAction,
};

fn level_of(indicators: &[RiskIndicator], condition: Condition) -> RiskLevel {
    indicators
        .iter()
        .find(|i| i.condition == condition)
        .map(|i| i.level)
        .unwrap_or(RiskLevel::Low)
}

fn action(action_type: ActionType, description: &str, priority: ActionPriority) -> SystemAction {
    SystemAction {
        action_type,
        description: description.to_string(),
        priority,
    }
}

/// Maps indicators to downstream directives. Order is significant and
/// entries are never merged.
pub fn derive_actions(indicators: &[RiskIndicator]) -> Vec<SystemAction> {
    let mut actions = Vec::new();
    let highest = indicators
        .iter()
        .map(|i| i.level)
        .max()
        .unwrap_or(RiskLevel::Low);

    match highest {
        RiskLevel::High => actions.push(action(
            ActionType::ChatTone,
            "Switch to a more compassionate tone and acknowledge how they are feeling",
            ActionPriority::High,
        )),
        RiskLevel::Moderate => actions.push(action(
            ActionType::ChatTone,
            "Check in more gently and ask open follow-up questions",
            ActionPriority::Medium,
        )),
        RiskLevel::Low => {}
    }

    let glycemic = level_of(indicators, Condition::GestationalDiabetes);
    if glycemic != RiskLevel::Low {
        actions.push(action(
            ActionType::NutritionAdjust,
            "Prioritise low-glycemic meals with steady carbohydrates and added fibre",
            ActionPriority::mirroring(glycemic),
        ));
    }

    let hypertensive = level_of(indicators, Condition::Preeclampsia);
    if hypertensive != RiskLevel::Low {
        actions.push(action(
            ActionType::NutritionAdjust,
            "Favour blood-pressure friendly meals: lower sodium, more potassium and calcium",
            ActionPriority::mirroring(hypertensive),
        ));
    }

    let mood = level_of(indicators, Condition::PerinatalDepression);
    if mood != RiskLevel::Low {
        actions.push(action(
            ActionType::CommunitySuggest,
            "Surface peer support groups and community mental health resources",
            ActionPriority::mirroring(mood),
        ));
    }

    if highest == RiskLevel::High {
        actions.push(action(
            ActionType::DoctorAlert,
            "Doctor-ready summary available to share with their care team",
            ActionPriority::High,
        ));
    }

    actions
}
