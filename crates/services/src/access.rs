//! Plan/role gating predicates. Pure, never panic, deny by default.

use fluxo_db::models::{PlanConfig, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Expenses,
    AiAssistant,
    VoiceCommands,
}

/// Admins bypass every feature gate; everyone else needs the flag on
/// their plan. A missing plan config denies.
pub fn can_access_feature(user: &User, feature: Feature, plan: Option<&PlanConfig>) -> bool {
    if user.is_admin() {
        return true;
    }
    let Some(plan) = plan else {
        return false;
    };
    match feature {
        Feature::Expenses => plan.features.expenses,
        Feature::AiAssistant => plan.features.ai_assistant,
        Feature::VoiceCommands => plan.features.voice_commands,
    }
}

/// `-1` is the "unlimited" sentinel and is never exceeded.
pub fn can_create(current_count: u64, limit: i64) -> bool {
    limit == -1 || (current_count as i64) < limit
}
