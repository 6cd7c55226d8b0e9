use super::domain::{AiIntent, IntentTier};

/// Final scores at or above this land in the High tier.
pub const HIGH_TIER_THRESHOLD: u8 = 70;
/// Final scores at or above this (and below the High threshold) land in
/// the Medium tier.
pub const MEDIUM_TIER_THRESHOLD: u8 = 40;

/// AI-score contribution of a classifier outcome. Unknown (classification
/// failed) contributes nothing, leaving the final score rule-only.
pub const fn intent_points(intent: AiIntent) -> u8 {
    match intent {
        AiIntent::High => 50,
        AiIntent::Medium => 30,
        AiIntent::Low => 10,
        AiIntent::Unknown => 0,
    }
}

/// Tier from the blended score. Independent of the raw classifier label;
/// a High verdict on a sparse profile can still end up Medium.
pub const fn intent_tier(final_score: u8) -> IntentTier {
    if final_score >= HIGH_TIER_THRESHOLD {
        IntentTier::High
    } else if final_score >= MEDIUM_TIER_THRESHOLD {
        IntentTier::Medium
    } else {
        IntentTier::Low
    }
}

/// Blended outcome for one lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinedScore {
    pub ai_score: u8,
    pub final_score: u8,
    pub tier: IntentTier,
}

/// Merge the rule score with the classifier outcome. The sum is naturally
/// bounded to [0, 100] given rule <= 50 and ai <= 50.
pub fn combine(rule_score: u8, intent: AiIntent) -> CombinedScore {
    let ai_score = intent_points(intent);
    let final_score = rule_score + ai_score;

    CombinedScore {
        ai_score,
        final_score,
        tier: intent_tier(final_score),
    }
}
