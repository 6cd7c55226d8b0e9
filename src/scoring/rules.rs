use super::domain::{LeadProfile, Offer, RuleFactor, ScoreComponent};

/// Upper bound of the deterministic rule score.
pub const MAX_RULE_SCORE: u8 = 50;

pub(crate) struct RoleTier {
    pub(crate) label: &'static str,
    pub(crate) points: u8,
    pub(crate) keywords: &'static [&'static str],
}

/// Ordered role tiers; the first tier with a matching keyword wins, so a
/// role matching both ("Senior Director") lands in the decision-maker tier.
pub(crate) const ROLE_TIERS: &[RoleTier] = &[
    RoleTier {
        label: "decision maker",
        points: 20,
        keywords: &[
            "ceo",
            "cto",
            "cfo",
            "cmo",
            "coo",
            "president",
            "founder",
            "owner",
            "head of",
            "director",
            "vp",
            "vice president",
            "chief",
        ],
    },
    RoleTier {
        label: "influencer",
        points: 10,
        keywords: &[
            "manager",
            "lead",
            "senior",
            "principal",
            "architect",
            "specialist",
        ],
    },
];

pub(crate) const ADJACENT_INDUSTRY_KEYWORDS: &[&str] =
    &["tech", "software", "saas", "technology", "digital", "online"];

const COMPLETENESS_POINTS_PER_FIELD: u8 = 2;
const COMPLETENESS_CAP: u8 = 10;

/// Deterministic rule score for one lead against the active offer. Pure and
/// total; missing fields contribute zero rather than failing.
pub fn score_profile(offer: &Offer, profile: &LeadProfile) -> (Vec<ScoreComponent>, u8) {
    let components = vec![
        role_relevance(&profile.role),
        industry_match(&profile.industry, &offer.ideal_use_cases),
        data_completeness(profile),
    ];

    let total = components
        .iter()
        .map(|component| component.points)
        .sum::<u8>();

    (components, total)
}

fn role_relevance(role: &str) -> ScoreComponent {
    let role_lower = role.trim().to_lowercase();

    if !role_lower.is_empty() {
        for tier in ROLE_TIERS {
            if let Some(keyword) = tier
                .keywords
                .iter()
                .find(|keyword| role_lower.contains(*keyword))
            {
                return ScoreComponent {
                    factor: RuleFactor::RoleRelevance,
                    points: tier.points,
                    notes: format!("'{keyword}' matches the {} tier", tier.label),
                };
            }
        }
    }

    ScoreComponent {
        factor: RuleFactor::RoleRelevance,
        points: 0,
        notes: "role missing or matches no tier".to_string(),
    }
}

fn industry_match(industry: &str, ideal_use_cases: &[String]) -> ScoreComponent {
    let industry_lower = industry.trim().to_lowercase();

    if !industry_lower.is_empty() {
        if let Some(use_case) = ideal_use_cases
            .iter()
            .find(|use_case| use_case.trim().to_lowercase() == industry_lower)
        {
            return ScoreComponent {
                factor: RuleFactor::IndustryMatch,
                points: 20,
                notes: format!("exact match on ideal use case '{}'", use_case.trim()),
            };
        }

        let adjacent = ADJACENT_INDUSTRY_KEYWORDS
            .iter()
            .find(|keyword| industry_lower.contains(*keyword));
        if let Some(keyword) = adjacent {
            return ScoreComponent {
                factor: RuleFactor::IndustryMatch,
                points: 10,
                notes: format!("adjacent technology keyword '{keyword}'"),
            };
        }
    }

    ScoreComponent {
        factor: RuleFactor::IndustryMatch,
        points: 0,
        notes: "industry missing or unrelated to the offer".to_string(),
    }
}

fn data_completeness(profile: &LeadProfile) -> ScoreComponent {
    let populated = profile.populated_fields();
    let points = COMPLETENESS_CAP.min(populated as u8 * COMPLETENESS_POINTS_PER_FIELD);

    ScoreComponent {
        factor: RuleFactor::DataCompleteness,
        points,
        notes: format!("{populated} of 6 profile fields populated"),
    }
}
