use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::session::Session;
use crate::catalog::{ClassGuide, ClassId, ClassProfile, GuideLink};

const TIP_LIMIT: usize = 7;
const LINK_LIMIT: usize = 5;

// Generic rationale bullets; intentionally not derived from the answers.
const RATIONALE: [&str; 3] = [
    "Matches your comfort and usage profile.",
    "Suitable for your guest count and trip length.",
    "Aligned with your stability and propulsion preferences.",
];

/// Final recommendation payload assembled for the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub class_id: ClassId,
    pub name: String,
    pub summary: String,
    pub why: Vec<String>,
    pub tips: Vec<String>,
    pub links: Vec<GuideLink>,
}

/// Terminal state of an interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InterviewConclusion {
    Recommended(Recommendation),
    /// Every class was excluded; there is no honest recommendation to give.
    Undetermined,
}

impl InterviewConclusion {
    pub fn summary(&self) -> String {
        match self {
            InterviewConclusion::Recommended(recommendation) => {
                format!("recommended class: {}", recommendation.name)
            }
            InterviewConclusion::Undetermined => "no class remained in contention".to_string(),
        }
    }
}

/// Picks the winner among non-excluded classes and assembles the payload.
///
/// Ranking is by score descending; ties fall to catalog position, which keeps
/// the result deterministic across runs. Missing class metadata falls back to
/// the raw identifier, and a missing guide yields empty tips/links.
pub fn conclude(
    session: &Session,
    classes: &[ClassProfile],
    guides: &BTreeMap<ClassId, ClassGuide>,
) -> InterviewConclusion {
    // Candidates in catalog order so the stable sort below resolves ties;
    // scored ids absent from the catalog still compete, after the known ones.
    let mut candidates: Vec<ClassId> = classes
        .iter()
        .map(|class| class.class_id.clone())
        .filter(|class_id| session.scores.contains_key(class_id))
        .collect();
    for class_id in session.scores.keys() {
        if !candidates.contains(class_id) {
            candidates.push(class_id.clone());
        }
    }
    candidates.retain(|class_id| !session.is_excluded(class_id));

    if candidates.is_empty() {
        return InterviewConclusion::Undetermined;
    }

    candidates.sort_by(|a, b| {
        let score = |id: &ClassId| session.scores.get(id).copied().unwrap_or(0);
        score(b).cmp(&score(a))
    });
    let winner = &candidates[0];

    let profile = classes.iter().find(|class| class.class_id == *winner);
    let guide = guides.get(winner).cloned().unwrap_or_default();

    InterviewConclusion::Recommended(Recommendation {
        class_id: winner.clone(),
        name: profile
            .map(|class| class.name.clone())
            .unwrap_or_else(|| winner.0.clone()),
        summary: profile
            .map(|class| class.summary.clone())
            .unwrap_or_default(),
        why: RATIONALE.iter().map(|line| line.to_string()).collect(),
        tips: guide.tips.into_iter().take(TIP_LIMIT).collect(),
        links: guide.links.into_iter().take(LINK_LIMIT).collect(),
    })
}
