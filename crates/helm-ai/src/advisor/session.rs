use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::{ClassId, ClassProfile, QuestionId};

/// Mutable per-user progress record. The interaction loop owns exactly one
/// `Session` per user and threads it through every engine call; nothing else
/// holds a reference to it.
///
/// Invariants: `asked` never contains duplicates and never shrinks; every key
/// of `scores` is present from initialization and is never removed (exclusion
/// is tracked separately so an excluded class's score stays inspectable);
/// `excluded` only grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub asked: Vec<QuestionId>,
    pub answers: BTreeMap<QuestionId, String>,
    pub excluded: BTreeSet<ClassId>,
    pub scores: BTreeMap<ClassId, i32>,
    pub user_language: String,
}

impl Session {
    /// Initializes a fresh session with every catalog class scored at zero.
    pub fn new(classes: &[ClassProfile]) -> Self {
        Self {
            asked: Vec::new(),
            answers: BTreeMap::new(),
            excluded: BTreeSet::new(),
            scores: classes
                .iter()
                .map(|class| (class.class_id.clone(), 0))
                .collect(),
            user_language: "en".to_string(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.user_language = language.into();
        self
    }

    /// Records an answered question. Repeat ids never duplicate the `asked`
    /// history; the stored answer is the latest one given.
    pub fn record_answer(&mut self, question_id: &QuestionId, option_label: &str) {
        if !self.asked.contains(question_id) {
            self.asked.push(question_id.clone());
        }
        self.answers
            .insert(question_id.clone(), option_label.to_string());
    }

    pub fn is_excluded(&self, class_id: &ClassId) -> bool {
        self.excluded.contains(class_id)
    }

    /// Classes still in contention, in score-map order.
    pub fn alive_classes(&self) -> Vec<&ClassId> {
        self.scores
            .keys()
            .filter(|class_id| !self.excluded.contains(*class_id))
            .collect()
    }
}
