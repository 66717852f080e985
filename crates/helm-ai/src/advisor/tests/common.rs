use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::advisor::store::{SessionId, SessionRecord, SessionStore, StoreError};
use crate::advisor::{InterviewConfig, InterviewEngine, InterviewService};
use crate::analytics::{AnalyticsSink, InterviewEvent};
use crate::catalog::{
    Catalog, CatalogSettings, ClassGuide, ClassId, ClassProfile, Effect, GuideLink, OptionSpec,
    Question, QuestionId, RawOption,
};
use crate::commentary::{CommentaryProvider, RemarkRequest};

pub(super) fn class(id: &str, name: &str) -> ClassProfile {
    ClassProfile {
        class_id: ClassId(id.to_string()),
        name: name.to_string(),
        summary: format!("{name} summary"),
    }
}

pub(super) fn effect(
    question: &str,
    option: &str,
    exclude: &[&str],
    up: &[&str],
    down: &[&str],
) -> Effect {
    let ids = |names: &[&str]| names.iter().map(|n| ClassId(n.to_string())).collect();
    Effect {
        question_id: QuestionId(question.to_string()),
        option: option.to_string(),
        exclude: ids(exclude),
        up: ids(up),
        down: ids(down),
    }
}

pub(super) fn sample_catalog() -> Catalog {
    let questions = vec![
        Question {
            id: QuestionId("q_guests".to_string()),
            text: "How many guests do you usually host aboard?".to_string(),
            phase: 1,
            priority: 2,
            options: OptionSpec::Structured(vec![
                RawOption {
                    label: "Up to 4".to_string(),
                    id: None,
                },
                RawOption {
                    label: "Five to twelve".to_string(),
                    id: None,
                },
                RawOption {
                    label: "More than 12".to_string(),
                    id: None,
                },
            ]),
        },
        Question {
            id: QuestionId("q_range".to_string()),
            text: "Where will you spend most of your time on the water?".to_string(),
            phase: 1,
            priority: 1,
            options: OptionSpec::Inline("Coastal, Open ocean, Marina".to_string()),
        },
        Question {
            id: QuestionId("q_propulsion".to_string()),
            text: "Do you prefer sail or motor?".to_string(),
            phase: 2,
            priority: 0,
            options: OptionSpec::Inline("Sail, Motor".to_string()),
        },
        Question {
            id: QuestionId("q_crew".to_string()),
            text: "Will you run the boat yourself?".to_string(),
            phase: 2,
            priority: 0,
            options: OptionSpec::Inline("Run it myself, Professional crew".to_string()),
        },
    ];

    let effects = vec![
        effect("q_guests", "Up to 4", &[], &["day_cruiser"], &[]),
        effect("q_guests", "More than 12", &["day_cruiser"], &["motor_yacht"], &[]),
        effect("q_range", "Coastal", &["explorer"], &["day_cruiser"], &[]),
        effect("q_range", "Open ocean", &["day_cruiser"], &["explorer"], &[]),
        effect("q_propulsion", "Sail", &[], &["sailing_yacht"], &["motor_yacht"]),
        effect("q_propulsion", "Motor", &[], &["motor_yacht"], &["sailing_yacht"]),
        effect("q_crew", "Professional crew", &[], &["motor_yacht"], &[]),
    ];

    let classes = vec![
        class("day_cruiser", "Day Cruiser"),
        class("sailing_yacht", "Sailing Yacht"),
        class("motor_yacht", "Motor Yacht"),
        class("explorer", "Explorer Yacht"),
    ];

    let mut guides = BTreeMap::new();
    guides.insert(
        ClassId("day_cruiser".to_string()),
        ClassGuide {
            tips: vec!["Keep the layout simple".to_string()],
            links: vec![GuideLink {
                label: "Day Cruiser builders".to_string(),
                href: "https://example.com/day-cruisers".to_string(),
            }],
        },
    );

    Catalog::new(questions, effects, classes, guides, CatalogSettings::default())
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionStore for MemoryStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.session_id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(record.session_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySink {
    events: Arc<Mutex<Vec<InterviewEvent>>>,
}

impl MemorySink {
    pub(super) fn events(&self) -> Vec<InterviewEvent> {
        self.events.lock().expect("sink mutex poisoned").clone()
    }
}

#[async_trait]
impl AnalyticsSink for MemorySink {
    async fn record(&self, event: InterviewEvent) {
        self.events.lock().expect("sink mutex poisoned").push(event);
    }
}

#[derive(Default, Clone)]
pub(super) struct CannedCommentary {
    pub(super) remark: Option<String>,
}

#[async_trait]
impl CommentaryProvider for CannedCommentary {
    async fn remark(&self, _request: &RemarkRequest) -> Option<String> {
        self.remark.clone()
    }
}

pub(super) fn build_service() -> (
    InterviewService<MemoryStore, MemorySink, CannedCommentary>,
    Arc<MemorySink>,
) {
    build_service_with_commentary(CannedCommentary::default())
}

pub(super) fn build_service_with_commentary(
    commentary: CannedCommentary,
) -> (
    InterviewService<MemoryStore, MemorySink, CannedCommentary>,
    Arc<MemorySink>,
) {
    let engine = Arc::new(InterviewEngine::new(
        Arc::new(sample_catalog()),
        InterviewConfig::default(),
    ));
    let store = Arc::new(MemoryStore::default());
    let sink = Arc::new(MemorySink::default());
    let service = InterviewService::new(engine, store, sink.clone(), Arc::new(commentary));
    (service, sink)
}

/// Lets spawned analytics tasks run on the test runtime.
pub(super) async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
