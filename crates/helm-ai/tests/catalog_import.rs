//! Integration coverage for loading a catalog data directory and for the
//! spreadsheet effect import agreeing with the JSON encoding.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use helm_ai::catalog::{Catalog, ClassId, EffectSheetImporter, OptionSpec, QuestionId};

fn write_sample_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("helm-catalog-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir).expect("create catalog dir");

    fs::write(
        dir.join("questions.json"),
        r#"[
            {"id": "q_guests", "text": "How many guests?", "phase": 1, "priority": 2,
             "options": [{"label": "Up to 4"}, {"label": "More than 12"}]},
            {"id": "q_range", "text": "Where will you cruise?", "phase": 2,
             "options": "Coastal, Open ocean"}
        ]"#,
    )
    .expect("write questions");

    fs::write(
        dir.join("effects.json"),
        r#"[
            {"question_id": "q_guests", "option": "More than 12",
             "exclude": ["day_cruiser"], "up": ["motor_yacht"]},
            {"question_id": "q_range", "option": "Open ocean", "up": ["explorer"]}
        ]"#,
    )
    .expect("write effects");

    fs::write(
        dir.join("classes.json"),
        r#"[
            {"class_id": "day_cruiser", "name": "Day Cruiser", "summary": "Short hops."},
            {"class_id": "motor_yacht", "name": "Motor Yacht"},
            {"class_id": "explorer", "name": "Explorer Yacht", "summary": "Long range."}
        ]"#,
    )
    .expect("write classes");

    fs::write(
        dir.join("tips_links.json"),
        r#"{
            "explorer": {
                "tips": ["Plan fuel stops"],
                "links": [{"label": "Yards", "href": "https://example.com/yards"}]
            }
        }"#,
    )
    .expect("write guides");

    dir
}

#[test]
fn from_dir_loads_every_collection_and_tolerates_missing_settings() {
    let dir = write_sample_dir("load");
    let catalog = Catalog::from_dir(&dir).expect("catalog loads");

    assert_eq!(catalog.questions().len(), 2);
    assert_eq!(catalog.effects().len(), 2);
    assert_eq!(catalog.classes().len(), 3);
    assert!(catalog.settings().webhook_url.is_none());

    let question = catalog
        .question(&QuestionId("q_range".to_string()))
        .expect("question present");
    assert!(matches!(question.options, OptionSpec::Inline(_)));

    let missing_summary = catalog
        .class(&ClassId("motor_yacht".to_string()))
        .expect("class present");
    assert!(missing_summary.summary.is_empty());

    let guide = catalog
        .guides()
        .get(&ClassId("explorer".to_string()))
        .expect("guide present");
    assert_eq!(guide.tips, vec!["Plan fuel stops".to_string()]);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn settings_file_is_read_when_present() {
    let dir = write_sample_dir("settings");
    fs::write(
        dir.join("config.json"),
        r#"{"webhookUrl": "https://hooks.example.com/interview"}"#,
    )
    .expect("write settings");

    let catalog = Catalog::from_dir(&dir).expect("catalog loads");
    assert_eq!(
        catalog.settings().webhook_url.as_deref(),
        Some("https://hooks.example.com/interview")
    );

    fs::remove_dir_all(dir).ok();
}

#[test]
fn effect_sheet_rows_match_the_json_encoding() {
    let csv = "Question ID,Option,Exclude,Up,Down\n\
q_guests,More than 12,day_cruiser,motor_yacht,\n";
    let effects = EffectSheetImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

    let from_json: Vec<helm_ai::catalog::Effect> = serde_json::from_str(
        r#"[{"question_id": "q_guests", "option": "More than 12",
             "exclude": ["day_cruiser"], "up": ["motor_yacht"]}]"#,
    )
    .expect("json effects parse");

    assert_eq!(effects, from_json);
}
