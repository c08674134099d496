//! Multi-session flow tests against the library API.
//!
//! Seeds a profile, runs several scripted sessions through the engine and
//! checks the stored weights and the saved session reports.

use lexidrill_core::model::{Category, CategorySelector, Direction};
use lexidrill_core::report::SessionReport;
use lexidrill_core::sampler::SamplingStrategy;
use lexidrill_core::seed::parse_seed_str;
use lexidrill_core::session::ScriptedResponder;
use lexidrill_core::store::ProfileStore;
use lexidrill_core::{DrillConfig, DrillEngine, DrillError};

const SEED: &str = r#"
[[blocks]]
category = "verb"
pairs = [["gehen", "aller"], ["machen", "faire"], ["sehen", "voir"]]

[[blocks]]
category = "general"
pairs = [["das Haus", "la maison"], ["  ", "vide"], ["der Zug", "le train"]]
"#;

fn setup() -> (tempfile::TempDir, DrillEngine) {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path().join("profiles"));
    let seed = parse_seed_str(SEED, "seed.toml".as_ref()).unwrap();
    store.create("anna", &seed.build()).unwrap();
    (dir, DrillEngine::new(store))
}

fn verbs(count: usize, seed: u64, strategy: SamplingStrategy) -> DrillConfig {
    DrillConfig {
        selector: CategorySelector::Only(Category::Verb),
        direction: Direction::SecondaryToPrimary,
        count,
        seed: Some(seed),
        strategy,
    }
}

#[test]
fn repeated_sessions_compound_weights() {
    let (_dir, engine) = setup();

    for _ in 0..2 {
        let mut responder = ScriptedResponder::new(["?"; 3], ["3"; 3]);
        engine
            .run("anna", &verbs(3, 1, SamplingStrategy::TopUp), &mut responder)
            .unwrap();
    }

    let lexicon = engine.store().load("anna").unwrap();
    assert_eq!(lexicon.len(), 5);
    for row in &lexicon.rows {
        match row.category {
            // 1.5 -> 2.25 -> 2.625
            Category::Verb => assert_eq!(row.weight, 2.625),
            _ => assert_eq!(row.weight, 1.5),
        }
    }
}

#[test]
fn report_round_trip_through_json() {
    let (dir, engine) = setup();
    let mut responder = ScriptedResponder::new(["allez", "faire"], ["2", "0"]);
    let report = engine
        .run(
            "anna",
            &verbs(2, 42, SamplingStrategy::Reservoir),
            &mut responder,
        )
        .unwrap();

    assert_eq!(report.population, 3);
    assert_eq!(report.weights_changed, 2);
    assert!(responder
        .shown()
        .iter()
        .all(|card| card.prompt_language == "French"));

    let path = dir.path().join("reports").join("session.json");
    report.save_json(&path).unwrap();
    let loaded = SessionReport::load_json(&path).unwrap();
    assert_eq!(loaded.id, report.id);
    assert_eq!(loaded.entries, report.entries);
    assert_eq!(loaded.config, report.config);
    assert_eq!(loaded.mean_rating(), Some(1.0));
}

#[test]
fn seeded_sessions_draw_the_same_words() {
    let draw = |seed: u64| {
        let (_dir, engine) = setup();
        let mut responder = ScriptedResponder::new(["?"; 2], ["1"; 2]);
        engine
            .run("anna", &verbs(2, seed, SamplingStrategy::TopUp), &mut responder)
            .unwrap()
            .entries
            .into_iter()
            .map(|e| e.prompt)
            .collect::<Vec<_>>()
    };
    assert_eq!(draw(9), draw(9));
}

#[test]
fn whole_lexicon_session_keeps_row_order() {
    let (_dir, engine) = setup();
    let before = engine.store().load("anna").unwrap();

    let config = DrillConfig {
        count: 5,
        seed: Some(5),
        ..Default::default()
    };
    let mut responder = ScriptedResponder::new(["?"; 5], ["0"; 5]);
    let report = engine.run("anna", &config, &mut responder).unwrap();
    assert_eq!(report.entries.len(), 5);

    let after = engine.store().load("anna").unwrap();
    assert_eq!(after.len(), before.len());
    for (b, a) in before.rows.iter().zip(&after.rows) {
        assert_eq!((&a.primary, &a.secondary), (&b.primary, &b.secondary));
        assert_eq!(a.weight, 0.75);
    }
}

#[test]
fn request_errors_are_classified() {
    let (_dir, engine) = setup();
    let mut responder = ScriptedResponder::default();
    let err = engine
        .run(
            "anna",
            &DrillConfig {
                selector: CategorySelector::Only(Category::Adjective),
                count: 1,
                ..Default::default()
            },
            &mut responder,
        )
        .unwrap_err();
    let drill = err.downcast_ref::<DrillError>().unwrap();
    assert!(drill.is_request_error());
    assert!(matches!(drill, DrillError::UnknownCategory(_)));
}
