// エンドツーエンド統合テスト
// 実ファイルシステム上で分類 → 候補提示 → リネームまでを通す
#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::{create_image, file_names, ScriptedClassifier, ScriptedPrompter, SharedOutput};
use image_namer::{
    core::{JoinPolicy, SessionSummary},
    engine::RenameEngine,
    services::{DefaultNamerConfig, InlineImagePreview, NoOpProgressReporter, NoPreview},
    storage::local::LocalStorageBackend,
};
use std::path::PathBuf;
use tempfile::TempDir;

#[tokio::test]
async fn test_scenario_a_two_suggestions_with_three_stars() {
    let temp_dir = TempDir::new().unwrap();
    create_image(temp_dir.path(), "cat.jpg");

    let classifier = ScriptedClassifier::new().with_labels("cat.jpg", 0, &[("tabby, tiger cat", 0.95)]);
    let output = SharedOutput::new();

    let engine = RenameEngine::new(
        classifier,
        LocalStorageBackend::new(),
        ScriptedPrompter::new(&["1"]),
        NoPreview,
        NoOpProgressReporter::new(),
        DefaultNamerConfig::default(),
        temp_dir.path(),
    );

    let summary = engine
        .run(&[PathBuf::from("cat.jpg")], output.clone())
        .await
        .unwrap();

    let text = output.contents();
    assert!(text.contains("1: tabby.jpg ⭐️⭐️⭐️"));
    assert!(text.contains("2: tiger cat.jpg ⭐️⭐️⭐️"));
    assert!(!text.contains("3: "));
    assert!(text.contains("renamed to"));

    assert_eq!(summary.renamed, 1);
    assert_eq!(file_names(temp_dir.path()), vec!["tabby.jpg"]);
}

#[tokio::test]
async fn test_scenario_b_existing_file_is_disambiguated() {
    let temp_dir = TempDir::new().unwrap();
    create_image(temp_dir.path(), "cat.jpg");
    create_image(temp_dir.path(), "tabby.jpg");

    let classifier = ScriptedClassifier::new().with_labels("cat.jpg", 0, &[("tabby, tiger cat", 0.95)]);
    let output = SharedOutput::new();

    let engine = RenameEngine::new(
        classifier,
        LocalStorageBackend::new(),
        ScriptedPrompter::new(&["1"]),
        NoPreview,
        NoOpProgressReporter::new(),
        DefaultNamerConfig::default(),
        temp_dir.path(),
    );

    engine
        .run(&[PathBuf::from("cat.jpg")], output.clone())
        .await
        .unwrap();

    assert!(output.contents().contains("1: tabby (1).jpg"));
    assert_eq!(
        file_names(temp_dir.path()),
        vec!["tabby (1).jpg", "tabby.jpg"]
    );
}

#[tokio::test]
async fn test_scenario_c_out_of_range_leaves_files_untouched() {
    let temp_dir = TempDir::new().unwrap();
    create_image(temp_dir.path(), "cat.jpg");
    create_image(temp_dir.path(), "dog.jpg");

    let classifier = ScriptedClassifier::new()
        .with_labels("cat.jpg", 0, &[("tabby, tiger cat", 0.95), ("Egyptian cat", 0.03)])
        .with_labels("dog.jpg", 0, &[("pug, pug-dog", 0.8)]);

    let engine = RenameEngine::new(
        classifier,
        LocalStorageBackend::new(),
        ScriptedPrompter::new(&["0", "tabby"]),
        NoPreview,
        NoOpProgressReporter::new(),
        DefaultNamerConfig::default(),
        temp_dir.path(),
    );

    let summary = engine
        .run(
            &[PathBuf::from("cat.jpg"), PathBuf::from("dog.jpg")],
            SharedOutput::new(),
        )
        .await
        .unwrap();

    assert_eq!(
        summary,
        SessionSummary {
            renamed: 0,
            skipped: 2,
            failed: 0
        }
    );
    assert_eq!(file_names(temp_dir.path()), vec!["cat.jpg", "dog.jpg"]);
}

#[tokio::test]
async fn test_scenario_d_presentation_follows_input_order() {
    let temp_dir = TempDir::new().unwrap();
    create_image(temp_dir.path(), "first.jpg");
    create_image(temp_dir.path(), "second.png");

    // 2枚目の方が先に分類を終える
    let classifier = ScriptedClassifier::new()
        .with_labels("first.jpg", 150, &[("tabby", 0.7)])
        .with_labels("second.png", 0, &[("pug", 0.6)]);
    let completion_log = classifier.completion_log();
    let output = SharedOutput::new();

    let engine = RenameEngine::new(
        classifier,
        LocalStorageBackend::new(),
        ScriptedPrompter::new(&["1", "1"]),
        NoPreview,
        NoOpProgressReporter::new(),
        DefaultNamerConfig::default(),
        temp_dir.path(),
    );

    engine
        .run(
            &[PathBuf::from("first.jpg"), PathBuf::from("second.png")],
            output.clone(),
        )
        .await
        .unwrap();

    assert_eq!(
        *completion_log.lock().unwrap(),
        vec![PathBuf::from("second.png"), PathBuf::from("first.jpg")]
    );

    let text = output.contents();
    let first_at = text.find("1: tabby.jpg").unwrap();
    let second_at = text.find("1: pug.png").unwrap();
    assert!(first_at < second_at);
    assert_eq!(file_names(temp_dir.path()), vec!["pug.png", "tabby.jpg"]);
}

#[tokio::test]
async fn test_no_self_suggestion_and_cap() {
    let temp_dir = TempDir::new().unwrap();
    create_image(temp_dir.path(), "tabby.jpg");

    let classifier = ScriptedClassifier::new().with_labels(
        "tabby.jpg",
        0,
        &[
            ("tabby, tiger cat, kitty", 0.5),
            ("lynx, catamount", 0.3),
            ("cougar, puma, panther", 0.1),
        ],
    );
    let output = SharedOutput::new();

    let engine = RenameEngine::new(
        classifier,
        LocalStorageBackend::new(),
        ScriptedPrompter::new(&[]),
        NoPreview,
        NoOpProgressReporter::new(),
        DefaultNamerConfig::default(),
        temp_dir.path(),
    );

    let summary = engine
        .run(&[PathBuf::from("tabby.jpg")], output.clone())
        .await
        .unwrap();

    let text = output.contents();
    assert!(!text.contains(": tabby.jpg"));
    assert!(text.contains("1: tiger cat.jpg ⭐️⭐️"));
    assert!(text.contains("6: puma.jpg ⭐️"));
    assert!(!text.contains("7: "));
    // 入力が尽きたらスキップ扱い
    assert_eq!(summary.skipped, 1);
}

#[tokio::test]
async fn test_subdirectory_candidates_stay_in_source_directory() {
    let temp_dir = TempDir::new().unwrap();
    create_image(temp_dir.path(), "photos/img_001.jpeg");

    let classifier =
        ScriptedClassifier::new().with_labels("img_001.jpeg", 0, &[("golden retriever", 0.92)]);
    let output = SharedOutput::new();

    let engine = RenameEngine::new(
        classifier,
        LocalStorageBackend::new(),
        ScriptedPrompter::new(&["1"]),
        NoPreview,
        NoOpProgressReporter::new(),
        DefaultNamerConfig::default().with_join_policy(JoinPolicy::CollectPartial),
        temp_dir.path(),
    );

    engine
        .run(&[PathBuf::from("photos/img_001.jpeg")], output.clone())
        .await
        .unwrap();

    assert!(output
        .contents()
        .contains("1: photos/golden retriever.jpeg ⭐️⭐️⭐️"));
    assert_eq!(
        file_names(&temp_dir.path().join("photos")),
        vec!["golden retriever.jpeg"]
    );
}

#[tokio::test]
async fn test_inline_preview_is_printed_before_question() {
    let temp_dir = TempDir::new().unwrap();
    create_image(temp_dir.path(), "cat.png");

    let classifier = ScriptedClassifier::new().with_labels("cat.png", 0, &[("tabby", 0.4)]);
    let output = SharedOutput::new();

    let engine = RenameEngine::new(
        classifier,
        LocalStorageBackend::new(),
        ScriptedPrompter::new(&[""]),
        InlineImagePreview::new(),
        NoOpProgressReporter::new(),
        DefaultNamerConfig::default().with_preview_height(3),
        temp_dir.path(),
    );

    engine
        .run(&[PathBuf::from("cat.png")], output.clone())
        .await
        .unwrap();

    let text = output.contents();
    let preview_at = text.find("\x1b]1337;File=inline=1;").unwrap();
    let question_at = text.find("Do you want to rename").unwrap();
    assert!(text.contains(";height=3;"));
    assert!(preview_at < question_at);
}
