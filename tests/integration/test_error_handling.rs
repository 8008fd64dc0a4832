// エラーハンドリングの統合テスト
#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::{create_image, file_names, ScriptedClassifier, ScriptedPrompter, SharedOutput};
use image_namer::{
    classifier::onnx::OnnxClassifier,
    core::{ErrorSeverity, JoinPolicy, NamerError},
    engine::RenameEngine,
    services::{DefaultNamerConfig, NoOpProgressReporter, NoPreview, SpinnerProgressReporter},
    storage::local::LocalStorageBackend,
};
use std::path::PathBuf;
use tempfile::TempDir;

#[tokio::test]
async fn test_decode_failure_aborts_batch_before_any_prompt() {
    let temp_dir = TempDir::new().unwrap();
    create_image(temp_dir.path(), "cat.jpg");
    create_image(temp_dir.path(), "broken.gif");

    let classifier = ScriptedClassifier::new()
        .with_labels("cat.jpg", 0, &[("tabby", 0.9)])
        .with_failure("broken.gif", 0);
    let prompter = ScriptedPrompter::new(&["1", "1"]);
    let asked = prompter.asked_counter();

    let engine = RenameEngine::new(
        classifier,
        LocalStorageBackend::new(),
        prompter,
        NoPreview,
        NoOpProgressReporter::new(),
        DefaultNamerConfig::default(),
        temp_dir.path(),
    );

    let result = engine
        .run(
            &[PathBuf::from("cat.jpg"), PathBuf::from("broken.gif")],
            SharedOutput::new(),
        )
        .await;

    let error = result.unwrap_err();
    assert!(matches!(error, NamerError::ImageDecodeError { .. }));
    assert_eq!(error.exit_code(), 1);
    assert_eq!(*asked.lock().unwrap(), 0);
    assert_eq!(file_names(temp_dir.path()), vec!["broken.gif", "cat.jpg"]);
}

#[tokio::test]
async fn test_keep_going_skips_failed_images() {
    let temp_dir = TempDir::new().unwrap();
    create_image(temp_dir.path(), "cat.jpg");
    create_image(temp_dir.path(), "broken.gif");
    create_image(temp_dir.path(), "dog.jpg");

    let classifier = ScriptedClassifier::new()
        .with_labels("cat.jpg", 20, &[("tabby", 0.9)])
        .with_failure("broken.gif", 0)
        .with_labels("dog.jpg", 0, &[("pug", 0.9)]);
    let prompter = ScriptedPrompter::new(&["1", "1"]);
    let asked = prompter.asked_counter();

    let engine = RenameEngine::new(
        classifier,
        LocalStorageBackend::new(),
        prompter,
        NoPreview,
        SpinnerProgressReporter::hidden(),
        DefaultNamerConfig::default().with_join_policy(JoinPolicy::CollectPartial),
        temp_dir.path(),
    );

    let summary = engine
        .run(
            &[
                PathBuf::from("cat.jpg"),
                PathBuf::from("broken.gif"),
                PathBuf::from("dog.jpg"),
            ],
            SharedOutput::new(),
        )
        .await
        .unwrap();

    assert_eq!(summary.renamed, 2);
    assert_eq!(*asked.lock().unwrap(), 2);
    assert_eq!(
        file_names(temp_dir.path()),
        vec!["broken.gif", "pug.jpg", "tabby.jpg"]
    );
}

#[tokio::test]
async fn test_rename_failure_does_not_stop_loop() {
    let temp_dir = TempDir::new().unwrap();
    // vanished.jpg は分類後に消えた想定で作成しない
    create_image(temp_dir.path(), "dog.jpg");

    let classifier = ScriptedClassifier::new()
        .with_labels("vanished.jpg", 0, &[("tabby", 0.9)])
        .with_labels("dog.jpg", 0, &[("pug", 0.9)]);

    let engine = RenameEngine::new(
        classifier,
        LocalStorageBackend::new(),
        ScriptedPrompter::new(&["1", "1"]),
        NoPreview,
        NoOpProgressReporter::new(),
        DefaultNamerConfig::default(),
        temp_dir.path(),
    );

    let summary = engine
        .run(
            &[PathBuf::from("vanished.jpg"), PathBuf::from("dog.jpg")],
            SharedOutput::new(),
        )
        .await
        .unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.renamed, 1);
    assert_eq!(file_names(temp_dir.path()), vec!["pug.jpg"]);
}

#[tokio::test]
async fn test_missing_model_is_model_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    create_image(temp_dir.path(), "cat.png");

    let classifier = OnnxClassifier::new(
        temp_dir.path().join("missing.onnx"),
        temp_dir.path().join("labels.txt"),
    );

    let engine = RenameEngine::new(
        classifier,
        LocalStorageBackend::new(),
        ScriptedPrompter::new(&[]),
        NoPreview,
        NoOpProgressReporter::new(),
        DefaultNamerConfig::default(),
        temp_dir.path(),
    );

    let error = engine
        .run(&[PathBuf::from("cat.png")], SharedOutput::new())
        .await
        .unwrap_err();

    assert!(matches!(error, NamerError::ModelUnavailableError { .. }));
    assert_eq!(error.severity(), ErrorSeverity::Critical);
    assert!(!error.is_recoverable());
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let engine = RenameEngine::new(
        ScriptedClassifier::new(),
        LocalStorageBackend::new(),
        ScriptedPrompter::new(&[]),
        NoPreview,
        NoOpProgressReporter::new(),
        DefaultNamerConfig::default().with_top_k(0),
        ".",
    );

    let error = engine
        .run(&[PathBuf::from("cat.png")], SharedOutput::new())
        .await
        .unwrap_err();

    assert!(matches!(error, NamerError::ConfigurationError { .. }));
    assert_eq!(error.exit_code(), 2);
}
