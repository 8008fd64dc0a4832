// 引数から依存関係を組み立ててリネームエンジンを実行する

use super::args::Cli;
use crate::{
    classifier::onnx::OnnxClassifier,
    core::{NamerConfig, PreviewRenderer, SessionSummary},
    engine::RenameEngine,
    services::{InlineImagePreview, NoPreview, SpinnerProgressReporter, StdinPrompter},
    storage::local::LocalStorageBackend,
};
use anyhow::{Context, Result};

/// 端末上で分類とリネームを実行
pub async fn execute(cli: Cli) -> Result<SessionSummary> {
    let config = cli.to_config();

    let working_dir = std::env::current_dir().context("Failed to resolve current directory")?;

    let classifier = OnnxClassifier::new(&cli.model, &cli.labels)
        .with_top_k(config.top_k())
        .with_intra_threads(config.intra_threads());

    let preview: Box<dyn PreviewRenderer> = if cli.no_preview {
        Box::new(NoPreview)
    } else {
        Box::new(InlineImagePreview::new())
    };

    tracing::debug!(
        model = %cli.model.display(),
        labels = %cli.labels.display(),
        ?config,
        "設定を読み込みました"
    );

    let engine = RenameEngine::new(
        classifier,
        LocalStorageBackend::new(),
        StdinPrompter::new(),
        preview,
        SpinnerProgressReporter::new(),
        config,
        working_dir,
    );

    let summary = engine.run(&cli.paths, std::io::stdout()).await?;
    Ok(summary)
}
