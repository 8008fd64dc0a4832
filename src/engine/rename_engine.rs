// RenameEngine - 分類バッチと対話ループを順に実行する
// 全ての依存関係をコンストラクタで注入する

use super::batch::BatchOrchestrator;
use crate::{
    classifier::Classifier,
    core::{
        NamerConfig, NamerError, NamerResult, PreviewRenderer, ProgressReporter, Prompter,
        SessionSummary,
    },
    session::RenameSession,
    storage::StorageBackend,
    suggestion::SuggestionEngine,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// 画像リネームエンジン
///
/// 1. 全画像を並列に分類（スピナーで残り件数を表示）
/// 2. 入力順に1ファイルずつ候補を提示してリネーム
pub struct RenameEngine<C, S, P, V, R, N> {
    classifier: Arc<C>,
    storage: Arc<S>,
    prompter: P,
    preview: V,
    reporter: Arc<R>,
    config: Arc<N>,
    working_dir: PathBuf,
}

impl<C, S, P, V, R, N> RenameEngine<C, S, P, V, R, N>
where
    C: Classifier + 'static,
    S: StorageBackend + 'static,
    P: Prompter + 'static,
    V: PreviewRenderer + 'static,
    R: ProgressReporter + 'static,
    N: NamerConfig,
{
    /// `working_dir` は候補パスを相対表示する基準（通常はカレントディレクトリ）
    pub fn new(
        classifier: C,
        storage: S,
        prompter: P,
        preview: V,
        reporter: R,
        config: N,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            classifier: Arc::new(classifier),
            storage: Arc::new(storage),
            prompter,
            preview,
            reporter: Arc::new(reporter),
            config: Arc::new(config),
            working_dir: working_dir.into(),
        }
    }

    /// 設定への参照を取得
    pub fn config(&self) -> &N {
        &self.config
    }

    /// 分類から対話ループまでを実行
    ///
    /// 対話ループは標準入力を待つため blocking スレッドで動かす。
    pub async fn run<W>(self, paths: &[PathBuf], output: W) -> NamerResult<SessionSummary>
    where
        W: Write + Send + 'static,
    {
        self.validate(paths)?;

        self.classifier.prepare().await?;
        tracing::info!(
            model = self.classifier.model_name(),
            files = paths.len(),
            "分類を開始"
        );

        let orchestrator = BatchOrchestrator::new(
            Arc::clone(&self.classifier),
            Arc::clone(&self.reporter),
        )
        .with_policy(self.config.join_policy());
        let results = orchestrator.classify_all(paths).await?;

        let suggestions = SuggestionEngine::new(Arc::clone(&self.storage), self.working_dir)
            .with_max_suggestions(self.config.max_suggestions());
        let mut session = RenameSession::new(
            self.storage,
            suggestions,
            self.prompter,
            self.preview,
            output,
        )
        .with_preview_height(self.config.preview_height());

        tokio::task::spawn_blocking(move || session.run(&results)).await?
    }

    fn validate(&self, paths: &[PathBuf]) -> NamerResult<()> {
        if paths.is_empty() {
            return Err(NamerError::usage("画像ファイルを1つ以上指定してください"));
        }
        if self.config.max_suggestions() == 0 {
            return Err(NamerError::configuration(
                "候補数は1以上である必要があります",
            ));
        }
        if self.config.top_k() == 0 {
            return Err(NamerError::configuration(
                "予測件数は1以上である必要があります",
            ));
        }
        Ok(())
    }
}
