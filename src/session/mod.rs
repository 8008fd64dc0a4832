// RenameSession - 1ファイルずつ候補を提示してリネームする対話ループ
//
// 状態遷移: DisplaySuggestions → AwaitInput → (Rename | Skip) → 次のファイル

pub mod selection;

use crate::{
    core::{
        ClassificationResult, NameSuggestion, NamerError, NamerResult, PreviewRenderer,
        Prompter, SessionSummary,
    },
    storage::StorageBackend,
    suggestion::SuggestionEngine,
};
use colored::Colorize;
use selection::{parse_selection, rating_stars, Selection};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// プレビューのデフォルト高さ（行数）
pub const DEFAULT_PREVIEW_HEIGHT: u32 = 5;

/// プロンプトで表示する入力欄の名前
const PROMPT_FIELD: &str = "option";

/// 1ファイル分の状態
#[derive(Debug)]
enum SessionState {
    DisplaySuggestions,
    AwaitInput(Vec<NameSuggestion>),
    Rename(NameSuggestion),
    Skip,
}

/// 1ファイル分の処理結果
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Renamed { from: PathBuf, to: PathBuf },
    Skipped,
    Failed,
}

/// 対話的リネームループ
///
/// 出力先 `W` は端末（stdout）でもテスト用のバッファでもよい。
pub struct RenameSession<S, P, V, W> {
    storage: Arc<S>,
    suggestions: SuggestionEngine<S>,
    prompter: P,
    preview: V,
    preview_height: u32,
    output: W,
}

impl<S, P, V, W> RenameSession<S, P, V, W> {
    /// 出力先を取り出す（テストでの検証用）
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<S, P, V, W> RenameSession<S, P, V, W>
where
    S: StorageBackend,
    P: Prompter,
    V: PreviewRenderer,
    W: Write,
{
    pub fn new(
        storage: Arc<S>,
        suggestions: SuggestionEngine<S>,
        prompter: P,
        preview: V,
        output: W,
    ) -> Self {
        Self {
            storage,
            suggestions,
            prompter,
            preview,
            preview_height: DEFAULT_PREVIEW_HEIGHT,
            output,
        }
    }

    pub fn with_preview_height(mut self, preview_height: u32) -> Self {
        self.preview_height = preview_height;
        self
    }

    /// 全ファイルを入力順に処理
    ///
    /// リネームの失敗はそのファイルを失敗として数えて続行する。
    /// 端末入出力の失敗はループ全体を中断する。
    pub fn run(&mut self, results: &[ClassificationResult]) -> NamerResult<SessionSummary> {
        let mut summary = SessionSummary::default();

        for result in results {
            match self.process_file(result)? {
                FileOutcome::Renamed { .. } => summary.renamed += 1,
                FileOutcome::Skipped => summary.skipped += 1,
                FileOutcome::Failed => summary.failed += 1,
            }
        }

        tracing::info!(
            renamed = summary.renamed,
            skipped = summary.skipped,
            failed = summary.failed,
            "対話ループ終了"
        );
        Ok(summary)
    }

    /// 1ファイル分の状態機械を回す
    pub fn process_file(&mut self, result: &ClassificationResult) -> NamerResult<FileOutcome> {
        let mut state = SessionState::DisplaySuggestions;

        loop {
            state = match state {
                SessionState::DisplaySuggestions => {
                    let suggestions = self.suggestions.suggest(&result.predictions, &result.path);
                    self.display(&result.path, &suggestions)?;
                    SessionState::AwaitInput(suggestions)
                }
                SessionState::AwaitInput(suggestions) => {
                    let answer = self
                        .prompter
                        .prompt(PROMPT_FIELD)
                        .map_err(NamerError::terminal)?;

                    match parse_selection(answer.as_deref(), suggestions.len()) {
                        Selection::Choose(index) => match suggestions.into_iter().nth(index) {
                            Some(chosen) => SessionState::Rename(chosen),
                            None => SessionState::Skip,
                        },
                        Selection::Skip => SessionState::Skip,
                    }
                }
                SessionState::Rename(chosen) => return self.rename(&result.path, &chosen),
                SessionState::Skip => {
                    tracing::debug!(path = %result.path.display(), "スキップ");
                    return Ok(FileOutcome::Skipped);
                }
            };
        }
    }

    fn display(&mut self, path: &Path, suggestions: &[NameSuggestion]) -> NamerResult<()> {
        for (index, suggestion) in suggestions.iter().enumerate() {
            writeln!(
                self.output,
                "{}: {} {}",
                index + 1,
                suggestion.candidate_path.display(),
                rating_stars(suggestion.rating)
            )
            .map_err(NamerError::terminal)?;
        }

        let absolute = self.suggestions.working_dir().join(path);
        match self.preview.render(&absolute, self.preview_height) {
            Ok(preview) if !preview.is_empty() => {
                writeln!(self.output, "{preview}").map_err(NamerError::terminal)?
            }
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "プレビューを表示できません")
            }
        }

        writeln!(
            self.output,
            "Do you want to rename {} to:",
            path.display().to_string().magenta()
        )
        .map_err(NamerError::terminal)?;
        self.output.flush().map_err(NamerError::terminal)
    }

    fn rename(&mut self, path: &Path, chosen: &NameSuggestion) -> NamerResult<FileOutcome> {
        let working_dir = self.suggestions.working_dir();
        let from = working_dir.join(path);
        let to = working_dir.join(&chosen.candidate_path);

        match self.storage.rename(&from, &to) {
            Ok(()) => {
                writeln!(
                    self.output,
                    "{} renamed to {}",
                    path.display().to_string().magenta(),
                    chosen.candidate_path.display().to_string().green()
                )
                .map_err(NamerError::terminal)?;

                Ok(FileOutcome::Renamed {
                    from: path.to_path_buf(),
                    to: chosen.candidate_path.clone(),
                })
            }
            Err(error) if error.is_recoverable() => {
                eprintln!("❌ {error}");
                tracing::warn!(%error, "リネーム失敗、次のファイルへ");
                Ok(FileOutcome::Failed)
            }
            Err(error) => Err(error),
        }
    }
}
