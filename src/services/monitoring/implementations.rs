// 進捗監視の具象実装

use crate::core::ProgressReporter;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

fn spinner_style() -> ProgressStyle {
    match ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        Ok(style) => style,
        Err(_) => ProgressStyle::default_spinner(),
    }
}

/// 残り件数を表示するスピナー
#[derive(Clone)]
pub struct SpinnerProgressReporter {
    spinner: ProgressBar,
}

impl Default for SpinnerProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinnerProgressReporter {
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new_spinner())
    }

    /// 描画先を持たないスピナー（テスト用）
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(spinner: ProgressBar) -> Self {
        spinner.set_style(spinner_style());
        Self { spinner }
    }

    /// 現在の表示テキスト
    pub fn message(&self) -> String {
        self.spinner.message()
    }

    pub fn is_finished(&self) -> bool {
        self.spinner.is_finished()
    }
}

#[async_trait]
impl ProgressReporter for SpinnerProgressReporter {
    async fn report_started(&self, total_files: usize) {
        self.spinner
            .set_message(format!("Analyzing {total_files} images"));
        self.spinner.enable_steady_tick(Duration::from_millis(80));
    }

    async fn report_remaining(&self, remaining: usize, _total: usize) {
        self.spinner.set_message(format!("Analyzing {remaining} images"));
    }

    async fn report_failure(&self, file_path: &Path, error: &str) {
        self.spinner
            .println(format!("❌ {}: {error}", file_path.display()));
    }

    async fn report_completed(&self, _succeeded: usize, _failed: usize) {
        self.spinner.finish_and_clear();
    }
}

/// 何もしない進捗報告実装（テスト用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_files: usize) {
        // 何もしない
    }

    async fn report_remaining(&self, _remaining: usize, _total: usize) {
        // 何もしない
    }

    async fn report_failure(&self, _file_path: &Path, _error: &str) {
        // 何もしない
    }

    async fn report_completed(&self, _succeeded: usize, _failed: usize) {
        // 何もしない
    }
}
