// リネームツールのトレイト定義
// 端末UI・設定・進捗報告の抽象化インターフェース

use super::types::JoinPolicy;
use async_trait::async_trait;
use mockall::automock;
use std::path::Path;

/// 実行時設定を抽象化するトレイト
#[automock]
pub trait NamerConfig: Send + Sync {
    /// 1ファイルあたりに表示する候補の最大数
    fn max_suggestions(&self) -> usize;

    /// 分類器から受け取る予測の件数
    fn top_k(&self) -> usize;

    /// プレビュー画像の高さ（行数）
    fn preview_height(&self) -> u32;

    /// 分類失敗時のバッチ結合方針
    fn join_policy(&self) -> JoinPolicy;

    /// 推論に使うスレッド数
    fn intra_threads(&self) -> usize;
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 分類開始時の報告
    async fn report_started(&self, total_files: usize);

    /// 残り件数の報告
    async fn report_remaining(&self, remaining: usize, total: usize);

    /// 分類失敗の報告
    async fn report_failure(&self, file_path: &Path, error: &str);

    /// 全分類完了時の報告（インジケーターを停止する）
    async fn report_completed(&self, succeeded: usize, failed: usize);
}

/// 1行入力プロンプトの抽象化トレイト
#[automock]
pub trait Prompter: Send + Sync {
    /// `field` を表示して1行読み取る。入力が終端に達した場合は `None`
    fn prompt(&self, field: &str) -> std::io::Result<Option<String>>;
}

/// 画像プレビュー描画の抽象化トレイト
#[automock]
pub trait PreviewRenderer: Send + Sync {
    /// 端末に出力可能な文字列を生成する
    fn render(&self, path: &Path, height: u32) -> anyhow::Result<String>;
}

// PreviewRenderer for Box<dyn PreviewRenderer>
impl PreviewRenderer for Box<dyn PreviewRenderer> {
    fn render(&self, path: &Path, height: u32) -> anyhow::Result<String> {
        self.as_ref().render(path, height)
    }
}
