// 進捗監視機能
// 分類の残り件数表示、失敗通知、完了時の停止

pub mod implementations;

// 公開API
pub use implementations::{NoOpProgressReporter, SpinnerProgressReporter};
