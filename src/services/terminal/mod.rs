// 端末UIサービス - 入力プロンプトと画像プレビュー

pub mod preview;
pub mod prompt;

// 公開API
pub use preview::{InlineImagePreview, NoPreview};
pub use prompt::StdinPrompter;
