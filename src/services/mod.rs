// サービス層 - 機能別の具象実装
// 各サービスは core のトレイトを実装し、疎結合で設計されている

pub mod config;
pub mod monitoring;
pub mod terminal;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::DefaultNamerConfig;
pub use monitoring::{NoOpProgressReporter, SpinnerProgressReporter};
pub use terminal::{InlineImagePreview, NoPreview, StdinPrompter};
