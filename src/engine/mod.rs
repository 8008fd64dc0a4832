// エンジン層 - 並列分類と対話ループのオーケストレーション
// サービス層を組み合わせて高レベルな処理を提供

pub mod batch;
pub mod rename_engine;

// 公開API - 主要エンジンクラス
pub use batch::BatchOrchestrator;
pub use rename_engine::RenameEngine;
