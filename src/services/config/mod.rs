// 実行時設定

pub mod implementations;

// 公開API
pub use implementations::DefaultNamerConfig;
