// 画像分類の結果からファイル名を提案し、対話的にリネームするツール

pub mod classifier;
pub mod cli;
pub mod core;
pub mod engine;
pub mod services;
pub mod session;
pub mod storage;
pub mod suggestion;
