use crate::core::{ClassificationResult, NamerResult};
use async_trait::async_trait;
use mockall::automock;
use std::path::Path;

pub mod labels;
pub mod onnx;
pub mod preprocess;

/// 画像分類バックエンドのトレイト
///
/// パスを受け取り、確信度の降順に並んだ予測を返す。
#[automock]
#[async_trait]
pub trait Classifier: Send + Sync {
    /// モデルを読み込む。何度呼んでも読み込みは一度だけ
    async fn prepare(&self) -> NamerResult<()>;

    /// 画像ファイルを分類する
    async fn classify(&self, path: &Path) -> NamerResult<ClassificationResult>;

    /// 分類器の名前を取得
    fn model_name(&self) -> &'static str;
}
