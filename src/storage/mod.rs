use crate::core::NamerResult;
use mockall::automock;
use std::path::Path;

pub mod local;

/// ファイルシステム境界のトレイト
///
/// 候補生成時の存在確認と、選択後のリネームだけを扱う。
#[automock]
pub trait StorageBackend: Send + Sync {
    /// パスにファイルが存在するかチェック
    fn exists(&self, path: &Path) -> bool;

    /// `from` を `to` にリネームする
    fn rename(&self, from: &Path, to: &Path) -> NamerResult<()>;
}

// StorageBackend for Box<dyn StorageBackend>
impl StorageBackend for Box<dyn StorageBackend> {
    fn exists(&self, path: &Path) -> bool {
        self.as_ref().exists(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> NamerResult<()> {
        self.as_ref().rename(from, to)
    }
}
