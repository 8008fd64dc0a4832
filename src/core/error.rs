// 画像リネームツールのカスタムエラー型定義

use std::path::{Path, PathBuf};
use thiserror::Error;

/// リネーム処理全体で使うエラー型
#[derive(Error, Debug)]
pub enum NamerError {
    #[error("使い方エラー: {message}")]
    UsageError { message: String },

    #[error("画像デコードエラー: {} - {source}", path.display())]
    ImageDecodeError {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("モデル読み込みエラー: {message}")]
    ModelUnavailableError { message: String },

    #[error("リネームエラー: {} → {} - {source}", from.display(), to.display())]
    RenameError {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("端末入出力エラー: {source}")]
    TerminalError {
        #[source]
        source: std::io::Error,
    },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },
}

impl NamerError {
    /// 使い方エラーの作成
    pub fn usage(message: impl Into<String>) -> Self {
        Self::UsageError {
            message: message.into(),
        }
    }

    /// 画像デコードエラーの作成
    pub fn image_decode(path: impl AsRef<Path>, source: anyhow::Error) -> Self {
        Self::ImageDecodeError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// モデル読み込みエラーの作成
    pub fn model_unavailable(message: impl Into<String>) -> Self {
        Self::ModelUnavailableError {
            message: message.into(),
        }
    }

    /// リネームエラーの作成
    pub fn rename(from: impl AsRef<Path>, to: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::RenameError {
            from: from.as_ref().to_path_buf(),
            to: to.as_ref().to_path_buf(),
            source,
        }
    }

    /// 端末入出力エラーの作成
    pub fn terminal(source: std::io::Error) -> Self {
        Self::TerminalError { source }
    }

    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UsageError { .. } | Self::ConfigurationError { .. } => ErrorSeverity::High,
            Self::ModelUnavailableError { .. } => ErrorSeverity::Critical,
            Self::ImageDecodeError { .. } | Self::RenameError { .. } => ErrorSeverity::Medium,
            Self::TerminalError { .. } | Self::TaskError { .. } => ErrorSeverity::High,
        }
    }

    /// 次のファイルへ進んで良いエラーかどうか
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::RenameError { .. } | Self::ImageDecodeError { .. })
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UsageError { .. } | Self::ConfigurationError { .. } => 2,
            _ => 1,
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 中重要度 - ファイル単位の失敗
    Medium,
    /// 高重要度 - 処理の中断
    High,
    /// 致命的 - 分類自体が不可能
    Critical,
}

impl ErrorSeverity {
    /// 重要度の文字列表現を取得
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// リネームツールの結果型
pub type NamerResult<T> = std::result::Result<T, NamerError>;

impl From<tokio::task::JoinError> for NamerError {
    fn from(error: tokio::task::JoinError) -> Self {
        NamerError::TaskError { source: error }
    }
}
