// リネーム処理に関連するデータ型定義

use std::path::PathBuf;

/// 分類器が返す1件の予測
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// カンマ区切りの同義語リスト（例: "tabby, tiger cat"）
    pub label: String,
    /// 確信度 [0, 1]
    pub confidence: f32,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// 1ファイル分の分類結果
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub path: PathBuf,
    /// 確信度の降順
    pub predictions: Vec<Prediction>,
}

/// 個別分類の結果
#[derive(Debug)]
pub enum ClassificationOutcome {
    Success(ClassificationResult),
    Failure {
        path: PathBuf,
        error: super::NamerError,
    },
}

/// バッチ分類で失敗が起きたときの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinPolicy {
    /// 1件でも失敗したらバッチ全体を中断する
    #[default]
    AbortOnFirstFailure,
    /// 失敗したファイルを報告して除外し、残りで続行する
    CollectPartial,
}

/// リネーム先の候補
#[derive(Debug, Clone, PartialEq)]
pub struct NameSuggestion {
    /// カレントディレクトリからの相対パス
    pub candidate_path: PathBuf,
    /// 元になった予測の確信度
    pub rating: f32,
}

/// 対話ループ全体のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SessionSummary {
    pub fn total(&self) -> usize {
        self.renamed + self.skipped + self.failed
    }
}
