// 名前候補生成エンジン
//
// 分類結果のラベルから、重複がなく既存ファイルと衝突しないリネーム先候補を
// 確信度の高い順に生成する。

pub mod paths;

use crate::core::{NameSuggestion, Prediction};
use crate::storage::StorageBackend;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// デフォルトの候補上限
pub const DEFAULT_MAX_SUGGESTIONS: usize = 6;

/// リネーム先候補の生成器
pub struct SuggestionEngine<S> {
    storage: Arc<S>,
    working_dir: PathBuf,
    max_suggestions: usize,
}

impl<S> SuggestionEngine<S>
where
    S: StorageBackend,
{
    /// `working_dir` は絶対パスであること（相対パス変換の基準になる）
    pub fn new(storage: Arc<S>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            working_dir: working_dir.into(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions;
        self
    }

    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// 予測リストと元ファイルのパスから候補を生成
    ///
    /// 存在確認はこの呼び出しの時点で同期的に行う。
    pub fn suggest(&self, predictions: &[Prediction], path: &Path) -> Vec<NameSuggestion> {
        let suffix = paths::extension_suffix(path);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = paths::normalize(&self.working_dir.join(paths::parent_dir(path)));

        let mut seen_terms = HashSet::new();
        let mut proposed = HashSet::new();
        let mut suggestions = Vec::new();

        for prediction in predictions {
            for term in prediction.label.split(',').map(str::trim) {
                if suggestions.len() >= self.max_suggestions {
                    return suggestions;
                }
                if term.is_empty() || format!("{term}{suffix}") == file_name {
                    continue;
                }
                // 上位の予測で既に出た語は繰り返さない
                if !seen_terms.insert(term.to_string()) {
                    continue;
                }

                let candidate = self.free_candidate(&dir, term, &suffix, &proposed);
                proposed.insert(candidate.clone());

                suggestions.push(NameSuggestion {
                    candidate_path: paths::relative_to(&candidate, &self.working_dir),
                    rating: prediction.confidence,
                });
            }
        }

        suggestions
    }

    /// `dir/term<suffix>` が使用中なら ` (1)`, ` (2)`, ... を付けて空きを探す
    fn free_candidate(
        &self,
        dir: &Path,
        term: &str,
        suffix: &str,
        proposed: &HashSet<PathBuf>,
    ) -> PathBuf {
        let mut candidate = dir.join(format!("{term}{suffix}"));
        let mut attempt = 0;
        while self.storage.exists(&candidate) || proposed.contains(&candidate) {
            attempt += 1;
            candidate = dir.join(format!("{term} ({attempt}){suffix}"));
        }
        candidate
    }
}
