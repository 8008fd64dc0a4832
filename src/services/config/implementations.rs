// 設定管理の具象実装

use crate::core::{JoinPolicy, NamerConfig};

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultNamerConfig {
    max_suggestions: usize,
    top_k: usize,
    preview_height: u32,
    join_policy: JoinPolicy,
    intra_threads: usize,
}

impl DefaultNamerConfig {
    pub fn new(cpu_count: usize) -> Self {
        Self {
            intra_threads: cpu_count.max(1),
            ..Self::default()
        }
    }

    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_preview_height(mut self, preview_height: u32) -> Self {
        self.preview_height = preview_height;
        self
    }

    pub fn with_join_policy(mut self, join_policy: JoinPolicy) -> Self {
        self.join_policy = join_policy;
        self
    }

    pub fn with_intra_threads(mut self, intra_threads: usize) -> Self {
        self.intra_threads = intra_threads;
        self
    }
}

impl Default for DefaultNamerConfig {
    fn default() -> Self {
        Self {
            max_suggestions: crate::suggestion::DEFAULT_MAX_SUGGESTIONS,
            top_k: crate::classifier::onnx::DEFAULT_TOP_K,
            preview_height: crate::session::DEFAULT_PREVIEW_HEIGHT,
            join_policy: JoinPolicy::AbortOnFirstFailure,
            intra_threads: num_cpus::get().max(1),
        }
    }
}

impl NamerConfig for DefaultNamerConfig {
    fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    fn top_k(&self) -> usize {
        self.top_k
    }

    fn preview_height(&self) -> u32 {
        self.preview_height
    }

    fn join_policy(&self) -> JoinPolicy {
        self.join_policy
    }

    fn intra_threads(&self) -> usize {
        self.intra_threads
    }
}
