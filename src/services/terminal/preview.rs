// 端末内の画像プレビュー

use crate::core::PreviewRenderer;
use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;

/// iTerm2 インライン画像プロトコルでプレビューを出力する
///
/// 対応していない端末ではエスケープシーケンスが無視される。
#[derive(Debug, Default, Clone)]
pub struct InlineImagePreview;

impl InlineImagePreview {
    pub fn new() -> Self {
        Self
    }

    /// エンコード済みのバイト列からエスケープシーケンスを組み立てる
    pub fn encode(data: &[u8], height: u32) -> String {
        format!(
            "\x1b]1337;File=inline=1;size={};height={height};preserveAspectRatio=1:{}\x07",
            data.len(),
            STANDARD.encode(data)
        )
    }
}

impl PreviewRenderer for InlineImagePreview {
    fn render(&self, path: &Path, height: u32) -> Result<String> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read image for preview: {}", path.display()))?;
        Ok(Self::encode(&data, height))
    }
}

/// プレビューを出さない実装（`--no-preview`）
#[derive(Debug, Default, Clone)]
pub struct NoPreview;

impl PreviewRenderer for NoPreview {
    fn render(&self, _path: &Path, _height: u32) -> Result<String> {
        Ok(String::new())
    }
}
