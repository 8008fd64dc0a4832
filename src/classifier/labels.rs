// ラベルファイルの読み込みと、ロジットから予測への変換

use crate::core::Prediction;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Hugging Face 形式の config.json のうちラベル部分
#[derive(Debug, Deserialize)]
struct ModelConfig {
    id2label: BTreeMap<usize, String>,
}

/// ラベルファイルを読み込む
///
/// `.json` なら `id2label` オブジェクト（Hugging Face の config.json 形式）、
/// それ以外は1行1ラベルのテキストとして扱う。
pub fn load_labels(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read labels file: {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let labels = if is_json {
        parse_id2label(&content)?
    } else {
        content.lines().map(strip_synset_id).collect()
    };

    if labels.is_empty() {
        anyhow::bail!("Labels file is empty: {}", path.display());
    }
    Ok(labels)
}

fn parse_id2label(content: &str) -> Result<Vec<String>> {
    let config: ModelConfig =
        serde_json::from_str(content).context("Failed to parse id2label from labels JSON")?;

    // BTreeMap なのでクラス番号順に並ぶ
    Ok(config.id2label.into_values().collect())
}

/// `n02123045 tabby, tabby cat` 形式の先頭 WordNet ID を取り除く
fn strip_synset_id(line: &str) -> String {
    let line = line.trim();
    match line.split_once(' ') {
        Some((id, rest))
            if id.len() == 9
                && id.starts_with('n')
                && id[1..].chars().all(|c| c.is_ascii_digit()) =>
        {
            rest.trim().to_string()
        }
        _ => line.to_string(),
    }
}

/// 数値的に安定なソフトマックス
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max_logit = logits.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max_logit).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum > 0.0 {
        exps.into_iter().map(|x| x / sum).collect()
    } else {
        exps
    }
}

/// 確率の高い順に `top_k` 件の予測を作る
pub fn top_k(probabilities: &[f32], labels: &[String], k: usize) -> Vec<Prediction> {
    let mut indexed: Vec<(usize, f32)> = probabilities.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    indexed
        .into_iter()
        .take(k)
        .map(|(index, confidence)| {
            let label = labels
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("class_{index}"));
            Prediction { label, confidence }
        })
        .collect()
}
