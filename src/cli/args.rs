use crate::classifier::onnx::DEFAULT_TOP_K;
use crate::core::JoinPolicy;
use crate::services::DefaultNamerConfig;
use crate::session::DEFAULT_PREVIEW_HEIGHT;
use crate::suggestion::DEFAULT_MAX_SUGGESTIONS;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "image_namer")]
#[command(about = "Classify images and rename them interactively from suggested names")]
#[command(version)]
pub struct Cli {
    /// Image files to classify and rename
    #[arg(value_name = "IMAGE")]
    pub paths: Vec<PathBuf>,

    /// ONNX image classification model
    #[arg(
        long,
        env = "IMAGE_NAMER_MODEL",
        default_value = "models/mobilenetv2-12.onnx"
    )]
    pub model: PathBuf,

    /// Class labels (one per line, or a JSON id2label map)
    #[arg(
        long,
        env = "IMAGE_NAMER_LABELS",
        default_value = "models/imagenet_labels.txt"
    )]
    pub labels: PathBuf,

    /// Number of predictions taken from the classifier per image
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Maximum number of suggested names per image
    #[arg(long, default_value_t = DEFAULT_MAX_SUGGESTIONS)]
    pub max_suggestions: usize,

    /// Height of the inline image preview in rows
    #[arg(long, default_value_t = DEFAULT_PREVIEW_HEIGHT)]
    pub preview_height: u32,

    /// Do not print an inline image preview
    #[arg(long)]
    pub no_preview: bool,

    /// Skip images that fail to classify instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Number of threads used for inference
    #[arg(short, long)]
    pub threads: Option<usize>,
}

impl Cli {
    /// 引数から実行時設定を組み立てる
    pub fn to_config(&self) -> DefaultNamerConfig {
        let join_policy = if self.keep_going {
            JoinPolicy::CollectPartial
        } else {
            JoinPolicy::AbortOnFirstFailure
        };

        DefaultNamerConfig::new(self.threads.unwrap_or_else(num_cpus::get))
            .with_top_k(self.top_k)
            .with_max_suggestions(self.max_suggestions)
            .with_preview_height(self.preview_height)
            .with_join_policy(join_policy)
    }
}
