use super::{labels, preprocess, Classifier};
use crate::core::{ClassificationResult, NamerError, NamerResult, Prediction};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use image::ImageReader;
use mockall::automock;
use ndarray::Array4;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::OnceCell;

/// デフォルトの予測件数
pub const DEFAULT_TOP_K: usize = 3;

/// 読み込み済みの推論モデル
#[automock]
pub trait InferenceModel: Send + Sync {
    /// 前処理済みテンソルを推論し、上位 `top_k` 件の予測を返す（ブロッキング）
    fn infer(&self, input: Array4<f32>, top_k: usize) -> Result<Vec<Prediction>>;

    fn label_count(&self) -> usize;
}

/// モデルの読み込み方法
///
/// `OnnxClassifier` はこれを高々一度だけ呼ぶ。
#[automock]
pub trait ModelLoader: Send + Sync {
    /// モデルを読み込む（ブロッキング）
    fn load(&self) -> Result<Arc<dyn InferenceModel>>;
}

/// 読み込み済みのモデルとラベル
///
/// 一度読み込んだら変更しない。`Session::run` が `&mut` を要求するため
/// セッションだけ Mutex で包む。
pub struct OnnxModel {
    session: Mutex<Session>,
    input_name: String,
    labels: Vec<String>,
}

impl OnnxModel {
    /// モデルファイルとラベルファイルを読み込む（ブロッキング）
    pub fn load(model_path: &Path, labels_path: &Path, intra_threads: usize) -> Result<Self> {
        if !model_path.exists() {
            anyhow::bail!("Model file not found: {}", model_path.display());
        }
        let labels = labels::load_labels(labels_path)?;

        // 既に環境がある場合は既存のものが使われる
        let committed = ort::init().with_name("image-namer").commit();
        tracing::debug!(?committed, "ONNX Runtime environment initialized");

        let session = Session::builder()
            .map_err(|e| anyhow!("Failed to create session builder: {e}"))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| anyhow!("Failed to set optimization level: {e}"))?
            .with_intra_threads(intra_threads.max(1))
            .map_err(|e| anyhow!("Failed to set intra threads: {e}"))?
            .commit_from_file(model_path)
            .map_err(|e| anyhow!("Failed to load ONNX model {}: {e}", model_path.display()))?;

        let input_name = session
            .inputs()
            .first()
            .map(|input| input.name().to_string())
            .context("Model has no inputs")?;

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            labels,
        })
    }
}

impl InferenceModel for OnnxModel {
    fn infer(&self, input: Array4<f32>, top_k: usize) -> Result<Vec<Prediction>> {
        let input_tensor =
            Value::from_array(input).map_err(|e| anyhow!("Failed to create tensor value: {e}"))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow!("ONNX session lock is poisoned"))?;
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| anyhow!("Inference failed: {e}"))?;

        let output = outputs
            .values()
            .next()
            .context("Model produced no outputs")?;
        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| anyhow!("Failed to extract output tensor: {e}"))?;
        let logits: Vec<f32> = data.iter().copied().collect();

        let probabilities = labels::softmax(&logits);
        Ok(labels::top_k(&probabilities, &self.labels, top_k))
    }

    fn label_count(&self) -> usize {
        self.labels.len()
    }
}

/// ファイルから `OnnxModel` を読み込むローダー
#[derive(Debug, Clone)]
pub struct OnnxModelLoader {
    model_path: PathBuf,
    labels_path: PathBuf,
    intra_threads: usize,
}

impl OnnxModelLoader {
    pub fn new(model_path: impl Into<PathBuf>, labels_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            labels_path: labels_path.into(),
            intra_threads: num_cpus::get(),
        }
    }
}

impl ModelLoader for OnnxModelLoader {
    fn load(&self) -> Result<Arc<dyn InferenceModel>> {
        tracing::debug!(model = %self.model_path.display(), "loading model");
        let model = OnnxModel::load(&self.model_path, &self.labels_path, self.intra_threads)?;
        Ok(Arc::new(model))
    }
}

/// ONNX Runtime による画像分類器
///
/// モデルは最初の `prepare` / `classify` で一度だけ読み込まれ、
/// 以降は全タスクで共有される。同時に初回呼び出しが来ても読み込みは1回。
pub struct OnnxClassifier<L = OnnxModelLoader> {
    loader: Arc<L>,
    top_k: usize,
    model: OnceCell<Arc<dyn InferenceModel>>,
}

impl OnnxClassifier {
    pub fn new(model_path: impl Into<PathBuf>, labels_path: impl Into<PathBuf>) -> Self {
        Self::with_loader(OnnxModelLoader::new(model_path, labels_path))
    }

    pub fn with_intra_threads(mut self, intra_threads: usize) -> Self {
        let loader = Arc::make_mut(&mut self.loader);
        loader.intra_threads = intra_threads;
        self
    }
}

impl<L: ModelLoader + 'static> OnnxClassifier<L> {
    /// 任意のローダーで分類器を作る
    pub fn with_loader(loader: L) -> Self {
        Self {
            loader: Arc::new(loader),
            top_k: DEFAULT_TOP_K,
            model: OnceCell::new(),
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    async fn model(&self) -> NamerResult<Arc<dyn InferenceModel>> {
        let model = self
            .model
            .get_or_try_init(|| async {
                let loader = Arc::clone(&self.loader);
                let start_time = Instant::now();

                let model = tokio::task::spawn_blocking(move || loader.load())
                    .await?
                    .map_err(|e| NamerError::model_unavailable(format!("{e:#}")))?;

                tracing::info!(
                    labels = model.label_count(),
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    "model loaded"
                );
                Ok::<_, NamerError>(model)
            })
            .await?;

        Ok(Arc::clone(model))
    }
}

/// 画像ファイルをデコードしてテンソルにする（ブロッキング）
fn decode_to_tensor(path: &Path) -> Result<Array4<f32>> {
    let image = ImageReader::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to detect image format: {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode image: {}", path.display()))?;

    Ok(preprocess::to_tensor(&image, preprocess::INPUT_SIZE))
}

#[async_trait]
impl<L: ModelLoader + 'static> Classifier for OnnxClassifier<L> {
    async fn prepare(&self) -> NamerResult<()> {
        self.model().await.map(|_| ())
    }

    async fn classify(&self, path: &Path) -> NamerResult<ClassificationResult> {
        let model = self.model().await?;
        let start_time = Instant::now();

        let tensor = tokio::task::spawn_blocking({
            let path = path.to_path_buf();
            move || decode_to_tensor(&path)
        })
        .await?
        .map_err(|e| NamerError::image_decode(path, e))?;

        let top_k = self.top_k;
        let predictions = tokio::task::spawn_blocking(move || model.infer(tensor, top_k))
            .await?
            .map_err(|e| NamerError::model_unavailable(format!("{e:#}")))?;

        tracing::debug!(
            path = %path.display(),
            predictions = predictions.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "classified"
        );

        Ok(ClassificationResult {
            path: path.to_path_buf(),
            predictions,
        })
    }

    fn model_name(&self) -> &'static str {
        "ONNX MobileNet"
    }
}
