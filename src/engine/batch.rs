// BatchOrchestrator - 全画像の並列分類と入力順での結果収集

use crate::{
    classifier::Classifier,
    core::{
        ClassificationOutcome, ClassificationResult, JoinPolicy, NamerError, NamerResult,
        ProgressReporter,
    },
};
use futures::future::{join_all, try_join_all};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::task::JoinHandle;

/// 全ファイルの分類を同時に開始し、完了を待ってから入力順に結果を返す
pub struct BatchOrchestrator<C, R> {
    classifier: Arc<C>,
    reporter: Arc<R>,
    policy: JoinPolicy,
}

impl<C, R> BatchOrchestrator<C, R>
where
    C: Classifier + 'static,
    R: ProgressReporter + 'static,
{
    pub fn new(classifier: Arc<C>, reporter: Arc<R>) -> Self {
        Self {
            classifier,
            reporter,
            policy: JoinPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: JoinPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> JoinPolicy {
        self.policy
    }

    /// 全ファイルを分類
    ///
    /// 結果は完了順に関係なく `paths` と同じ順序で並ぶ。
    /// どちらの方針でも終了時に `report_completed` が呼ばれる。
    pub async fn classify_all(&self, paths: &[PathBuf]) -> NamerResult<Vec<ClassificationResult>> {
        let total = paths.len();
        let remaining = Arc::new(AtomicUsize::new(total));
        let succeeded = Arc::new(AtomicUsize::new(0));

        self.reporter.report_started(total).await;
        tracing::debug!(total, policy = ?self.policy, "分類バッチ開始");

        let handles: Vec<JoinHandle<ClassificationOutcome>> = paths
            .iter()
            .map(|path| self.spawn_classification(path.clone(), total, &remaining, &succeeded))
            .collect();

        match self.policy {
            JoinPolicy::AbortOnFirstFailure => self.join_or_abort(paths, handles, &succeeded).await,
            JoinPolicy::CollectPartial => self.join_partial(paths, handles).await,
        }
    }

    fn spawn_classification(
        &self,
        path: PathBuf,
        total: usize,
        remaining: &Arc<AtomicUsize>,
        succeeded: &Arc<AtomicUsize>,
    ) -> JoinHandle<ClassificationOutcome> {
        let classifier = Arc::clone(&self.classifier);
        let reporter = Arc::clone(&self.reporter);
        let remaining = Arc::clone(remaining);
        let succeeded = Arc::clone(succeeded);

        tokio::spawn(async move {
            let outcome = match classifier.classify(&path).await {
                Ok(result) => {
                    succeeded.fetch_add(1, Ordering::Relaxed);
                    ClassificationOutcome::Success(result)
                }
                Err(error) => ClassificationOutcome::Failure { path, error },
            };

            // 表示用のカウンター。一時的な不整合は許容する
            let left = remaining.fetch_sub(1, Ordering::Relaxed).saturating_sub(1);
            reporter.report_remaining(left, total).await;

            outcome
        })
    }

    async fn join_or_abort(
        &self,
        paths: &[PathBuf],
        handles: Vec<JoinHandle<ClassificationOutcome>>,
        succeeded: &AtomicUsize,
    ) -> NamerResult<Vec<ClassificationResult>> {
        let abort_handles: Vec<_> = handles.iter().map(JoinHandle::abort_handle).collect();

        let joined = try_join_all(handles.into_iter().zip(paths).map(|(handle, path)| async move {
            match handle.await {
                Ok(ClassificationOutcome::Success(result)) => Ok(result),
                Ok(ClassificationOutcome::Failure { path, error }) => Err((path, error)),
                Err(join_error) => Err((path.clone(), NamerError::task(join_error))),
            }
        }))
        .await;

        match joined {
            Ok(results) => {
                self.reporter.report_completed(results.len(), 0).await;
                Ok(results)
            }
            Err((path, error)) => {
                for handle in &abort_handles {
                    handle.abort();
                }
                tracing::warn!(path = %path.display(), %error, "分類失敗によりバッチを中断");
                self.reporter
                    .report_failure(&path, &error.to_string())
                    .await;
                self.reporter
                    .report_completed(succeeded.load(Ordering::Relaxed), 1)
                    .await;
                Err(error)
            }
        }
    }

    async fn join_partial(
        &self,
        paths: &[PathBuf],
        handles: Vec<JoinHandle<ClassificationOutcome>>,
    ) -> NamerResult<Vec<ClassificationResult>> {
        let mut results = Vec::with_capacity(paths.len());
        let mut failed = 0;

        for (joined, path) in join_all(handles).await.into_iter().zip(paths) {
            let (path, error) = match joined {
                Ok(ClassificationOutcome::Success(result)) => {
                    results.push(result);
                    continue;
                }
                Ok(ClassificationOutcome::Failure { path, error }) => (path, error),
                Err(join_error) => (path.clone(), NamerError::task(join_error)),
            };

            failed += 1;
            tracing::warn!(path = %path.display(), %error, "分類に失敗したファイルを除外");
            self.reporter
                .report_failure(&path, &error.to_string())
                .await;
        }

        self.reporter.report_completed(results.len(), failed).await;
        Ok(results)
    }
}
