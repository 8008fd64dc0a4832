use clap::Parser;
use image_namer::{cli, core::NamerError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // RUST_LOG で詳細ログを有効化できる（既定は warn）
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Cli::parse();

    match cli::execute(args).await {
        Ok(summary) => {
            tracing::info!(
                renamed = summary.renamed,
                skipped = summary.skipped,
                failed = summary.failed,
                "完了"
            );
        }
        Err(error) => {
            let exit_code = match error.downcast_ref::<NamerError>() {
                Some(namer_error) => {
                    tracing::debug!(severity = namer_error.severity().as_str(), "終了");
                    namer_error.exit_code()
                }
                None => 1,
            };
            eprintln!("❌ エラー: {error:#}");
            std::process::exit(exit_code);
        }
    }
}
