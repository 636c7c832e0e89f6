use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use datalens::charts::{self, render};
use datalens::llm::CompletionClient;
use datalens::{Config, ExtractedContent, Session};

#[derive(Parser)]
#[command(
    name = "datalens",
    about = "Extract a document, chart its tabular columns, and ask questions about it"
)]
struct Cli {
    /// File to analyze (.txt .docx .pdf .csv .xlsx .png .jpg .jpeg)
    file: PathBuf,

    /// Question to send to the completion endpoint
    #[arg(short, long)]
    question: Option<String>,

    /// API credential for the completion endpoint
    #[arg(long, env = "TOGETHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Directory to render chart PNGs into
    #[arg(long)]
    charts_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "datalens=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let payload = tokio::fs::read(&cli.file)
        .await
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let filename = cli
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .context("file has no usable name")?;

    let session = Session::new();
    let content = session.load_file(filename, &payload).await?;
    println!("{}", serde_json::to_string_pretty(&content.preview())?);

    if let ExtractedContent::Rows(rows) = &content {
        let descriptors = charts::derive_charts(rows);
        println!("{}", serde_json::to_string_pretty(&descriptors)?);

        if let Some(dir) = &cli.charts_dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            for chart in &descriptors {
                let path = dir.join(format!("{}.png", safe_filename(chart.column())));
                render::write_chart(&path, chart)?;
                info!(chart = %path.display(), "chart written");
            }
        }
    }

    if let Some(question) = &cli.question {
        let credential = cli
            .api_key
            .clone()
            .or_else(|| config.api_key.clone())
            .context("an API key is required to ask a question (set TOGETHER_API_KEY)")?;

        let client =
            CompletionClient::new(config.model.clone()).with_base_url(config.api_base.clone());
        let answer = session.analyze(&client, &credential, question).await?;
        println!("\n{answer}");
    }

    Ok(())
}

fn safe_filename(column: &str) -> String {
    column
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
