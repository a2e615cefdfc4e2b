//! One-shot document analysis from the command line
//!
//! Run with: cargo run -p clausewise --features cli --bin clausewise-analyze -- contract.pdf

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use clausewise::{
    config::ClauseWiseConfig,
    ingestion::FileParser,
    providers::{self, DisabledProvider, InferenceProvider, InferenceTask},
    AnalysisOutcome, AnalysisSource, DocumentAnalyzer,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "clausewise-analyze", version, about = "Analyze a legal document")]
struct Cli {
    /// PDF, DOCX or TXT file
    file: PathBuf,
    /// Question to answer about the document
    #[arg(short, long)]
    question: Option<String>,
    /// Use the hosted models (requires HF_API_KEY)
    #[arg(long)]
    remote: bool,
}

fn source_label(outcome: &AnalysisOutcome) -> String {
    match &outcome.source {
        AnalysisSource::Remote { model } => format!("remote: {}", model),
        AnalysisSource::Local => "local".to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("clausewise=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClauseWiseConfig::load()?;

    if cli.remote && !config.inference.is_enabled() {
        bail!("--remote needs an API key (set HF_API_KEY)");
    }

    let provider: Arc<dyn InferenceProvider> = if cli.remote {
        providers::from_config(&config.inference)?
    } else {
        Arc::new(DisabledProvider)
    };
    let analyzer = DocumentAnalyzer::new(provider, &config.inference, config.analysis.clone());

    let data = tokio::fs::read(&cli.file)
        .await
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let filename = cli
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parsed = FileParser::parse(&filename, None, &data)?;

    println!("File: {} ({})", filename, parsed.file_type.display_name());
    if let Some(pages) = parsed.total_pages {
        println!("Pages: {}", pages);
    }
    println!("Document type: {}", analyzer.classify(&parsed.content));

    println!("\nEntities:");
    let entities = analyzer.extract_entities(&parsed.content);
    for (category, values) in entities.iter().filter(|(_, v)| !v.is_empty()) {
        println!("  {:?}: {}", category, values.join("; "));
    }
    if entities.is_empty() {
        println!("  (none)");
    }

    let summary = analyzer.summarize(&parsed.content, None).await;
    println!("\nSummary [{}]:\n{}", source_label(&summary), summary.text);

    if let Some(question) = cli.question.as_deref() {
        let answer = analyzer.answer(question, &parsed.content).await;
        println!("\nQ: {}\nA [{}]: {}", question, source_label(&answer), answer.text);
    }

    if cli.remote {
        let prompt = format!(
            "Provide a detailed legal analysis of the following document:\n\n{}",
            clausewise::heuristics::key_sentences(&parsed.content)
        );
        let analysis = analyzer.run_task(InferenceTask::DetailedAnalysis, &prompt).await;
        println!("\nDetailed analysis [{}]:\n{}", source_label(&analysis), analysis.text);
    } else {
        println!("\n{}", analyzer.detailed_summary(&parsed.content).text);
    }

    Ok(())
}
