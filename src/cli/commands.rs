//! Command implementations for the Grievance CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::time::Instant;

use anyhow::{Context, bail};
use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::EngineConfig;
use crate::engine::ComplaintEngine;
use crate::error::Result;
use crate::training::example::load_examples;

/// Execute a CLI command.
///
/// Library errors are wrapped with the file or step that produced them.
pub fn execute_command(args: GrievanceArgs) -> anyhow::Result<()> {
    let engine = build_engine(&args).context("could not start the complaint engine")?;

    match &args.command {
        Command::Classify(text_args) => classify(&engine, text_args, &args),
        Command::Analyze(text_args) => analyze(&engine, text_args, &args),
        Command::Retrain(retrain_args) => retrain(&engine, retrain_args, &args),
        Command::Summarize(summarize_args) => summarize(&engine, summarize_args, &args),
        Command::Keywords(text_args) => keywords(&engine, text_args, &args),
        Command::Stats(text_args) => stats(&engine, text_args, &args),
    }
}

/// Resolve the configuration from `--config` and `--model-dir`, then start the engine.
pub fn engine_config(args: &GrievanceArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            debug!("Loading configuration from: {}", path.display());
            EngineConfig::from_file(path)?
        }
        None => EngineConfig::default(),
    };
    if let Some(dir) = &args.model_dir {
        config = config.with_model_dir(dir);
    }
    Ok(config)
}

fn build_engine(args: &GrievanceArgs) -> Result<ComplaintEngine> {
    let start_time = Instant::now();
    let engine = ComplaintEngine::new(engine_config(args)?)?;
    debug!(
        "Engine ready in {} ms (model version {:?})",
        start_time.elapsed().as_millis(),
        engine.model_version()
    );
    Ok(engine)
}

fn classify(
    engine: &ComplaintEngine,
    text_args: &TextArgs,
    args: &GrievanceArgs,
) -> anyhow::Result<()> {
    let result = engine.classify(&text_args.joined());
    Ok(output_result("Classification", &result, args)?)
}

fn analyze(
    engine: &ComplaintEngine,
    text_args: &TextArgs,
    args: &GrievanceArgs,
) -> anyhow::Result<()> {
    let result = engine.analyze_sentiment(&text_args.joined());
    Ok(output_result("Sentiment analysis", &result, args)?)
}

fn retrain(
    engine: &ComplaintEngine,
    retrain_args: &RetrainArgs,
    args: &GrievanceArgs,
) -> anyhow::Result<()> {
    let path = &retrain_args.examples_file;
    info!("Loading training examples from: {}", path.display());
    let examples = load_examples(path)
        .with_context(|| format!("could not load training examples from {}", path.display()))?;
    let report = engine
        .retrain(&examples)
        .with_context(|| format!("retraining on {} examples failed", examples.len()))?;
    Ok(output_result("Retraining complete", &report, args)?)
}

fn summarize(
    engine: &ComplaintEngine,
    summarize_args: &SummarizeArgs,
    args: &GrievanceArgs,
) -> anyhow::Result<()> {
    let path = &summarize_args.text_file;
    let texts =
        read_lines(path).with_context(|| format!("could not read texts from {}", path.display()))?;
    if texts.is_empty() {
        bail!("{} contains no texts", path.display());
    }
    info!("Summarizing {} texts", texts.len());
    let summary = engine.summarize(&texts);
    Ok(output_result("Sentiment summary", &summary, args)?)
}

fn keywords(
    engine: &ComplaintEngine,
    text_args: &TextArgs,
    args: &GrievanceArgs,
) -> anyhow::Result<()> {
    let text = text_args.joined();
    let result = KeywordsResult {
        keywords: engine.extract_keywords(&text),
        urgency_score: engine.urgency_score(&text),
    };
    Ok(output_result("Keywords", &result, args)?)
}

fn stats(
    engine: &ComplaintEngine,
    text_args: &TextArgs,
    args: &GrievanceArgs,
) -> anyhow::Result<()> {
    let text = text_args.joined();
    let validation = engine.validate_text(&text);
    let result = StatsResult {
        statistics: engine.text_statistics(&text),
        recommendations: validation
            .recommendations()
            .into_iter()
            .map(String::from)
            .collect(),
        validation,
    };
    Ok(output_result("Text statistics", &result, args)?)
}

/// Non-blank, trimmed lines of a text file.
fn read_lines(path: &std::path::Path) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut texts = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            texts.push(trimmed.to_string());
        }
    }
    Ok(texts)
}
