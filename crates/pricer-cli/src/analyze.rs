//! The `analyze` command: one recommendation, printed for a person or as JSON.

use std::path::Path;

use anyhow::Context;
use pricer_comps::TieredProvider;
use pricer_core::{AppConfig, ItemDescriptor, RecordOrigin, TransactionRecord};
use pricer_engine::{AnalysisRequest, PriceEngine, Recommendation};

use crate::AnalyzeArgs;

/// Runs one analysis and optionally exports its research template.
///
/// # Errors
///
/// Returns an error if configuration or the item file cannot be loaded, the
/// request has nothing to search for, or the export fails.
pub(crate) async fn run_analyze(config: &AppConfig, args: &AnalyzeArgs) -> anyhow::Result<()> {
    let engine_config = pricer_core::load_engine_config(config.engine_config_path.as_deref())?;
    let provider = TieredProvider::from_config(config, &engine_config)
        .context("failed to build comparable data provider")?;
    tracing::debug!(tiers = ?provider.tier_names(), "comparable tiers ready");

    let request = build_request(args)?;
    let mut engine = PriceEngine::new(engine_config, provider);
    let recommendation = engine.analyze(request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    } else {
        print_recommendation(&recommendation);
    }

    if let Some(export) = &args.export {
        let path = engine.export_research_template(export.as_deref())?;
        eprintln!("research template written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn build_request(args: &AnalyzeArgs) -> anyhow::Result<AnalysisRequest> {
    let mut request = match (&args.query, &args.item) {
        (Some(query), _) => AnalysisRequest::for_query(query.clone()),
        (None, Some(path)) => AnalysisRequest::for_item(read_item(path)?),
        (None, None) => anyhow::bail!("either --query or --item is required"),
    };
    if let Some(markup) = args.markup {
        request = request.with_markup(markup);
    }
    if let Some(limit) = args.limit {
        request = request.with_sample_limit(limit);
    }
    Ok(request)
}

fn read_item(path: &Path) -> anyhow::Result<ItemDescriptor> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read item file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse item file {}", path.display()))
}

fn print_recommendation(recommendation: &Recommendation) {
    match recommendation {
        Recommendation::Priced(priced) => {
            let stats = &priced.statistics;
            println!("query:           {}", priced.query);
            println!("suggested price: ${:.2}", priced.suggested_price);
            println!(
                "median:          ${:.2} (+{}% markup)",
                stats.median, priced.markup_percent
            );
            println!(
                "range:           ${:.2} - ${:.2} (mean ${:.2}, std dev ${:.2})",
                stats.min, stats.max, stats.mean, stats.std_dev
            );
            println!("comparables:     {}", stats.count);
            println!("confidence:      {:.0}/100", priced.confidence_score);
            if priced.excluded > 0 {
                println!("excluded:        {}", priced.excluded);
            }
            if !priced.outliers.is_empty() {
                println!("outliers:        {} flagged", priced.outliers.len());
            }
            if priced.sold.iter().any(is_synthetic) {
                println!("note:            comparables are simulated; verify before listing");
            }
            println!();
            print_records("sold", &priced.sold);
            println!();
            println!("verify sold:     {}", priced.research.urls.sold_listings);
            println!("verify current:  {}", priced.research.urls.current_listings);
        }
        Recommendation::InsufficientData(insufficient) => {
            println!("query:  {}", insufficient.query);
            println!("result: {}", insufficient.reason);
            println!();
            print_records("sold", &insufficient.sold);
            print_records("current", &insufficient.current);
            println!();
            println!("manual research:");
            println!("  sold listings:    {}", insufficient.research.urls.sold_listings);
            println!("  current listings: {}", insufficient.research.urls.current_listings);
            println!("  steps:");
            for (i, step) in insufficient.research.checklist.steps.iter().enumerate() {
                println!("    {}. {step}", i + 1);
            }
            println!("  red flags:");
            for flag in &insufficient.research.checklist.red_flags {
                println!("    - {flag}");
            }
        }
    }
}

fn print_records(label: &str, records: &[TransactionRecord]) {
    if records.is_empty() {
        return;
    }
    println!("{label}:");
    for record in records {
        println!(
            "  ${:>8.2}  {}  {:<12}  {}",
            record.total(),
            record.date,
            record.condition,
            record.title
        );
    }
}

fn is_synthetic(record: &TransactionRecord) -> bool {
    record.origin == RecordOrigin::Synthetic
}
