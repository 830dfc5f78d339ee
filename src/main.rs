//! BasketForge: market-basket analysis CLI
//!
//! Loads transactions, runs the Apriori pipeline and prints the report.

use anyhow::{Context, Result};
use basketforge::{load_transactions, run_analysis, viz, Args};
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    let args = Args::parse();
    args.setup_logging();

    println!("=== Market Basket Analysis (Apriori) ===\n");

    let start_time = Instant::now();

    if args.preview {
        let head = basketforge::data::preview(&args.input, 5)?;
        println!("Dataset preview:\n{}\n", head);
    }

    let data_start = Instant::now();
    let transactions = load_transactions(&args.input, &args.source_options())?;
    tracing::info!(
        elapsed = ?data_start.elapsed(),
        transactions = transactions.len(),
        "data loaded"
    );
    println!(
        "✓ Data loaded: {} transactions from {}",
        transactions.len(),
        args.input.display()
    );

    let params = args.analysis_params();
    let mining_start = Instant::now();
    let analysis = run_analysis(&transactions, &params).context("analysis failed")?;
    tracing::info!(elapsed = ?mining_start.elapsed(), "mining finished");

    println!(
        "✓ Mined {} frequent itemsets and {} rules (min support {}, min confidence {})",
        analysis.itemsets.len(),
        analysis.rules.len(),
        params.min_support,
        params.min_confidence
    );

    viz::generate_report(&analysis, args.top, args.chart_path(), args.verbose > 0)?;

    println!("\n=== Analysis Complete ===");
    println!("Total processing time: {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(())
}
