//! Command-line interface definitions and argument parsing

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::data::SourceOptions;
use crate::pipeline::AnalysisParams;

/// Market-basket analysis: frequent itemsets and association rules with Apriori
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file
    #[arg(short, long, default_value = "bread basket.csv")]
    pub input: PathBuf,

    /// Minimum support, recommended range 0.01 to 0.1
    #[arg(short = 's', long, default_value = "0.02")]
    pub min_support: f64,

    /// Minimum confidence, recommended range 0.1 to 1.0
    #[arg(short = 'c', long, default_value = "0.6")]
    pub min_confidence: f64,

    /// Largest itemset size to mine
    #[arg(long)]
    pub max_len: Option<usize>,

    /// Also list the rules that mention this item
    #[arg(short, long)]
    pub focus: Option<String>,

    /// Item to drop while loading (repeatable), e.g. --exclude NONE
    #[arg(long = "exclude", value_name = "ITEM")]
    pub exclude: Vec<String>,

    /// Column holding the transaction id
    #[arg(long, default_value = "Transaction")]
    pub transaction_column: String,

    /// Column holding the item name
    #[arg(long, default_value = "Item")]
    pub item_column: String,

    /// Number of frequent itemsets to list
    #[arg(short, long, default_value = "10")]
    pub top: usize,

    /// Output path for the scatter chart (.png or .svg)
    #[arg(short, long, default_value = "rules_scatter.png")]
    pub output: PathBuf,

    /// Skip the scatter chart
    #[arg(long)]
    pub no_chart: bool,

    /// Print a preview of the first rows of the input
    #[arg(long)]
    pub preview: bool,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Mining parameters taken from the flags
    pub fn analysis_params(&self) -> AnalysisParams {
        AnalysisParams {
            min_support: self.min_support,
            min_confidence: self.min_confidence,
            max_len: self.max_len,
            focus_item: self.focus.clone(),
        }
    }

    /// CSV column names and excluded items taken from the flags
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            transaction_column: self.transaction_column.clone(),
            item_column: self.item_column.clone(),
            exclude: self.exclude.clone(),
        }
    }

    /// Chart path, or `None` when charts are disabled
    pub fn chart_path(&self) -> Option<&std::path::Path> {
        (!self.no_chart).then_some(self.output.as_path())
    }

    /// Install the tracing subscriber; `RUST_LOG` directives still apply
    pub fn setup_logging(&self) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["basketforge"]).unwrap();

        assert_eq!(args.input, PathBuf::from("bread basket.csv"));
        assert_eq!(args.min_support, 0.02);
        assert_eq!(args.min_confidence, 0.6);
        assert_eq!(args.top, 10);
        assert_eq!(args.verbose, 0);
        assert_eq!(args.analysis_params(), AnalysisParams::default());
        assert_eq!(args.source_options(), SourceOptions::default());
        assert_eq!(args.chart_path(), Some(std::path::Path::new("rules_scatter.png")));
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "basketforge",
            "-i",
            "baskets.csv",
            "-s",
            "0.05",
            "-c",
            "0.4",
            "--max-len",
            "3",
            "--focus",
            "Coffee",
            "--exclude",
            "NONE",
            "--exclude",
            "Adjustment",
            "--no-chart",
            "-vv",
        ])
        .unwrap();

        let params = args.analysis_params();
        assert_eq!(params.min_support, 0.05);
        assert_eq!(params.min_confidence, 0.4);
        assert_eq!(params.max_len, Some(3));
        assert_eq!(params.focus_item.as_deref(), Some("Coffee"));
        assert_eq!(args.source_options().exclude, vec!["NONE", "Adjustment"]);
        assert_eq!(args.chart_path(), None);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_rejects_non_numeric_threshold() {
        assert!(Args::try_parse_from(["basketforge", "--min-support", "high"]).is_err());
    }
}
