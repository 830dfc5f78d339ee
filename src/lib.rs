//! BasketForge: market-basket analysis with the Apriori algorithm
//!
//! This library groups retail transactions into baskets, mines frequent
//! itemsets level by level and derives association rules scored by
//! support, confidence and lift.

pub mod apriori;
pub mod cli;
pub mod data;
pub mod encoder;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod rules;
pub mod viz;

// Re-export public items for easier access
pub use apriori::apriori;
pub use cli::Args;
pub use data::{load_transactions, SourceOptions, Transaction};
pub use encoder::{encode, EncodedTransactions};
pub use error::MiningError;
pub use model::{AssociationRule, FrequentItemset, FrequentItemsets};
pub use pipeline::{run_analysis, Analysis, AnalysisParams, FocusView};
pub use rules::{association_rules, best_rules, rules_with_item, sort_by_lift};
pub use viz::{create_rules_scatter, generate_report};

/// Common result type used at the I/O and CLI boundary
pub type Result<T> = anyhow::Result<T>;
