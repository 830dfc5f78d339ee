//! End-to-end analysis: encode, mine, derive rules, build the views

use crate::apriori::apriori;
use crate::encoder::encode;
use crate::error::{validate_threshold, MiningError};
use crate::model::{AssociationRule, FrequentItemset, FrequentItemsets};
use crate::rules::{association_rules, best_rules, rules_with_item, sort_by_lift};

/// Parameters of one analysis run
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisParams {
    /// Inclusive support threshold in (0, 1]
    pub min_support: f64,
    /// Inclusive confidence threshold in (0, 1]
    pub min_confidence: f64,
    /// Largest itemset size to mine, unbounded when `None`
    pub max_len: Option<usize>,
    /// Item whose rules get their own view
    pub focus_item: Option<String>,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            min_support: 0.02,
            min_confidence: 0.6,
            max_len: None,
            focus_item: None,
        }
    }
}

impl AnalysisParams {
    /// Reject out-of-range parameters before any work is done
    pub fn validate(&self) -> Result<(), MiningError> {
        validate_threshold("min_support", self.min_support)?;
        validate_threshold("min_confidence", self.min_confidence)?;
        if self.max_len == Some(0) {
            return Err(MiningError::InvalidMaxLen);
        }
        Ok(())
    }
}

/// Rules that mention one item
#[derive(Debug, Clone, PartialEq)]
pub struct FocusView {
    pub item: String,
    /// Highest lift first
    pub rules: Vec<AssociationRule>,
}

/// Everything one run produces
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Number of transactions analysed
    pub n_transactions: usize,
    /// Number of distinct items
    pub n_items: usize,
    /// The mined collection
    pub itemsets: FrequentItemsets,
    /// All rules above the confidence threshold, highest lift first
    pub rules: Vec<AssociationRule>,
    /// Rules with confidence >= 0.6 and lift > 1, highest lift first
    pub best_rules: Vec<AssociationRule>,
    /// Rules mentioning the focus item, if one was given
    pub focus: Option<FocusView>,
}

impl Analysis {
    /// Frequent itemsets, highest support first
    pub fn itemsets_by_support(&self) -> Vec<&FrequentItemset> {
        self.itemsets.sorted_by_support()
    }
}

/// Run the whole pipeline on grouped transactions.
///
/// Pure: the same transactions and parameters always give the same
/// [`Analysis`]. Nothing is carried over between calls.
pub fn run_analysis<T, S>(transactions: &[T], params: &AnalysisParams) -> Result<Analysis, MiningError>
where
    T: AsRef<[S]>,
    S: AsRef<str>,
{
    params.validate()?;

    let encoded = encode(transactions)?;
    let itemsets = apriori(&encoded, params.min_support, params.max_len)?;

    let mut rules = association_rules(&itemsets, params.min_confidence)?;
    sort_by_lift(&mut rules);

    let best_rules = best_rules(&rules);
    let focus = params.focus_item.as_ref().map(|item| FocusView {
        item: item.clone(),
        rules: rules_with_item(&rules, item),
    });

    tracing::info!(
        transactions = encoded.n_transactions(),
        items = encoded.n_items(),
        itemsets = itemsets.len(),
        rules = rules.len(),
        best = best_rules.len(),
        "analysis complete"
    );

    Ok(Analysis {
        n_transactions: encoded.n_transactions(),
        n_items: encoded.n_items(),
        itemsets,
        rules,
        best_rules,
        focus,
    })
}
