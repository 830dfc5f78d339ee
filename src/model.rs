//! Mining result types: frequent itemsets and association rules

use std::cmp::Ordering;
use std::collections::HashMap;

/// One frequent itemset with its support
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentItemset {
    /// Sorted column indices into [`FrequentItemsets::columns`]
    pub items: Vec<usize>,
    /// Number of transactions containing every item
    pub count: usize,
    /// `count` over the number of transactions
    pub support: f64,
}

impl FrequentItemset {
    /// Number of items in the set
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for itemsets produced by the miner
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// All itemsets that met a minimum support threshold.
///
/// Itemsets are stored level by level (size 1 first), each level in
/// lexicographic order of column indices. Anti-monotone: every non-empty
/// subset of a stored itemset is stored as well.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentItemsets {
    columns: Vec<String>,
    n_transactions: usize,
    min_support: f64,
    itemsets: Vec<FrequentItemset>,
    index: HashMap<Vec<usize>, usize>,
}

impl FrequentItemsets {
    pub(crate) fn new(
        columns: Vec<String>,
        n_transactions: usize,
        min_support: f64,
        itemsets: Vec<FrequentItemset>,
    ) -> Self {
        let index = itemsets
            .iter()
            .enumerate()
            .map(|(pos, itemset)| (itemset.items.clone(), pos))
            .collect();

        Self {
            columns,
            n_transactions,
            min_support,
            itemsets,
            index,
        }
    }

    /// Item names, indexed by column
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of transactions the supports were computed over
    pub fn n_transactions(&self) -> usize {
        self.n_transactions
    }

    /// Threshold the collection was mined with
    pub fn min_support(&self) -> f64 {
        self.min_support
    }

    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrequentItemset> {
        self.itemsets.iter()
    }

    /// Itemsets with exactly `size` items
    pub fn of_size(&self, size: usize) -> impl Iterator<Item = &FrequentItemset> {
        self.itemsets.iter().filter(move |itemset| itemset.len() == size)
    }

    /// Size of the largest frequent itemset, 0 when empty
    pub fn max_size(&self) -> usize {
        self.itemsets.iter().map(FrequentItemset::len).max().unwrap_or(0)
    }

    /// Support of a frequent itemset given as sorted column indices
    pub fn support_of(&self, items: &[usize]) -> Option<f64> {
        self.get(items).map(|itemset| itemset.support)
    }

    /// Transaction count of a frequent itemset given as sorted column indices
    pub fn count_of(&self, items: &[usize]) -> Option<usize> {
        self.get(items).map(|itemset| itemset.count)
    }

    fn get(&self, items: &[usize]) -> Option<&FrequentItemset> {
        self.index.get(items).map(|&pos| &self.itemsets[pos])
    }

    pub fn contains(&self, items: &[usize]) -> bool {
        self.index.contains_key(items)
    }

    /// Resolve an itemset's column indices to item names
    pub fn item_names(&self, itemset: &FrequentItemset) -> Vec<&str> {
        self.names_of(&itemset.items)
    }

    pub(crate) fn names_of(&self, items: &[usize]) -> Vec<&str> {
        items.iter().map(|&col| self.columns[col].as_str()).collect()
    }

    /// Itemsets ordered by support, highest first.
    ///
    /// Ties keep the level order (smaller sets first).
    pub fn sorted_by_support(&self) -> Vec<&FrequentItemset> {
        let mut sorted: Vec<&FrequentItemset> = self.itemsets.iter().collect();
        // stable sort keeps level order among equal supports
        sorted.sort_by(|a, b| b.support.total_cmp(&a.support));
        sorted
    }
}

/// A directional rule `antecedent -> consequent` with its metrics
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRule {
    /// "If" side, item names in column order
    pub antecedent: Vec<String>,
    /// "Then" side, item names in column order
    pub consequent: Vec<String>,
    pub antecedent_support: f64,
    pub consequent_support: f64,
    /// Support of antecedent and consequent together
    pub support: f64,
    /// Share of antecedent transactions that also hold the consequent
    pub confidence: f64,
    /// confidence / consequent_support, exactly 1 under independence
    pub lift: f64,
    /// support - antecedent_support * consequent_support
    pub leverage: f64,
    /// (1 - consequent_support) / (1 - confidence), infinite when confidence is 1
    pub conviction: f64,
}

impl AssociationRule {
    /// True when `item` appears on either side of the rule
    pub fn mentions(&self, item: &str) -> bool {
        self.antecedent.iter().chain(&self.consequent).any(|i| i == item)
    }

    pub fn antecedent_label(&self) -> String {
        self.antecedent.join(", ")
    }

    pub fn consequent_label(&self) -> String {
        self.consequent.join(", ")
    }

    /// Descending by lift, then confidence, then support; names break the remaining ties
    pub(crate) fn cmp_by_lift(&self, other: &Self) -> Ordering {
        other
            .lift
            .total_cmp(&self.lift)
            .then_with(|| other.confidence.total_cmp(&self.confidence))
            .then_with(|| other.support.total_cmp(&self.support))
            .then_with(|| self.antecedent.cmp(&other.antecedent))
            .then_with(|| self.consequent.cmp(&other.consequent))
    }
}
