//! Association rule generation and rule filters

use crate::error::{validate_threshold, MiningError};
use crate::model::{AssociationRule, FrequentItemsets};

/// Minimum confidence of a "best" rule
pub const BEST_MIN_CONFIDENCE: f64 = 0.6;

/// A "best" rule must have lift strictly above this
pub const BEST_MIN_LIFT: f64 = 1.0;

/// Derive every rule whose confidence is at least `min_confidence`.
///
/// Each frequent itemset of two or more items is split into every
/// non-empty proper antecedent and its complement as consequent. Counts
/// of both sides come from `itemsets`; anti-monotonicity guarantees they
/// are present. Confidence and lift are single divisions of transaction
/// counts, so exact ties with a threshold and exact independence
/// (lift 1) survive without rounding drift.
///
/// Rules are returned grouped by source itemset; use [`sort_by_lift`] for
/// a ranked view.
pub fn association_rules(
    itemsets: &FrequentItemsets,
    min_confidence: f64,
) -> Result<Vec<AssociationRule>, MiningError> {
    validate_threshold("min_confidence", min_confidence)?;

    let n = itemsets.n_transactions();
    let mut rules = Vec::new();

    for itemset in itemsets.iter().filter(|itemset| itemset.len() >= 2) {
        for antecedent_size in 1..itemset.len() {
            for antecedent in combinations(&itemset.items, antecedent_size) {
                let consequent: Vec<usize> = itemset
                    .items
                    .iter()
                    .copied()
                    .filter(|col| !antecedent.contains(col))
                    .collect();

                let (Some(antecedent_count), Some(consequent_count)) =
                    (itemsets.count_of(&antecedent), itemsets.count_of(&consequent))
                else {
                    tracing::warn!(?antecedent, ?consequent, "subset missing from frequent itemsets");
                    continue;
                };

                let confidence = itemset.count as f64 / antecedent_count as f64;
                if confidence < min_confidence {
                    continue;
                }

                let antecedent_support = antecedent_count as f64 / n as f64;
                let consequent_support = consequent_count as f64 / n as f64;
                // exact products; the division is the only rounding step
                let lift = (itemset.count as u128 * n as u128) as f64
                    / (antecedent_count as u128 * consequent_count as u128) as f64;

                rules.push(AssociationRule {
                    antecedent: to_names(itemsets, &antecedent),
                    consequent: to_names(itemsets, &consequent),
                    antecedent_support,
                    consequent_support,
                    support: itemset.support,
                    confidence,
                    lift,
                    leverage: itemset.support - antecedent_support * consequent_support,
                    conviction: conviction(consequent_support, confidence),
                });
            }
        }
    }

    tracing::info!(rules = rules.len(), min_confidence, "rule generation finished");

    Ok(rules)
}

/// All `size`-element combinations of `items`, in lexicographic order of positions
pub(crate) fn combinations(items: &[usize], size: usize) -> Vec<Vec<usize>> {
    let n = items.len();
    if size == 0 || size > n {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut positions: Vec<usize> = (0..size).collect();

    loop {
        result.push(positions.iter().map(|&pos| items[pos]).collect());

        // rightmost position that can still advance
        let mut slot = size;
        while slot > 0 && positions[slot - 1] == slot - 1 + n - size {
            slot -= 1;
        }
        if slot == 0 {
            return result;
        }

        positions[slot - 1] += 1;
        for next in slot..size {
            positions[next] = positions[next - 1] + 1;
        }
    }
}

fn to_names(itemsets: &FrequentItemsets, items: &[usize]) -> Vec<String> {
    itemsets.names_of(items).into_iter().map(str::to_owned).collect()
}

fn conviction(consequent_support: f64, confidence: f64) -> f64 {
    if confidence >= 1.0 {
        f64::INFINITY
    } else {
        (1.0 - consequent_support) / (1.0 - confidence)
    }
}

/// Sort rules by lift, highest first.
///
/// Ties fall back to confidence, support, then item names, so the order is
/// stable across runs.
pub fn sort_by_lift(rules: &mut [AssociationRule]) {
    rules.sort_by(AssociationRule::cmp_by_lift);
}

/// True for rules with confidence >= 0.6 and lift > 1
pub fn is_best_rule(rule: &AssociationRule) -> bool {
    rule.confidence >= BEST_MIN_CONFIDENCE && rule.lift > BEST_MIN_LIFT
}

/// Rules passing [`is_best_rule`], in input order. May be empty.
pub fn best_rules(rules: &[AssociationRule]) -> Vec<AssociationRule> {
    rules.iter().filter(|rule| is_best_rule(rule)).cloned().collect()
}

/// Rules with `item` in the antecedent or the consequent, in input order
pub fn rules_with_item(rules: &[AssociationRule], item: &str) -> Vec<AssociationRule> {
    rules.iter().filter(|rule| rule.mentions(item)).cloned().collect()
}
