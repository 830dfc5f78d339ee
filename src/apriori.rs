//! Level-wise Apriori frequent itemset mining

use std::collections::HashSet;

use ndarray::Array2;

use crate::encoder::EncodedTransactions;
use crate::error::{validate_threshold, MiningError};
use crate::model::{FrequentItemset, FrequentItemsets};

/// Mine every itemset whose support is at least `min_support`.
///
/// Level k candidates are joined from level k-1 itemsets sharing a k-2
/// prefix, then pruned when any k-1 subset is not frequent. Only surviving
/// candidates are counted against the matrix.
///
/// # Arguments
/// * `encoded` - One-hot encoded transactions
/// * `min_support` - Inclusive support threshold in (0, 1]
/// * `max_len` - Optional cap on itemset size
///
/// # Returns
/// * Frequent itemsets of every size; empty when no single item is frequent
pub fn apriori(
    encoded: &EncodedTransactions,
    min_support: f64,
    max_len: Option<usize>,
) -> Result<FrequentItemsets, MiningError> {
    validate_threshold("min_support", min_support)?;
    if max_len == Some(0) {
        return Err(MiningError::InvalidMaxLen);
    }

    let n_transactions = encoded.n_transactions();
    if n_transactions == 0 {
        return Err(MiningError::EmptyInput);
    }
    if encoded.n_items() == 0 {
        return Err(MiningError::NoItems);
    }

    let mut frequent = Vec::new();

    // L1
    let mut level: Vec<Vec<usize>> = Vec::new();
    for col in 0..encoded.n_items() {
        let count = encoded.matrix.column(col).iter().filter(|&&present| present).count();
        let support = support(count, n_transactions);
        if support >= min_support {
            level.push(vec![col]);
            frequent.push(FrequentItemset { items: vec![col], count, support });
        }
    }
    tracing::debug!(size = 1, frequent = level.len(), "apriori level");

    let mut size = 1;
    while !level.is_empty() && max_len.map_or(true, |max| size < max) {
        size += 1;

        let candidates = generate_candidates(&level);
        if candidates.is_empty() {
            break;
        }
        let counts = count_support(&encoded.matrix, &candidates);

        let n_candidates = candidates.len();
        level = Vec::new();
        for (items, count) in candidates.into_iter().zip(counts) {
            let support = support(count, n_transactions);
            if support >= min_support {
                frequent.push(FrequentItemset { items: items.clone(), count, support });
                level.push(items);
            }
        }

        tracing::debug!(size, candidates = n_candidates, frequent = level.len(), "apriori level");
    }

    tracing::info!(
        itemsets = frequent.len(),
        min_support,
        "frequent itemset mining finished"
    );

    Ok(FrequentItemsets::new(
        encoded.columns.clone(),
        n_transactions,
        min_support,
        frequent,
    ))
}

fn support(count: usize, n_transactions: usize) -> f64 {
    count as f64 / n_transactions as f64
}

/// Join step plus anti-monotone pruning.
///
/// `previous` must be sorted lexicographically with sorted members; the
/// output keeps both properties.
fn generate_candidates(previous: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let known: HashSet<&[usize]> = previous.iter().map(Vec::as_slice).collect();
    let mut candidates = Vec::new();

    for (i, left) in previous.iter().enumerate() {
        let prefix = &left[..left.len() - 1];

        for right in &previous[i + 1..] {
            if &right[..right.len() - 1] != prefix {
                // sorted input: no later itemset shares this prefix
                break;
            }

            let mut candidate = left.clone();
            candidate.push(right[right.len() - 1]);

            let all_subsets_frequent = (0..candidate.len()).all(|skip| {
                let subset: Vec<usize> = candidate
                    .iter()
                    .enumerate()
                    .filter(|&(pos, _)| pos != skip)
                    .map(|(_, &col)| col)
                    .collect();
                known.contains(subset.as_slice())
            });

            if all_subsets_frequent {
                candidates.push(candidate);
            }
        }
    }

    candidates
}

/// One pass over the matrix counting the rows that contain each candidate
fn count_support(matrix: &Array2<bool>, candidates: &[Vec<usize>]) -> Vec<usize> {
    let mut counts = vec![0; candidates.len()];

    for row in matrix.rows() {
        for (count, candidate) in counts.iter_mut().zip(candidates) {
            if candidate.iter().all(|&col| row[col]) {
                *count += 1;
            }
        }
    }

    counts
}
