//! One-hot encoding of transactions into a boolean matrix

use std::collections::BTreeSet;

use ndarray::Array2;

use crate::error::MiningError;

/// Transactions encoded as a boolean matrix.
///
/// Row `r` is transaction `r` of the input, column `c` is the item
/// `columns[c]`. Columns are sorted lexicographically (byte order), so the
/// same item universe always produces the same layout.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedTransactions {
    /// Item names, one per matrix column
    pub columns: Vec<String>,
    /// Presence matrix of shape (n_transactions, n_items)
    pub matrix: Array2<bool>,
}

impl EncodedTransactions {
    /// Number of encoded transactions (rows)
    pub fn n_transactions(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of distinct items (columns)
    pub fn n_items(&self) -> usize {
        self.matrix.ncols()
    }

    /// Column index of an item, if it was observed
    pub fn column_index(&self, item: &str) -> Option<usize> {
        self.columns
            .binary_search_by(|column| column.as_str().cmp(item))
            .ok()
    }

    /// Item names present in one row, in column order
    pub fn row_items(&self, row: usize) -> Vec<&str> {
        self.matrix
            .row(row)
            .iter()
            .zip(&self.columns)
            .filter(|(present, _)| **present)
            .map(|(_, name)| name.as_str())
            .collect()
    }
}

/// Encode transactions into a fixed-width boolean matrix.
///
/// Duplicate items inside one transaction collapse to a single `true`.
///
/// # Errors
/// * [`MiningError::EmptyInput`] when `transactions` is empty
/// * [`MiningError::NoItems`] when no transaction contains an item
pub fn encode<T, S>(transactions: &[T]) -> Result<EncodedTransactions, MiningError>
where
    T: AsRef<[S]>,
    S: AsRef<str>,
{
    if transactions.is_empty() {
        return Err(MiningError::EmptyInput);
    }

    let universe: BTreeSet<&str> = transactions
        .iter()
        .flat_map(|t| t.as_ref().iter().map(|item| item.as_ref()))
        .collect();

    if universe.is_empty() {
        return Err(MiningError::NoItems);
    }

    let columns: Vec<String> = universe.into_iter().map(str::to_owned).collect();
    let mut matrix = Array2::from_elem((transactions.len(), columns.len()), false);

    for (row, transaction) in transactions.iter().enumerate() {
        for item in transaction.as_ref() {
            // every item is in the universe built above
            if let Ok(col) = columns.binary_search_by(|column| column.as_str().cmp(item.as_ref())) {
                matrix[[row, col]] = true;
            }
        }
    }

    tracing::debug!(
        transactions = matrix.nrows(),
        items = matrix.ncols(),
        "encoded transactions"
    );

    Ok(EncodedTransactions { columns, matrix })
}
