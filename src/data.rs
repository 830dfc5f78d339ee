//! Transaction loading from CSV using Polars

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use anyhow::Context;
use polars::prelude::*;

/// One basket: a transaction id and the distinct items bought in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction id as it appeared in the source, rendered as text
    pub id: String,
    /// Distinct item names, sorted
    pub items: Vec<String>,
}

impl AsRef<[String]> for Transaction {
    fn as_ref(&self) -> &[String] {
        &self.items
    }
}

/// Which columns hold the transaction id and the item, and which items to drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    pub transaction_column: String,
    pub item_column: String,
    /// Item names discarded while loading (e.g. placeholder values)
    pub exclude: Vec<String>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            transaction_column: "Transaction".to_string(),
            item_column: "Item".to_string(),
            exclude: Vec::new(),
        }
    }
}

/// Read a CSV file into a DataFrame, header row required
fn read_csv(path: &Path) -> crate::Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("failed to open {}", path.display()))?
        .finish()
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(df)
}

/// Load `(transaction id, item)` rows and group them into transactions
///
/// # Arguments
/// * `path` - CSV file with a header row
/// * `options` - Column names and excluded items
///
/// # Returns
/// * Transactions in order of first appearance, items deduplicated and sorted.
///   Rows with a null id or item, blank items and excluded items are skipped;
///   a transaction left with no items is dropped.
pub fn load_transactions(path: impl AsRef<Path>, options: &SourceOptions) -> crate::Result<Vec<Transaction>> {
    let path = path.as_ref();
    let df = read_csv(path)?;

    tracing::debug!(rows = df.height(), file = %path.display(), "read transaction table");

    let ids = df
        .column(&options.transaction_column)
        .with_context(|| format!("missing column '{}' in {}", options.transaction_column, path.display()))?
        .cast(&DataType::String)?;
    let items = df
        .column(&options.item_column)
        .with_context(|| format!("missing column '{}' in {}", options.item_column, path.display()))?
        .cast(&DataType::String)?;

    let transactions = group_rows(ids.str()?.into_iter().zip(items.str()?), &options.exclude);

    tracing::info!(
        transactions = transactions.len(),
        file = %path.display(),
        "loaded transactions"
    );

    Ok(transactions)
}

/// Group `(id, item)` pairs by id, keeping the order ids first appear in
fn group_rows<'a>(
    rows: impl Iterator<Item = (Option<&'a str>, Option<&'a str>)>,
    exclude: &[String],
) -> Vec<Transaction> {
    let mut order: Vec<&str> = Vec::new();
    let mut baskets: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    let mut skipped = 0usize;

    for (id, item) in rows {
        let (Some(id), Some(item)) = (id, item) else {
            skipped += 1;
            continue;
        };

        let item = item.trim();
        if item.is_empty() || exclude.iter().any(|excluded| excluded == item) {
            skipped += 1;
            continue;
        }

        baskets
            .entry(id)
            .or_insert_with(|| {
                order.push(id);
                BTreeSet::new()
            })
            .insert(item);
    }

    if skipped > 0 {
        tracing::debug!(skipped, "skipped rows without a usable item");
    }

    order
        .into_iter()
        .map(|id| Transaction {
            id: id.to_string(),
            items: baskets
                .remove(id)
                .unwrap_or_default()
                .into_iter()
                .map(str::to_owned)
                .collect(),
        })
        .collect()
}

/// First `rows` rows of the raw table, for display
pub fn preview(path: impl AsRef<Path>, rows: usize) -> crate::Result<DataFrame> {
    Ok(read_csv(path.as_ref())?.head(Some(rows)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Transaction,Item,date_time,period_day,weekday_weekend").unwrap();
        writeln!(file, "1,Bread,30-10-2016 09:58,morning,weekend").unwrap();
        writeln!(file, "2,Scandinavian,30-10-2016 10:05,morning,weekend").unwrap();
        writeln!(file, "2,Scandinavian,30-10-2016 10:05,morning,weekend").unwrap();
        writeln!(file, "3,Hot chocolate,30-10-2016 10:07,morning,weekend").unwrap();
        writeln!(file, "3,Jam,30-10-2016 10:07,morning,weekend").unwrap();
        writeln!(file, "3,Cookies,30-10-2016 10:07,morning,weekend").unwrap();
        writeln!(file, "4,Muffin,30-10-2016 10:08,morning,weekend").unwrap();
        writeln!(file, "4,NONE,30-10-2016 10:08,morning,weekend").unwrap();
        writeln!(file, "1,Coffee,30-10-2016 09:58,morning,weekend").unwrap();
        file
    }

    #[test]
    fn test_load_transactions() {
        let test_file = create_test_csv();
        let transactions = load_transactions(test_file.path(), &SourceOptions::default()).unwrap();

        assert_eq!(transactions.len(), 4);
        assert_eq!(transactions[0].id, "1");
        assert_eq!(transactions[0].items, vec!["Bread", "Coffee"]);
        assert_eq!(transactions[1].items, vec!["Scandinavian"]);
        assert_eq!(transactions[2].items, vec!["Cookies", "Hot chocolate", "Jam"]);
        assert_eq!(transactions[3].items, vec!["Muffin", "NONE"]);
    }

    #[test]
    fn test_exclude_items() {
        let test_file = create_test_csv();
        let options = SourceOptions {
            exclude: vec!["NONE".to_string()],
            ..SourceOptions::default()
        };
        let transactions = load_transactions(test_file.path(), &options).unwrap();
        assert_eq!(transactions[3].items, vec!["Muffin"]);
    }

    #[test]
    fn test_missing_column() {
        let test_file = create_test_csv();
        let options = SourceOptions {
            item_column: "Product".to_string(),
            ..SourceOptions::default()
        };
        let err = load_transactions(test_file.path(), &options).unwrap_err();
        assert!(err.to_string().contains("Product"));
    }

    #[test]
    fn test_missing_file() {
        assert!(load_transactions("/nonexistent/basket.csv", &SourceOptions::default()).is_err());
    }

    #[test]
    fn test_group_rows_skips_unusable_rows() {
        let rows = vec![
            (Some("a"), Some("Tea")),
            (None, Some("Cake")),
            (Some("b"), None),
            (Some("a"), Some("  ")),
            (Some("a"), Some(" Cake ")),
            (Some("c"), Some("NONE")),
        ];
        let transactions = group_rows(rows.into_iter(), &["NONE".to_string()]);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].items, vec!["Cake", "Tea"]);
    }

    #[test]
    fn test_preview() {
        let test_file = create_test_csv();
        let head = preview(test_file.path(), 3).unwrap();
        assert_eq!(head.height(), 3);
        assert_eq!(head.width(), 5);
    }
}
