//! Integration tests for BasketForge

use basketforge::{
    encode, load_transactions, run_analysis, viz, AnalysisParams, MiningError, SourceOptions,
};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

/// Create a test CSV file in the Bread Basket layout
fn create_test_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Transaction,Item,date_time,period_day,weekday_weekend").unwrap();

    let baskets: [(u32, &[&str]); 10] = [
        (1, &["Bread", "Coffee"]),
        (2, &["Bread", "Coffee", "Pastry"]),
        (3, &["Coffee", "Pastry", "Cake"]),
        (4, &["Bread", "Coffee", "Cake"]),
        (5, &["Tea", "Cake"]),
        (6, &["Coffee", "Cake", "Pastry", "Bread"]),
        (7, &["Bread", "NONE"]),
        (8, &["Coffee", "Tea"]),
        (9, &["Bread", "Pastry"]),
        (10, &["Coffee", "Cake"]),
    ];
    for (id, items) in baskets {
        for item in items {
            writeln!(file, "{id},{item},30-10-2016 10:05,morning,weekend").unwrap();
        }
    }

    file
}

fn source_options() -> SourceOptions {
    SourceOptions {
        exclude: vec!["NONE".to_string()],
        ..SourceOptions::default()
    }
}

#[test]
fn test_end_to_end_pipeline() {
    let test_file = create_test_csv();
    let transactions = load_transactions(test_file.path(), &source_options()).unwrap();
    assert_eq!(transactions.len(), 10);

    let params = AnalysisParams {
        min_support: 0.2,
        min_confidence: 0.5,
        max_len: None,
        focus_item: Some("Cake".to_string()),
    };
    let analysis = run_analysis(&transactions, &params).unwrap();

    assert_eq!(analysis.n_transactions, 10);
    assert_eq!(analysis.n_items, 5);

    // Bread and Coffee share 4 of 10 baskets
    let bread_coffee = analysis
        .itemsets
        .iter()
        .find(|itemset| analysis.itemsets.item_names(itemset) == ["Bread", "Coffee"])
        .expect("Bread, Coffee is frequent");
    assert_eq!(bread_coffee.support, 0.4);

    // Cake -> Coffee: 4 of the 5 Cake baskets contain Coffee
    let cake_coffee = analysis
        .rules
        .iter()
        .find(|rule| rule.antecedent == ["Cake"] && rule.consequent == ["Coffee"])
        .expect("Cake -> Coffee");
    assert!((cake_coffee.confidence - 0.8).abs() < 1e-9);
    assert!((cake_coffee.lift - 0.8 / 0.7).abs() < 1e-9);

    assert!(analysis.best_rules.iter().any(|rule| rule == cake_coffee));

    let focus = analysis.focus.as_ref().unwrap();
    assert!(focus.rules.iter().all(|rule| rule.mentions("Cake")));
}

#[test]
fn test_scenario_from_item_lists() {
    let transactions = vec![
        vec!["A", "B"],
        vec!["A", "B", "C"],
        vec!["A"],
        vec!["B", "C"],
    ];
    let params = AnalysisParams {
        min_support: 0.5,
        min_confidence: 0.6,
        ..AnalysisParams::default()
    };
    let analysis = run_analysis(&transactions, &params).unwrap();

    let supports: Vec<(Vec<&str>, f64)> = analysis
        .itemsets
        .iter()
        .map(|itemset| (analysis.itemsets.item_names(itemset), itemset.support))
        .collect();
    assert!(supports.contains(&(vec!["A"], 0.75)));
    assert!(supports.contains(&(vec!["B"], 0.75)));
    assert!(supports.contains(&(vec!["C"], 0.5)));
    assert!(supports.contains(&(vec!["A", "B"], 0.5)));
    assert!(!supports.iter().any(|(names, _)| names == &["A", "C"]));

    for (antecedent, consequent) in [("A", "B"), ("B", "A")] {
        let rule = analysis
            .rules
            .iter()
            .find(|rule| rule.antecedent == [antecedent] && rule.consequent == [consequent])
            .unwrap();
        assert!((rule.confidence - 2.0 / 3.0).abs() < 1e-9);
    }
}

#[test]
fn test_error_handling() {
    let empty: Vec<Vec<String>> = Vec::new();
    assert_eq!(
        run_analysis(&empty, &AnalysisParams::default()),
        Err(MiningError::EmptyInput)
    );

    let params = AnalysisParams {
        min_support: 1.5,
        ..AnalysisParams::default()
    };
    assert!(matches!(
        run_analysis(&[vec!["A"]], &params),
        Err(MiningError::InvalidThreshold { .. })
    ));

    assert_eq!(encode(&[Vec::<String>::new()]), Err(MiningError::NoItems));
}

#[test]
fn test_high_support_leaves_no_rules() {
    let test_file = create_test_csv();
    let transactions = load_transactions(test_file.path(), &source_options()).unwrap();

    let params = AnalysisParams {
        min_support: 0.65,
        ..AnalysisParams::default()
    };
    let analysis = run_analysis(&transactions, &params).unwrap();

    // only Coffee (0.7) survives
    assert_eq!(analysis.itemsets.len(), 1);
    assert!(analysis.rules.is_empty());
    assert!(analysis.best_rules.is_empty());

    // an empty best-rules view is reported, not an error
    let temp_dir = tempdir().unwrap();
    let chart = temp_dir.path().join("rules.png");
    viz::generate_report(&analysis, 10, Some(chart.as_path()), false).unwrap();
    assert!(!chart.exists());
}
