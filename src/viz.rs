//! Console tables and the confidence/lift scatter chart using Plotters

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::model::{AssociationRule, FrequentItemsets};
use crate::pipeline::Analysis;
use crate::rules::{BEST_MIN_CONFIDENCE, BEST_MIN_LIFT};

const CHART_SIZE: (u32, u32) = (800, 600);
const MIN_MARKER_RADIUS: i32 = 4;
const MAX_MARKER_RADIUS: i32 = 20;
const MARKER_COLOR: RGBColor = BLUE;

/// Scatter plot of rules: confidence on x, lift on y, marker size by support
///
/// # Arguments
/// * `rules` - Rules to plot, usually the best rules
/// * `output_path` - Target file; `.svg` selects the SVG backend, anything else PNG
/// * `plot_title` - Title for the plot
///
/// # Returns
/// * `false` without touching the file when there is nothing to plot
pub fn create_rules_scatter(
    rules: &[AssociationRule],
    output_path: &Path,
    plot_title: Option<&str>,
) -> crate::Result<bool> {
    if rules.is_empty() {
        return Ok(false);
    }

    let title = plot_title.unwrap_or("Confidence vs Lift");

    if is_svg(output_path) {
        let root = SVGBackend::new(output_path, CHART_SIZE).into_drawing_area();
        draw_scatter(&root, rules, title)?;
    } else {
        let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
        draw_scatter(&root, rules, title)?;
    }

    tracing::info!(rules = rules.len(), path = %output_path.display(), "scatter chart written");
    Ok(true)
}

fn draw_scatter<DB>(
    root: &DrawingArea<DB, Shift>,
    rules: &[AssociationRule],
    title: &str,
) -> crate::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (x_min, x_max) = padded_range(rules.iter().map(|rule| rule.confidence));
    let (y_min, y_max) = padded_range(rules.iter().map(|rule| rule.lift));
    let max_support = rules.iter().map(|rule| rule.support).fold(0.0, f64::max);

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Confidence")
        .y_desc("Lift")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    chart
        .draw_series(rules.iter().map(|rule| {
            Circle::new(
                (rule.confidence, rule.lift),
                marker_radius(rule.support, max_support),
                MARKER_COLOR.mix(0.5).filled(),
            )
        }))?
        .label("Rule (size = support)")
        .legend(|(x, y)| Circle::new((x, y), 5, MARKER_COLOR.mix(0.5).filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Min and max of `values` widened by 10% (at least 0.05) on each side
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.1).max(0.05);
    (min - pad, max + pad)
}

fn marker_radius(support: f64, max_support: f64) -> i32 {
    if max_support <= 0.0 {
        return MIN_MARKER_RADIUS;
    }
    let scaled = (support / max_support).clamp(0.0, 1.0);
    MIN_MARKER_RADIUS + (scaled * f64::from(MAX_MARKER_RADIUS - MIN_MARKER_RADIUS)).round() as i32
}

/// One table row: antecedents, consequents, support, confidence, lift.
///
/// `detailed` appends antecedent support, consequent support, leverage and
/// conviction.
pub fn format_rule_row(rule: &AssociationRule, detailed: bool) -> String {
    let mut row = format!(
        "  {:<32} | {:<24} | {:7.4} | {:10.4} | {:6.3}",
        rule.antecedent_label(),
        rule.consequent_label(),
        rule.support,
        rule.confidence,
        rule.lift
    );
    if detailed {
        row.push_str(&format!(
            " | {:8.4} | {:8.4} | {:8.4} | {:10.3}",
            rule.antecedent_support, rule.consequent_support, rule.leverage, rule.conviction
        ));
    }
    row
}

/// Print the `top` itemsets with the highest support
pub fn print_itemsets(itemsets: &FrequentItemsets, top: usize) {
    println!("\n=== Frequent Itemsets ===");
    println!(
        "Items that are often bought together: {} itemsets at min support {}",
        itemsets.len(),
        itemsets.min_support()
    );

    if itemsets.is_empty() {
        println!("  No itemset reaches the minimum support.");
        return;
    }

    println!("  Support | Itemset");
    println!("  --------|--------");
    for itemset in itemsets.sorted_by_support().into_iter().take(top) {
        println!("  {:7.4} | {}", itemset.support, itemsets.item_names(itemset).join(", "));
    }
}

/// Print a rule table, or `empty_message` when there are no rules
pub fn print_rules(title: &str, rules: &[AssociationRule], empty_message: &str, detailed: bool) {
    println!("\n=== {} ===", title);

    if rules.is_empty() {
        println!("  {}", empty_message);
        return;
    }

    let mut header = format!(
        "  {:<32} | {:<24} | {:>7} | {:>10} | {:>6}",
        "Antecedents", "Consequents", "Support", "Confidence", "Lift"
    );
    if detailed {
        header.push_str(&format!(
            " | {:>8} | {:>8} | {:>8} | {:>10}",
            "Ante sup", "Cons sup", "Leverage", "Conviction"
        ));
    }
    println!("{}", header);
    println!("  {}", "-".repeat(header.len() - 2));
    for rule in rules {
        println!("{}", format_rule_row(rule, detailed));
    }
}

/// Print every section of an analysis and draw the chart when a path is given
///
/// `detailed` adds the secondary rule metrics to every rule table.
pub fn generate_report(
    analysis: &Analysis,
    top: usize,
    chart_path: Option<&Path>,
    detailed: bool,
) -> crate::Result<()> {
    println!("\nTransactions: {}", analysis.n_transactions);
    println!("Distinct items: {}", analysis.n_items);

    print_itemsets(&analysis.itemsets, top);

    print_rules(
        "Association Rules",
        &analysis.rules,
        "No rule reaches the minimum confidence.",
        detailed,
    );

    let best_empty = format!(
        "No rule has confidence >= {} and lift > {}.",
        BEST_MIN_CONFIDENCE, BEST_MIN_LIFT
    );
    print_rules("Best Rules", &analysis.best_rules, &best_empty, detailed);

    if let Some(focus) = &analysis.focus {
        print_rules(
            &format!("Rules involving '{}'", focus.item),
            &focus.rules,
            "No rule mentions this item.",
            detailed,
        );
    }

    if let Some(path) = chart_path {
        if create_rules_scatter(&analysis.best_rules, path, Some("Confidence vs Lift of Best Rules"))? {
            println!("\nScatter chart saved to: {}", path.display());
        } else {
            println!("\nNo best rules to plot; chart skipped.");
        }
    }

    print_summary();
    Ok(())
}

fn print_summary() {
    println!("\n=== Conclusion ===");
    println!("- Lift > 1 marks items bought together more often than chance.");
    println!("- Such rules can drive product recommendations, shelf placement");
    println!("  and promotion bundles.");
}
