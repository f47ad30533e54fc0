//! Plain-text rendering of estimates, comparisons and coefficient tables.

use takeoff_core::activity::Activity;
use takeoff_core::comparison::ComparisonTable;
use takeoff_core::config::BuildingConfig;
use takeoff_core::format::grouped;
use takeoff_core::{CoefficientRegistry, TakeoffEstimate};

const RULE: &str = "═══════════════════════════════════════";

fn banner(title: &str) {
    println!("{}", RULE);
    println!("  {}", title);
    println!("{}", RULE);
}

pub fn print_estimate(config: &BuildingConfig, estimate: &TakeoffEstimate, registry: &CoefficientRegistry) {
    banner("MATERIAL TAKEOFF");
    println!();
    println!("Input:");
    println!("  Area:     {} m² over {} level(s)", grouped(config.area_m2, 1), config.levels);
    if registry.is_known_region(&config.region) {
        println!("  Region:   {}", config.region);
    } else {
        println!("  Region:   {} (unknown, neutral factors)", config.region);
    }
    println!(
        "  Footprint {} m² per level, perimeter {} m",
        grouped(estimate.geometry.area_per_level.value(), 2),
        grouped(estimate.geometry.perimeter.value(), 2)
    );
    println!();

    println!("Totals:");
    for metric in estimate.totals.summary_metrics() {
        println!("  {:<8} {} {}", metric.label, metric.display, metric.unit);
    }
    if let Some(openings) = estimate.openings {
        println!("  {:<8} {}", "Doors", openings.door_count);
        println!("  {:<8} {}", "Windows", openings.window_count);
    }
    println!();

    println!("Breakdown:");
    let name_width = estimate
        .breakdown
        .iter()
        .map(|r| r.activity_name.chars().count())
        .max()
        .unwrap_or(0);
    for row in &estimate.breakdown {
        println!(
            "  {:<name_width$}  {:>10} {:<2}  {}",
            row.activity_name,
            grouped(row.quantity, 2),
            row.unit.symbol(),
            row.material_summary,
        );
    }
    println!();
}

pub fn print_comparison(table: &ComparisonTable) {
    banner("SCENARIO COMPARISON");
    println!();

    let metric_width = table
        .rows
        .iter()
        .map(|r| r.metric.chars().count() + r.unit.chars().count() + 3)
        .max()
        .unwrap_or(0);
    let column_width = table
        .labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(12);

    print!("  {:<metric_width$}", "");
    for label in &table.labels {
        print!("  {:>column_width$}", label);
    }
    println!();

    for row in &table.rows {
        let heading = format!("{} ({})", row.metric, row.unit);
        print!("  {:<metric_width$}", heading);
        for value in &row.values {
            print!("  {:>column_width$}", grouped(*value, 2));
        }
        println!();
    }
    println!();
}

pub fn print_regions(registry: &CoefficientRegistry) {
    banner("REGION FACTORS");
    println!();

    print!("  {:<16}", "Region");
    for activity in Activity::ALL {
        print!("  {:>16}", activity.display_name());
    }
    println!();

    for region in registry.regions() {
        print!("  {:<16}", region);
        for activity in Activity::ALL {
            print!("  {:>16.2}", registry.region_factor(region, activity));
        }
        println!();
    }
    println!();

    println!("Waste allowance:");
    for (activity, fraction) in &registry.waste.0 {
        println!("  {:<16} {:.0}%", activity.display_name(), fraction * 100.0);
    }
    println!();
}
