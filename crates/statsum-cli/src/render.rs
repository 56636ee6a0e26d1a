//! Text and JSON rendering of engine reports.
//!
//! All statistics come out of the engine at full precision; this module
//! decides how they look. Scalars print with Rust's shortest round-trip
//! float formatting, class boundaries with two decimals like the classic
//! "11.50 – 11.90" table style.

use statsum_engine::{Operation, Report, StatValue};

pub(crate) fn print_text(report: &Report) {
    for item in &report.items {
        match &item.outcome {
            Ok(value) => print_value(item.operation, value),
            Err(err) => println!("{}: error: {err}", item.operation.name()),
        }
    }
}

fn print_value(operation: Operation, value: &StatValue) {
    match value {
        StatValue::Scalar(x) => println!("{}: {x}", operation.name()),
        StatValue::Shape(label) => println!("{}: {label}", operation.name()),
        StatValue::Set(values) => {
            let joined = values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            println!("{}: {joined}", operation.name());
        }
        StatValue::FiveNumber(s) => {
            println!("five number summary:");
            println!("  minimum  {}", s.minimum);
            println!("  q1       {}", s.q1);
            println!("  median   {}", s.median);
            println!("  q3       {}", s.q3);
            println!("  maximum  {}", s.maximum);
        }
        StatValue::Fences(f) => {
            println!("inner and outer fences:");
            println!("  inner lower  {}", f.inner_lower);
            println!("  inner upper  {}", f.inner_upper);
            println!("  outer lower  {}", f.outer_lower);
            println!("  outer upper  {}", f.outer_upper);
        }
        StatValue::FrequencyTable(rows) => {
            println!("frequency table:");
            println!("  {:>12}  {:>9}", "value", "frequency");
            for row in rows {
                println!("  {:>12}  {:>9}", row.value, row.frequency);
            }
        }
        StatValue::StemLeaf(entries) => {
            println!("stem and leaf:");
            for entry in entries {
                let leaves = entry
                    .leaves
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("  {} | {leaves}", entry.stem);
            }
        }
        StatValue::Histogram(histogram) => {
            println!("histogram class table:");
            println!(
                "  {:>17}  {:>9}  {:>18}",
                "class boundary", "frequency", "relative frequency"
            );
            for bin in &histogram.bins {
                println!(
                    "  {:>17}  {:>9}  {:>18.4}",
                    format!("{:.2} – {:.2}", bin.lower, bin.upper),
                    bin.frequency,
                    bin.relative_frequency
                );
            }
        }
        StatValue::CumulativeTable(rows) => {
            println!("cumulative table:");
            println!(
                "  {:>17}  {:>9}  {:>18}  {:>10}",
                "class boundary", "frequency", "relative frequency", "cumulative"
            );
            for row in rows {
                println!(
                    "  {:>17}  {:>9}  {:>18.4}  {:>10}",
                    format!("{:.2} – {:.2}", row.lower, row.upper),
                    row.frequency,
                    row.relative_frequency,
                    row.cumulative_frequency
                );
            }
        }
    }
}

pub(crate) fn to_json(report: &Report) -> serde_json::Value {
    let items = report
        .items
        .iter()
        .map(|item| match &item.outcome {
            Ok(value) => serde_json::json!({
                "operation": item.operation.name(),
                "value": value,
            }),
            Err(err) => serde_json::json!({
                "operation": item.operation.name(),
                "error": err.to_string(),
            }),
        })
        .collect::<Vec<_>>();
    serde_json::Value::Array(items)
}
