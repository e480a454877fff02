//! Console output helpers for the CLI.
//!
//! All progress and summary text goes to stdout; the CSV audit log is the
//! output file, so nothing here needs to be machine-readable.

use console::Style;
use domain_recon_lib::{CollectorRow, VariantRow};
use std::time::Duration;

fn heading() -> Style {
    Style::new().yellow().bold()
}

fn good() -> Style {
    Style::new().green()
}

fn warn() -> Style {
    Style::new().yellow()
}

fn bad() -> Style {
    Style::new().red()
}

/// Banner for a collector run.
pub fn print_collect_header(input: &str, output: &str, count: usize) {
    println!("{}", heading().apply_to("Domain Info Collector"));
    println!("Reading domains from: {}", input);
    println!("Results will be saved to: {}", output);
    println!("{} domains to process", count);
    println!();
}

/// Banner for a variant scan.
pub fn print_variant_header(domains: usize, tlds: usize, total: usize) {
    println!("{}", heading().apply_to("TLD Variant Checker"));
    println!(
        "Found {} base domains; checking {} TLDs each, {} total queries.",
        domains, tlds, total
    );
    println!();
}

/// Print the TLD catalog, one column, and exit hint.
pub fn print_catalog(catalog: &[String]) {
    println!("{}", heading().apply_to("TLD variant catalog:"));
    println!();
    for tld in catalog {
        println!("  {}", tld);
    }
    println!();
    println!("{} TLDs. Override with -t/--tld or a [catalog] config section.", catalog.len());
}

/// Per-domain progress line for the collector.
pub fn print_collector_row(index: usize, total: usize, row: &CollectorRow) {
    let status = if row.information == "Invalid domain format" {
        bad().apply_to("invalid").to_string()
    } else if row.information.contains("Encountered issues:") {
        warn().apply_to("issues").to_string()
    } else {
        good().apply_to("ok").to_string()
    };
    println!("({}/{}) Finished: {} [{}]", index, total, row.domain, status);
}

/// Per-variant progress line for the checker.
pub fn print_variant_row(index: usize, total: usize, row: &VariantRow) {
    let label = if row.full_domain.is_empty() {
        &row.original_input
    } else {
        &row.full_domain
    };

    let status = if row.notes == "OK" {
        good().apply_to("OK").to_string()
    } else if row.base_name == "Error" {
        bad().apply_to(row.notes.as_str()).to_string()
    } else {
        warn().apply_to(row.notes.as_str()).to_string()
    };
    println!("({}/{}) Checked: {} [{}]", index, total, label, status);
}

/// End-of-run summary shared by both subcommands.
pub fn print_summary(rows: usize, duration: Duration, output: &str) {
    println!();
    println!(
        "{} {} rows written in {:.1}s",
        good().apply_to("Done:"),
        rows,
        duration.as_secs_f64()
    );
    println!("Results written to: {}", output);
}
