//! Domain Recon CLI Application
//!
//! A command-line interface for bulk DNS/WHOIS reconnaissance over domain
//! names. Two subcommands share the same sequential, politely-paced engine:
//! `collect` gathers registration and DNS details for known domains, and
//! `variants` expands base names against a TLD catalog to hunt for
//! look-alike registrations.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use domain_recon_lib::{
    apply_file_config, plan_variants, CollectorRow, ConfigManager, CsvSink, DomainScanner,
    LookupConfig, VariantRow,
};
use futures::StreamExt;
use std::process;
use std::time::Duration;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domain-recon
#[derive(Parser, Debug)]
#[command(name = "domain-recon")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bulk DNS/WHOIS reconnaissance for look-alike domain triage")]
#[command(
    long_about = "Bulk DNS/WHOIS reconnaissance over domain names.\n\nReads a batch of domains, queries DNS and WHOIS for each, and records structured results to CSV for analyst triage."
)]
#[command(styles = STYLES)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Use specific config file instead of automatic discovery
    #[arg(
        long = "config",
        value_name = "FILE",
        global = true,
        help_heading = "Configuration"
    )]
    pub config: Option<String>,

    /// Verbose logging
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        help_heading = "Configuration"
    )]
    pub verbose: bool,

    /// Show debug-level lookup tracing
    #[arg(
        short = 'd',
        long = "debug",
        global = true,
        help_heading = "Configuration"
    )]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Gather WHOIS and DNS details for each domain in a CSV file
    Collect {
        /// Input CSV file; the first column of each row is the domain
        #[arg(short = 'i', long = "input", value_name = "FILE")]
        input: String,

        /// Output CSV file path
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: String,

        /// DNS lookup timeout in milliseconds
        #[arg(long = "timeout-ms", value_name = "MS")]
        timeout_ms: Option<u64>,

        /// Delay between domains in milliseconds
        #[arg(long = "delay-ms", value_name = "MS")]
        delay_ms: Option<u64>,
    },

    /// Expand base names against the TLD catalog and probe every variant
    Variants {
        /// Input text file, one domain per line
        #[arg(short = 'i', long = "input", value_name = "FILE")]
        input: Option<String>,

        /// Output CSV file path
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<String>,

        /// TLDs to check (comma-separated or multiple -t flags)
        #[arg(
            short = 't',
            long = "tld",
            value_name = "TLD",
            value_delimiter = ',',
            action = clap::ArgAction::Append
        )]
        tlds: Option<Vec<String>>,

        /// List the TLD variant catalog and exit
        #[arg(long = "list-tlds")]
        list_tlds: bool,

        /// DNS lookup timeout in milliseconds
        #[arg(long = "timeout-ms", value_name = "MS")]
        timeout_ms: Option<u64>,

        /// Delay between variants in milliseconds
        #[arg(long = "delay-ms", value_name = "MS")]
        delay_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_tracing(&args);

    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Set up tracing to stderr; RUST_LOG wins over the flag-derived default.
fn init_tracing(args: &Args) {
    let default_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "domain_recon_lib={level},domain_recon={level}",
            level = default_level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    if let Command::Variants {
        input,
        output,
        list_tlds,
        ..
    } = &args.command
    {
        // --list-tlds is self-contained, skip other validation
        if *list_tlds {
            return Ok(());
        }

        if input.is_none() || output.is_none() {
            return Err(
                "You must specify --input and --output (or use --list-tlds)".to_string(),
            );
        }
    }

    Ok(())
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    match &args.command {
        Command::Collect {
            input,
            output,
            timeout_ms,
            delay_ms,
        } => {
            // The collector has always paced slightly faster than the
            // variant checker
            let base = LookupConfig::default().with_pacing_delay(Duration::from_millis(750));
            let config = build_config(&args, base, *timeout_ms, *delay_ms, &None)?;
            run_collect(input, output, config).await
        }
        Command::Variants {
            input,
            output,
            tlds,
            list_tlds,
            timeout_ms,
            delay_ms,
        } => {
            let config = build_config(
                &args,
                LookupConfig::default(),
                *timeout_ms,
                *delay_ms,
                tlds,
            )?;

            if *list_tlds {
                let scanner = DomainScanner::with_config(config)?;
                ui::print_catalog(&scanner.catalog());
                return Ok(());
            }

            // Presence enforced by validate_args
            let input = input.as_deref().unwrap_or_default();
            let output = output.as_deref().unwrap_or_default();
            run_variants(input, output, config).await
        }
    }
}

/// Build LookupConfig with proper precedence.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments (explicit user input)
/// 2. Config file (explicit --config path, or automatic discovery)
/// 3. Built-in defaults (including the subcommand's pacing default)
fn build_config(
    args: &Args,
    base: LookupConfig,
    timeout_ms: Option<u64>,
    delay_ms: Option<u64>,
    tlds: &Option<Vec<String>>,
) -> Result<LookupConfig, Box<dyn std::error::Error>> {
    let mut config = base;

    let config_manager = ConfigManager::new(args.verbose);

    if let Some(explicit_path) = &args.config {
        let file_config = config_manager
            .load_file(explicit_path)
            .map_err(|e| format!("Failed to load config file '{}': {}", explicit_path, e))?;
        config = apply_file_config(config, &file_config);
    } else {
        match config_manager.discover_and_load() {
            Ok(file_config) => {
                config = apply_file_config(config, &file_config);
            }
            Err(e) if args.verbose => {
                eprintln!("Config discovery warning: {}", e);
            }
            Err(_) => {
                // Silently continue with defaults if no config files found
            }
        }
    }

    // CLI arguments always win over config files
    if let Some(timeout_ms) = timeout_ms {
        config = config.with_dns_timeout(Duration::from_millis(timeout_ms));
    }
    if let Some(delay_ms) = delay_ms {
        config = config.with_pacing_delay(Duration::from_millis(delay_ms));
    }
    if let Some(tlds) = tlds {
        config = config.with_tlds(tlds.clone());
    }

    Ok(config)
}

/// Run the domain-info collector.
async fn run_collect(
    input: &str,
    output: &str,
    config: LookupConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let entries = read_collector_entries(input)?;

    let scanner = DomainScanner::with_config(config)?;
    let mut sink = CsvSink::create(output, &CollectorRow::HEADERS)?;

    ui::print_collect_header(input, output, entries.len());

    let start_time = std::time::Instant::now();
    let total = entries.len();
    let mut written = 0usize;

    let mut stream = scanner.collect_stream(&entries);
    while let Some(row) = stream.next().await {
        sink.write_row(&row)?;
        written += 1;
        ui::print_collector_row(written, total, &row);
    }

    sink.finish()?;
    ui::print_summary(written, start_time.elapsed(), output);

    Ok(())
}

/// Run the TLD variant checker.
async fn run_variants(
    input: &str,
    output: &str,
    config: LookupConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = read_variant_inputs(input)?;

    let scanner = DomainScanner::with_config(config)?;
    let catalog = scanner.catalog();
    let plan = plan_variants(&inputs, &catalog);

    let mut sink = CsvSink::create(output, &VariantRow::HEADERS)?;

    ui::print_variant_header(inputs.len(), catalog.len(), plan.len());

    let start_time = std::time::Instant::now();
    let total = plan.len();
    let mut written = 0usize;

    let mut stream = scanner.variant_stream(plan);
    while let Some(row) = stream.next().await {
        sink.write_row(&row)?;
        written += 1;
        ui::print_variant_row(written, total, &row);
    }

    sink.finish()?;
    ui::print_summary(written, start_time.elapsed(), output);

    Ok(())
}

/// Read raw first-column values from the collector's input CSV.
///
/// Rows are kept as-is (including empty or malformed domains) so that the
/// scanner can emit its placeholder rows; only fully empty lines disappear,
/// which the CSV reader already skips.
fn read_collector_entries(path: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| format!("Error: Input file '{}' not readable: {}", path, e))?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| format!("Error reading input CSV '{}': {}", path, e))?;
        let first = record.get(0).unwrap_or("").to_string();
        entries.push(first);
    }

    Ok(entries)
}

/// Read the variant checker's input: one domain per line.
fn read_variant_inputs(path: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Error: Input file '{}' not readable: {}", path, e))?;

    let inputs: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if inputs.is_empty() {
        return Err("Input file is empty or contains no valid domain lines.".into());
    }

    Ok(inputs)
}

// domain-recon/src/main.rs tests module

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn variants_args(input: Option<&str>, output: Option<&str>, list_tlds: bool) -> Args {
        Args {
            command: Command::Variants {
                input: input.map(String::from),
                output: output.map(String::from),
                tlds: None,
                list_tlds,
                timeout_ms: None,
                delay_ms: None,
            },
            config: None,
            verbose: false,
            debug: false,
        }
    }

    #[test]
    fn test_validate_variants_requires_paths() {
        let args = variants_args(None, None, false);
        assert!(validate_args(&args).is_err());

        let args = variants_args(Some("in.txt"), Some("out.csv"), false);
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_list_tlds_is_self_contained() {
        let args = variants_args(None, None, true);
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_build_config_cli_overrides_defaults() {
        let args = variants_args(Some("in.txt"), Some("out.csv"), false);
        let config = build_config(
            &args,
            LookupConfig::default(),
            Some(4000),
            Some(100),
            &Some(vec!["dev".to_string()]),
        )
        .unwrap();

        assert_eq!(config.dns_timeout, Duration::from_millis(4000));
        assert_eq!(config.pacing_delay, Duration::from_millis(100));
        assert_eq!(config.tlds.unwrap(), vec!["dev"]);
    }

    #[test]
    fn test_build_config_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[defaults]\ndelay_ms = 250").unwrap();

        let mut args = variants_args(Some("in.txt"), Some("out.csv"), false);
        args.config = Some(file.path().to_string_lossy().to_string());

        let config =
            build_config(&args, LookupConfig::default(), None, None, &None).unwrap();
        assert_eq!(config.pacing_delay, Duration::from_millis(250));

        // CLI flag still wins over the file
        let config =
            build_config(&args, LookupConfig::default(), None, Some(50), &None).unwrap();
        assert_eq!(config.pacing_delay, Duration::from_millis(50));
    }

    #[test]
    fn test_build_config_missing_explicit_file_fails() {
        let mut args = variants_args(Some("in.txt"), Some("out.csv"), false);
        args.config = Some("/nonexistent/domain-recon.toml".to_string());

        assert!(build_config(&args, LookupConfig::default(), None, None, &None).is_err());
    }

    #[test]
    fn test_read_collector_entries_keeps_row_shape() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "example.com,note").unwrap();
        writeln!(file, ",missing-domain").unwrap();
        writeln!(file, "not a domain").unwrap();

        let entries = read_collector_entries(&file.path().to_string_lossy()).unwrap();
        assert_eq!(entries, vec!["example.com", "", "not a domain"]);
    }

    #[test]
    fn test_read_variant_inputs_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "example.com\n\n  other.org  \n").unwrap();

        let entries = read_variant_inputs(&file.path().to_string_lossy()).unwrap();
        assert_eq!(entries, vec!["example.com", "other.org"]);
    }

    #[test]
    fn test_read_variant_inputs_empty_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(read_variant_inputs(&file.path().to_string_lossy()).is_err());
    }
}
