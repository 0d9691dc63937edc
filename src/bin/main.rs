use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use listing_qa::{Error, ScenarioConfig};

#[derive(Parser)]
#[command(name = "listing-qa")]
#[command(about = "Browser-driven QA checks for property-listing search")]
#[command(version)]
struct Cli {
    /// Scenario file to run
    config: PathBuf,

    /// Run in headless mode (overrides config)
    #[arg(long)]
    headless: bool,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Validate the scenario file without running
    #[arg(long)]
    check: bool,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> listing_qa::Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let mut config = ScenarioConfig::load(&cli.config)?;

    if cli.check {
        println!("Scenario valid: {}", config.name);
        println!("  Target: {}", config.target.url);
        println!("  Search: {}", config.search.query);
        println!("  Filters: {}", config.filters.len());
        for filter in &config.filters {
            println!("    - {} {}..{}", filter.kind, filter.min, filter.max);
        }
        println!(
            "  Phone reveal check: {}",
            if config.check_phone_reveal { "yes" } else { "no" }
        );
        return Ok(());
    }

    if cli.headless {
        config.browser.headless = true;
    }

    println!("Running: {}", config.name);

    match listing_qa::run_scenario(&config).await {
        Ok(()) => {
            println!();
            println!("✓ All listings satisfy the filters and invariants");
        }
        Err(Error::Validation(report)) => {
            println!();
            println!("✗ Validation failed");
            println!("{report}");
            std::process::exit(1);
        }
        Err(e) => {
            println!();
            println!("✗ Run failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
