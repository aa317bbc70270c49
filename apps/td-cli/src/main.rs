use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use td_app::{AppConfig, AppResult, DesignOutcome, design_service, render_flow};
use td_core::Component;
use td_extract::{ComponentOrder, Strategy};
use tracing::debug;

const DISCLAIMER: &str =
    "Conceptual output only. Final designs must be validated by certified engineers.";

#[derive(Parser)]
#[command(name = "td-cli")]
#[command(about = "Text-to-Design CLI - Structured flow designs from plain English", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a design from a plain-English description
    Generate {
        /// System description, e.g. "water system with pump, filter and tank"
        description: String,
        /// Path to a YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Extraction strategy (overrides the config file)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        /// Component ordering for keyword extraction (overrides the config file)
        #[arg(long, value_enum)]
        order: Option<OrderArg>,
        /// Print the full outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate an existing design JSON file
    Check {
        /// Path to the design JSON file
        design_path: PathBuf,
    },
    /// List the component vocabulary
    Vocabulary,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Keyword,
    Delegated,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Keyword => Strategy::Keyword,
            StrategyArg::Delegated => Strategy::Delegated,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Vocabulary,
    FirstMention,
}

impl From<OrderArg> for ComponentOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Vocabulary => ComponentOrder::Vocabulary,
            OrderArg::FirstMention => ComponentOrder::FirstMention,
        }
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Logs go to stderr so --json output stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            description,
            config,
            strategy,
            order,
            json,
        } => {
            cmd_generate(
                &description,
                config.as_deref(),
                strategy.map(Into::into),
                order.map(Into::into),
                json,
            )
            .await
        }
        Commands::Check { design_path } => cmd_check(&design_path),
        Commands::Vocabulary => {
            cmd_vocabulary();
            Ok(())
        }
    }
}

async fn cmd_generate(
    description: &str,
    config_path: Option<&Path>,
    strategy: Option<Strategy>,
    order: Option<ComponentOrder>,
    json: bool,
) -> AppResult<()> {
    let mut config = match config_path {
        Some(path) => td_app::load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(strategy) = strategy {
        config.strategy = strategy;
    }
    if let Some(order) = order {
        config.order = order;
    }
    debug!(strategy = ?config.strategy, order = ?config.order, "resolved configuration");

    let extractor = design_service::build_extractor(&config)?;
    let outcome = design_service::generate_design(&extractor, description).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome)?;
    }
    Ok(())
}

fn print_outcome(outcome: &DesignOutcome) -> AppResult<()> {
    println!("✓ Input processed successfully ({} strategy)", outcome.strategy.label());
    println!();

    println!("Structured Design Output:");
    println!("{}", serde_json::to_string_pretty(&outcome.design)?);
    println!();

    println!("System Flow Diagram:");
    println!("{}", render_flow(&outcome.design));
    println!();

    println!("Design Explanation:");
    for line in &outcome.explanations {
        println!("  • {}", line);
    }
    println!();

    print_warnings(&outcome.warnings.messages());
    println!();
    println!("Note: {}", DISCLAIMER);
    Ok(())
}

fn print_warnings(messages: &[String]) {
    if messages.is_empty() {
        println!("✓ Design passed basic validation checks.");
    } else {
        println!("Validation Warnings:");
        for message in messages {
            println!("  ⚠ {}", message);
        }
    }
}

fn cmd_check(design_path: &Path) -> AppResult<()> {
    println!("Checking design: {}", design_path.display());
    let (design, report) = design_service::check_design_file(design_path)?;
    println!(
        "  {} components, {} connections",
        design.components().len(),
        design.connections().len()
    );
    println!("{}", render_flow(&design));
    print_warnings(&report.messages());
    Ok(())
}

fn cmd_vocabulary() {
    println!("Component vocabulary:");
    for component in Component::ALL {
        match component.keyword() {
            Some(keyword) => println!("  {:<8} keyword: \"{}\"", component.name(), keyword),
            None => println!("  {:<8} (delegated strategy only)", component.name()),
        }
    }
}
