use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use quickrecipes::catalog::{catalog, Recipe};
use quickrecipes::config::ViewerConfig;
use quickrecipes::error::AppError;
use quickrecipes::logging::{init_logging, LogLevel, LoggingConfig};
use quickrecipes::ui::tui::render_page_string;
use quickrecipes::ui::{run_interactive, terminal_width};
use quickrecipes::viewer::{OverlapPolicy, RecipeViewer};

/// Widest plain output gets, matching the interactive card.
const MAX_OUTPUT_WIDTH: usize = 76;

#[derive(Parser, Debug)]
#[command(name = "quickrecipes")]
#[command(version)]
#[command(about = "Quick & easy recipes, picked at random")]
#[command(after_help = "Examples:
  quickrecipes                          Browse random recipes (n for a new one, q to quit)
  quickrecipes pick                     Print one random recipe
  quickrecipes pick --name \"Avocado Toast\"
  quickrecipes list --json              Print the catalog as JSON")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, short, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Disable colors (also respects NO_COLOR environment variable)
    #[arg(long, global = true)]
    no_color: bool,

    /// Disable the fade transition
    #[arg(long, global = true)]
    no_animation: bool,

    /// Transition length in milliseconds (overrides configuration)
    #[arg(long, value_name = "MS")]
    transition_ms: Option<u64>,

    /// Behavior of repeated triggers during a transition
    #[arg(long, value_enum)]
    overlap: Option<OverlapPolicy>,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Append logs to this file (the interactive view logs nowhere else)
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print one recipe and exit
    Pick {
        /// Seed the random pick for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Print this catalog entry instead of a random one
        #[arg(long, conflicts_with = "seed")]
        name: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Wrap text to this many columns (default: terminal width)
        #[arg(long, value_name = "COLUMNS")]
        width: Option<usize>,
    },
    /// Print every recipe in the catalog
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as JSON
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            err.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = build_config(&cli)?;

    let Some(command) = cli.command else {
        // The interactive view owns the terminal: log to a file or not at all.
        if cli.log_file.is_some() {
            init_logging(
                LoggingConfig::from_verbosity(cli.verbose).with_file(cli.log_file.as_ref()),
            )?;
        }
        return run_interactive(&config).await;
    };

    let level = match cli.verbose {
        0 => LogLevel::Warn,
        v => LogLevel::from(v),
    };
    init_logging(
        LoggingConfig::new()
            .with_level(level)
            .with_file(cli.log_file.as_ref()),
    )?;

    match command {
        Commands::Pick {
            seed,
            name,
            json,
            width,
        } => {
            let recipe = match name {
                Some(name) => Recipe::by_name(&name).ok_or(AppError::UnknownRecipe(name))?,
                None => {
                    let mut viewer = match seed {
                        Some(seed) => RecipeViewer::seeded(&config, seed),
                        None => RecipeViewer::new(&config),
                    };
                    viewer.select_now()
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(recipe)?);
            } else {
                let width = width.unwrap_or_else(|| terminal_width().min(MAX_OUTPUT_WIDTH));
                print!("{}", render_page_string(Some(recipe), width, config.colors));
            }
        }
        Commands::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(catalog())?);
            } else {
                for (index, recipe) in catalog().iter().enumerate() {
                    println!(
                        "{}. {} ({}, serves {})",
                        index + 1,
                        recipe.name,
                        recipe.prep_time,
                        recipe.servings
                    );
                }
            }
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Load configuration and apply command line overrides.
fn build_config(cli: &Cli) -> Result<ViewerConfig, AppError> {
    let mut config = ViewerConfig::load(cli.config.as_deref())?;

    if cli.no_color || std::env::var("NO_COLOR").is_ok() {
        config = config.with_colors(false);
    }
    if cli.no_animation {
        config = config.with_animations(false);
    }
    if let Some(ms) = cli.transition_ms {
        config = config.with_transition_ms(ms).validated()?;
    }
    if let Some(overlap) = cli.overlap {
        config = config.with_overlap(overlap);
    }

    Ok(config)
}
