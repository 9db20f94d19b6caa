//! CLI binary entry point for iflow-cli

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use iflow_converter::cli::commands::convert::{ConvertArgs, handle_convert};
#[cfg(feature = "cli")]
use iflow_converter::cli::commands::types::handle_types;
#[cfg(feature = "cli")]
use iflow_converter::cli::commands::validate::handle_validate;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "iflow-cli")]
#[command(about = "Convert integration-pipeline metadata into BPMN iFlow packages")]
#[command(version)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Convert a metadata document into an iFlow package or XML
    Convert {
        /// Input file (.json, .yaml, .yml) or '-' for stdin
        input: String,
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write only the iFlow XML instead of a zip package
        #[arg(long)]
        xml_only: bool,
        /// Endpoint to convert when the document declares several
        #[arg(short, long)]
        endpoint: Option<String>,
        /// Directory of scripts to include in the package
        #[arg(long)]
        scripts: Option<PathBuf>,
        /// Configuration file (defaults to .iflow-converter.toml next to the input)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Overwrite existing files without prompting
        #[arg(short, long)]
        force: bool,
    },
    /// Validate a metadata document without converting it
    Validate {
        /// Input file path or '-' for stdin
        #[arg(default_value = "-")]
        input: String,
    },
    /// List registered component types
    Types {
        /// Only list one category (e.g. adapter, routing, security)
        #[arg(long)]
        category: Option<String>,
    },
}

#[cfg(feature = "cli")]
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::INFO,
        (false, _) => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            xml_only,
            endpoint,
            scripts,
            config,
            force,
        } => {
            let args = ConvertArgs {
                input,
                output,
                xml_only,
                endpoint,
                scripts,
                config,
                force,
            };
            handle_convert(&args)
        }
        Commands::Validate { input } => handle_validate(&input),
        Commands::Types { category } => handle_types(category.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}
