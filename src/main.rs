use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use accessck::config;
use accessck::decls::DeclTable;
use accessck::diagnostics::CheckError;

#[derive(Parser)]
#[command(name = "accessck", version, about = "Check 'open' access against extensions and Objective-C visibility")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a declaration tree (.json or .toml) and report diagnostics
    Check {
        /// Declaration tree file
        file: PathBuf,
        /// Source file for positions and rendering (overrides the tree's `source`)
        #[arg(long)]
        source: Option<PathBuf>,
        /// Config file (defaults to the nearest accessck.toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Treat warnings as errors
        #[arg(long)]
        deny_warnings: bool,
    },
    /// Print the resolved declaration facts of a tree as JSON
    Decls {
        /// Declaration tree file
        file: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("ACCESSCK_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
}

fn fail(err: &CheckError) -> ! {
    eprintln!("error [{}]: {err}", err.path().display());
    std::process::exit(1);
}

fn run_check(
    file: &Path,
    source: Option<&Path>,
    config_path: Option<&Path>,
    format: Format,
    deny_warnings: bool,
) -> Result<bool, CheckError> {
    let mut config = match config_path {
        Some(p) => config::load_config(p)?,
        None => config::discover(file)?,
    };
    if deny_warnings {
        config.warnings_as_errors = true;
    }

    let outcome = accessck::check_file(file, &config, source)?;
    match format {
        Format::Text => print!("{}", outcome.render(std::io::stdout().is_terminal())),
        Format::Json => match serde_json::to_string_pretty(&outcome.report()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize report: {e}");
                return Ok(false);
            }
        },
    }
    Ok(!outcome.has_errors())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check { file, source, config, format, deny_warnings } => {
            match run_check(&file, source.as_deref(), config.as_deref(), format, deny_warnings) {
                Ok(true) => {}
                Ok(false) => std::process::exit(1),
                Err(err) => fail(&err),
            }
        }
        Commands::Decls { file } => {
            let unit = accessck::tree::load::load_tree(&file).unwrap_or_else(|err| fail(&err));
            let table = DeclTable::build(&unit);
            match serde_json::to_string_pretty(&table) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("error: failed to serialize declarations: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
