/// LDIF command-line tool: convert directory exports to and from JSON
/// records, and check LDIF files for problems.
///
/// # Command overview
///
/// ```text
/// ldif <COMMAND> [OPTIONS]
///
/// Commands:
///   import     Decode an LDIF file into JSON Lines records
///   export     Write JSON records back out as LDIF
///   validate   Decode an LDIF file and report every diagnostic
///   inspect    Print a one-line summary per entry
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Debug logging on stderr (RUST_LOG overrides)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                              |
/// |------|------------------------------------------------------|
/// | 0    | Success                                              |
/// | 1    | Error (I/O failure, bad input, validation failure)   |
///
/// Logs and error details go to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_export;
mod cmd_import;
mod cmd_inspect;
mod cmd_validate;
mod options;
mod record;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The LDIF command-line tool.
#[derive(Parser)]
#[command(name = "ldif", version, about = "LDIF import/export tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Decode an LDIF file into JSON Lines records.
    Import(ImportArgs),
    /// Write JSON records as LDIF.
    Export(ExportArgs),
    /// Decode an LDIF file and report every diagnostic.
    Validate(ValidateArgs),
    /// Print a one-line summary of each entry.
    Inspect(InspectArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Input options shared by every command that reads LDIF.
///
/// ```text
/// ┌──────────────────────┬──────────────────────────────────────────────┐
/// │ Flag                 │ Effect                                       │
/// ├──────────────────────┼──────────────────────────────────────────────┤
/// │ --encoding E         │ utf8 (default) | utf16; a BOM always wins    │
/// │ --schema-map FILE    │ JSON object {"attribute": "syntax OID", ...} │
/// │ --map NAME=OID       │ add one schema-map entry (repeatable)        │
/// │ --max-line-length N  │ fail on logical lines longer than N bytes    │
/// └──────────────────────┴──────────────────────────────────────────────┘
/// ```
///
/// Without `--schema-map` or `--map`, every `::` value stays undecoded.
#[derive(clap::Args)]
pub struct InputArgs {
    /// Path to the LDIF file.
    pub file: PathBuf,

    /// Input encoding when the file has no byte-order mark.
    #[arg(long, default_value = "utf8")]
    pub encoding: String,

    /// JSON file mapping attribute names to attributeSyntax OIDs.
    #[arg(long)]
    pub schema_map: Option<PathBuf>,

    /// Extra schema-map entry, e.g. `--map description=2.5.5.12`.
    #[arg(long = "map", value_name = "NAME=OID")]
    pub map: Vec<String>,

    /// Maximum length of a logical (unfolded) line, in bytes.
    #[arg(long)]
    pub max_line_length: Option<usize>,
}

/// Arguments for `ldif import`.
///
/// Prints one JSON object per entry (JSON Lines). Diagnostics are
/// logged to stderr and do not fail the command.
#[derive(clap::Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write records to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `ldif export`.
///
/// ```text
/// ┌───────────────┬─────────────────────────────────────────────────────┐
/// │ Flag          │ Effect                                              │
/// ├───────────────┼─────────────────────────────────────────────────────┤
/// │ -o / --output │ LDIF file to create (required)                      │
/// │ --encoding    │ utf8 (default) | utf16 (little-endian with BOM)     │
/// │ --crlf        │ CRLF line endings instead of LF                     │
/// │ --fold N      │ wrap lines longer than N bytes                      │
/// │ --timestamp   │ start with a `# Generated <time>` comment           │
/// └───────────────┴─────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct ExportArgs {
    /// JSON Lines file (or a JSON array) of records, as produced by
    /// `ldif import`.
    pub input: PathBuf,

    /// Output LDIF path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output encoding.
    #[arg(long, default_value = "utf8")]
    pub encoding: String,

    /// Use CRLF line endings.
    #[arg(long)]
    pub crlf: bool,

    /// Fold lines longer than this many bytes.
    #[arg(long)]
    pub fold: Option<usize>,

    /// Write a generation timestamp comment before the first entry.
    #[arg(long)]
    pub timestamp: bool,
}

/// Arguments for `ldif validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for `ldif inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Inspect only the entry at this zero-based index.
    #[arg(long)]
    pub entry: Option<usize>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Import(args) => cmd_import::run(&args),
        Commands::Export(args) => cmd_export::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise `warn`, or `debug` with
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
