#![doc = include_str!("../README.md")]

use std::io::{self, Read, Write};

use facet::Facet;
use figue as args;
use stc_ini_tree::{DiagnosticList, Document, Entry, RenderReport};
use tracing::debug;

// ============================================================================
// Exit codes
// ============================================================================

const EXIT_SUCCESS: i32 = 0;
const EXIT_SYNTAX_ERROR: i32 = 1;
const EXIT_LOOKUP_ERROR: i32 = 2;
const EXIT_IO_ERROR: i32 = 3;

// ============================================================================
// CLI argument structures
// ============================================================================

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the log filter.
const LOG_ENV: &str = "STC_INI_LOG";

/// Top-level CLI with a subcommand
#[derive(Facet, Debug)]
struct Args {
    /// Show version
    #[facet(args::named, args::short = 'V', default)]
    version: bool,

    /// Subcommand to run
    #[facet(args::subcommand, default)]
    command: Option<Command>,
}

/// Available subcommands
#[derive(Facet, Debug)]
#[repr(u8)]
enum Command {
    /// Report every syntax error in a file
    Check {
        /// Input file (or "-" for stdin)
        #[facet(args::positional)]
        file: String,

        /// Print `file:line:col: message` lines instead of reports
        #[facet(args::named, default)]
        plain: bool,
    },

    /// Print the normalized document
    Dump {
        /// Input file (or "-" for stdin)
        #[facet(args::positional)]
        file: String,

        /// Print JSON instead of INI
        #[facet(args::named, default)]
        json: bool,
    },

    /// Print one value
    Get {
        /// Input file (or "-" for stdin)
        #[facet(args::positional)]
        file: String,

        /// `key`, `section.key` or `section.subsection.key`
        #[facet(args::positional)]
        path: String,
    },
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    init_logging();
    let raw_args: Vec<String> = std::env::args().skip(1).collect();

    if raw_args.is_empty() {
        print_help();
        std::process::exit(EXIT_LOOKUP_ERROR);
    }

    if raw_args[0] == "--version" || raw_args[0] == "-V" {
        println!("stc-ini {VERSION}");
        std::process::exit(EXIT_SUCCESS);
    }

    if raw_args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        std::process::exit(EXIT_SUCCESS);
    }

    match run(&raw_args) {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(e) => {
            match &e {
                CliError::Syntax {
                    errors,
                    source: Some(source),
                    filename,
                    plain: false,
                } => {
                    if errors.write_report(filename, source, io::stderr()).is_err() {
                        eprintln!("{errors}");
                    }
                }
                CliError::Syntax { errors, .. } => eprintln!("{errors}"),
                _ => eprintln!("error: {e}"),
            }
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_help() {
    eprintln!("stc-ini {VERSION} - check and query stc INI files\n");
    eprintln!("USAGE:");
    eprintln!("    stc-ini <command> [args]\n");
    eprintln!("    Use '-' as the file to read standard input.\n");
    eprintln!("COMMANDS:");
    eprintln!("    check <file> [--plain]          Report every syntax error");
    eprintln!("    dump <file> [--json]            Print the normalized document");
    eprintln!("    get <file> <path>               Print one value\n");
    eprintln!("OPTIONS:");
    eprintln!("    -V, --version                   Show version");
    eprintln!("    -h, --help                      Show this help\n");
    eprintln!("PATHS:");
    eprintln!("    network                         Key before any section header");
    eprintln!("    signer.key                      Key in [signer]");
    eprintln!("    net.test.horizon                Key in [net \"test\"]\n");
    eprintln!("EXIT CODES:");
    eprintln!("    0 ok, 1 syntax errors, 2 missing key or bad usage, 3 I/O error\n");
    eprintln!("ENVIRONMENT:");
    eprintln!("    {LOG_ENV}                     Log filter, e.g. 'debug' (default 'warn')");
}

fn run(args: &[String]) -> Result<(), CliError> {
    let args_strs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let parsed: Args =
        figue::from_slice(&args_strs).map_err(|e| CliError::Usage(e.to_string()))?;

    if parsed.version {
        println!("stc-ini {VERSION}");
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    match parsed.command {
        Some(Command::Check { file, plain }) => run_check(&file, plain),
        Some(Command::Dump { file, json }) => run_dump(&file, json, &mut stdout),
        Some(Command::Get { file, path }) => run_get(&file, &path, &mut stdout),
        None => Err(CliError::Usage("missing command".into())),
    }
}

// ============================================================================
// Error handling
// ============================================================================

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Syntax {
        errors: DiagnosticList,
        /// The input, if it is valid UTF-8 and can back a report.
        source: Option<String>,
        filename: String,
        plain: bool,
    },
    NotFound(String),
    Usage(String),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Io(_) => EXIT_IO_ERROR,
            CliError::Syntax { .. } => EXIT_SYNTAX_ERROR,
            CliError::NotFound(_) => EXIT_LOOKUP_ERROR,
            CliError::Usage(_) => EXIT_LOOKUP_ERROR,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{e}"),
            CliError::Syntax { errors, .. } => write!(f, "{errors}"),
            CliError::NotFound(path) => write!(f, "no value for {path}"),
            CliError::Usage(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Syntax { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

// ============================================================================
// Commands
// ============================================================================

fn run_check(file: &str, plain: bool) -> Result<(), CliError> {
    let doc = load(file, plain)?;
    debug!(
        file,
        globals = doc.globals.len(),
        sections = doc.sections.len(),
        "File is clean"
    );
    Ok(())
}

fn run_dump(file: &str, json: bool, out: &mut impl Write) -> Result<(), CliError> {
    let doc = load(file, false)?;
    if json {
        let output = serde_json::to_string_pretty(&document_to_json(&doc))
            .map_err(|e| CliError::Io(io::Error::other(e)))?;
        writeln!(out, "{output}")?;
    } else {
        write!(out, "{doc}")?;
    }
    Ok(())
}

fn run_get(file: &str, path: &str, out: &mut impl Write) -> Result<(), CliError> {
    let doc = load(file, false)?;
    match doc.get_path(path) {
        Some(value) => {
            writeln!(out, "{value}")?;
            Ok(())
        }
        None => Err(CliError::NotFound(path.to_string())),
    }
}

/// Read and parse `file`, keeping the source around for reports.
///
/// Reports need offsets into the exact parsed bytes, so input that is not
/// UTF-8 keeps no source and falls back to plain diagnostics.
fn load(file: &str, plain: bool) -> Result<Document, CliError> {
    let bytes = read_input(file)?;
    let filename = if file == "-" { "<stdin>" } else { file };
    stc_ini_tree::parse(filename, &bytes).map_err(|errors| CliError::Syntax {
        errors,
        source: String::from_utf8(bytes).ok(),
        filename: filename.to_string(),
        plain,
    })
}

fn read_input(file: &str) -> Result<Vec<u8>, io::Error> {
    match file {
        "-" => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        path => std::fs::read(path),
    }
}

fn document_to_json(doc: &Document) -> serde_json::Value {
    let sections: Vec<_> = doc
        .sections
        .iter()
        .map(|block| {
            serde_json::json!({
                "name": block.header.name,
                "subsection": block.header.subsection,
                "entries": entries_to_json(&block.entries),
            })
        })
        .collect();
    serde_json::json!({
        "globals": entries_to_json(&doc.globals),
        "sections": sections,
    })
}

fn entries_to_json(entries: &[Entry]) -> serde_json::Value {
    entries
        .iter()
        .map(|e| serde_json::json!({ "key": e.key, "value": e.value }))
        .collect()
}
