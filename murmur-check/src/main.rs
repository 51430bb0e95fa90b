//! murmur-check - Validate a post draft against the composer rules

use std::collections::BTreeMap;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use libmurmur::logging;
use libmurmur::validation::forms::composer;
use libmurmur::{AppStores, Config, MurmurError, Result};
use serde::Serialize;

/// Exit status when the draft fails validation
const EXIT_INVALID: i32 = 3;

#[derive(Parser, Debug)]
#[command(name = "murmur-check")]
#[command(version, about = "Validate a post draft against the composer rules")]
#[command(long_about = r#"Validate a post draft against the composer rules.

The title is always an argument. The body is the second argument, or is
read from stdin when omitted and stdin is not a terminal.

EXAMPLES:
    # Check a title only
    murmur-check "Hello"

    # Title and body
    murmur-check "Release notes" "Everything that changed this week"

    # Body from a file
    murmur-check "Release notes" < notes.txt

    # Localized messages, JSON output
    murmur-check --language de --format json "ab" | jq '.errors'

OUTPUT FORMATS:
    text  - "field: message" per failing field, or "valid" (default)
    json  - {"valid": bool, "language": "..", "errors": {field: message}}

EXIT CODES:
    0 - Draft is valid
    1 - Configuration error
    3 - Draft is invalid
"#)]
struct Cli {
    /// Post title
    title: String,

    /// Post body (reads from stdin if not provided)
    body: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    #[arg(value_parser = ["text", "json"])]
    format: String,

    /// Config file (defaults to $MURMUR_CONFIG, then ~/.config/murmur/config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Language for messages (overrides locale.language)
    #[arg(short, long, value_name = "LANG")]
    language: Option<String>,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Outcome of one check, as printed in JSON mode
#[derive(Debug, Serialize)]
struct Report {
    valid: bool,
    language: String,
    errors: BTreeMap<String, String>,
}

fn main() {
    let cli = Cli::parse();

    let mut log_config = logging::config_from_env();
    log_config.verbose = cli.verbose;
    log_config.init();

    tracing::debug!("murmur-check started with args: {:?}", cli);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_INVALID),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Returns whether the draft is valid.
fn run(cli: Cli) -> Result<bool> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if let Some(language) = cli.language {
        config.locale.language = language;
    }

    let body = match cli.body {
        Some(body) => body,
        None => read_body()?,
    };

    let stores = AppStores::from_config(&config)?;
    let draft = stores.post().composer();
    draft.set_value(composer::TITLE, cli.title)?;
    draft.set_value(composer::BODY, body)?;

    let valid = stores.post().validate_for_submit();
    let report = Report {
        valid,
        language: stores.localizer().current_language(),
        errors: draft.errors(),
    };
    print_report(&report, &cli.format)?;

    Ok(valid)
}

fn read_body() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }

    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .map_err(|e| MurmurError::InvalidInput(format!("Failed to read stdin: {}", e)))?;

    // A trailing newline from `echo` or an editor is not part of the body.
    Ok(buffer.trim_end_matches(['\n', '\r']).to_string())
}

fn print_report(report: &Report, format: &str) -> Result<()> {
    match format {
        "json" => {
            let json = serde_json::to_string_pretty(report)
                .map_err(|e| MurmurError::InvalidInput(format!("Failed to encode report: {}", e)))?;
            println!("{}", json);
        }
        _ => {
            if report.valid {
                println!("valid");
            }
            for (field, message) in &report.errors {
                println!("{}: {}", field, message);
            }
        }
    }
    Ok(())
}
