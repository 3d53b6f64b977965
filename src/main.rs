//! Rostersync CLI - fetch, parse, and serve mentorship rosters
//!
//! # Main Commands
//!
//! ```bash
//! rostersync serve                  # Start HTTP server (port 3000)
//! rostersync fetch                  # Fetch the roster once and print JSON
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! rostersync parse export.csv       # Parse a local export to JSON
//! rostersync validate forms.json    # Validate signup forms
//! ```

use clap::{Parser, Subcommand};
use rostersync::{
    parse_roster_file, refresh_roster, validate_signup_with_domain, Config, RosterSource,
    SignupForm,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rostersync")]
#[command(about = "Live mentorship roster from published spreadsheet exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a local roster export and output JSON records
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch the roster once from the configured or given sources
    Fetch {
        /// Source URL, in fallback order (default: ROSTER_URLS from env)
        #[arg(long)]
        url: Vec<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate signup forms from a JSON file (one object or an array)
    Validate {
        /// Input JSON file
        input: PathBuf,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on (default: PORT from env, else 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),

        Commands::Fetch { url, output } => cmd_fetch(&url, output.as_deref()).await,

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Serve { port } => cmd_serve(port).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing roster export: {}", input.display());

    let parsed = parse_roster_file(input)?;

    eprintln!("   Encoding: {}", parsed.encoding);
    eprintln!("   Columns: {}", parsed.table.headers.join(", "));
    eprintln!("✅ Parsed {} rows", parsed.table.row_count());

    let json = serde_json::to_string_pretty(&parsed.table.records())?;
    write_output(&json, output)
}

async fn cmd_fetch(urls: &[String], output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let sources: Vec<RosterSource> = if urls.is_empty() {
        Config::from_env()?.sources
    } else {
        urls.iter().map(RosterSource::from_url).collect()
    };

    eprintln!("🌐 Fetching roster ({} source(s))...", sources.len());

    let client = reqwest::Client::new();
    let snapshot = refresh_roster(&client, &sources).await?;

    eprintln!(
        "✅ Fetched {} rows from '{}' (encoding: {})",
        snapshot.row_count(),
        snapshot.source,
        snapshot.encoding
    );

    let json = serde_json::to_string_pretty(&snapshot.records())?;
    write_output(&json, output)
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Validating: {}", input.display());

    let content = fs::read_to_string(input)?;
    let forms: Vec<SignupForm> = match serde_json::from_str::<Vec<SignupForm>>(&content) {
        Ok(forms) => forms,
        Err(_) => vec![serde_json::from_str::<SignupForm>(&content)?],
    };

    let domain = Config::from_env()?.email_domain;

    let mut valid = 0;
    let mut invalid = 0;

    for (i, form) in forms.iter().enumerate() {
        let errors = validate_signup_with_domain(form, &domain);
        if errors.is_empty() {
            valid += 1;
        } else {
            invalid += 1;
            eprintln!("\n❌ Form {} invalid:", i);
            for (field, message) in errors.entries() {
                eprintln!("   - {}: {}", field, message);
            }
        }
    }

    eprintln!("\n📊 Results: {} valid, {} invalid", valid, invalid);

    if invalid > 0 {
        std::process::exit(1);
    }

    Ok(())
}

async fn cmd_serve(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::from_env()?;
    if let Some(port) = port {
        config.port = port;
    }
    rostersync::server::start_server(config).await?;
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
