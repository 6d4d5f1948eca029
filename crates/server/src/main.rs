use std::fmt;
use std::sync::Arc;

use services::{AppServices, Clock, ContentGenerator, GeminiConfig, GeminiContentProvider};

use server::routes::Server;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    MissingApiKey,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::MissingApiKey => {
                write!(f, "GEMINI_API_KEY not set; content generation requires it")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct Args {
    db_url: String,
    bind: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p server -- [--db <sqlite_url>] [--bind <addr:port>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:cyberbridge.db");
    eprintln!("  --bind 127.0.0.1:5000");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CYBERBRIDGE_DB_URL, CYBERBRIDGE_BIND");
    eprintln!("  GEMINI_API_KEY (required), GEMINI_BASE_URL, GEMINI_MODEL");
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("CYBERBRIDGE_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://cyberbridge.db".into(), normalize_sqlite_url);
        let mut bind =
            std::env::var("CYBERBRIDGE_BIND").unwrap_or_else(|_| "127.0.0.1:5000".into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--bind" => {
                    bind = require_value(&mut args, "--bind")?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, bind })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Absence of the generation credential is a startup failure, not a
    // per-request one.
    let config = GeminiConfig::from_env().ok_or(ArgsError::MissingApiKey)?;
    let generator: Arc<dyn ContentGenerator> = Arc::new(GeminiContentProvider::new(config));

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let services =
        AppServices::new_sqlite(&parsed.db_url, Clock::default_clock(), generator).await?;

    Server::run(services, &parsed.bind).await?;
    Ok(())
}

#[actix_web::main]
async fn main() {
    env_logger::init();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
