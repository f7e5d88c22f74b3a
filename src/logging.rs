use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use chrono::Utc;
use env_logger::{fmt::Formatter, Builder, Target};
use log::{debug, error, info, Record};

use crate::cli::Cli;

pub const LOG_LEVEL_VAR: &str = "MSAVIEW_LOG_LEVEL";

/// Log directory under the user's home, `./.msaview/logs` if there is none
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".msaview")
        .join("logs")
}

fn format_record(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    writeln!(
        buf,
        "{} [{}] [{}:{}] [{}] {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
        record.level(),
        record.module_path().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        std::thread::current().name().unwrap_or("main"),
        record.args()
    )
}

/// Send all log output to a fresh timestamped file; the terminal belongs to the dashboard.
pub fn init_logging() -> Result<PathBuf, Box<dyn Error>> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;

    let log_file = dir.join(format!("msaview_{}.log", Utc::now().format("%Y%m%d_%H%M%S")));
    Builder::from_default_env()
        .target(Target::Pipe(Box::new(File::create(&log_file)?)))
        .format(format_record)
        .try_init()?;

    info!("Logging to {log_file:?}");
    Ok(log_file)
}

/// Map a level name to an env_logger filter, `None` if unrecognized
pub fn parse_level(level: &str) -> Option<&'static str> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

/// Set `RUST_LOG` from `MSAVIEW_LOG_LEVEL` (default info). Call before `init_logging`.
pub fn set_log_level() {
    let level = match std::env::var(LOG_LEVEL_VAR) {
        Ok(requested) => parse_level(&requested).unwrap_or_else(|| {
            eprintln!("Ignoring {LOG_LEVEL_VAR}={requested:?}, using 'info'");
            "info"
        }),
        Err(_) => "info",
    };
    std::env::set_var("RUST_LOG", format!("msaview={level}"));
}

/// Record the run configuration: input, aligner and the tools it will call
pub fn log_run_config(cli: &Cli) {
    info!("msaview {} on {}/{}", env!("CARGO_PKG_VERSION"), std::env::consts::OS, std::env::consts::ARCH);
    if cli.example {
        info!("Input: bundled example sequences");
    } else {
        info!("Input: {:?}", cli.input);
    }
    if cli.aligned {
        info!("Input is pre-aligned; guide tree: {:?}", cli.tree);
    } else {
        let tools = cli.tool_paths();
        info!("Aligner: {}", cli.algorithm);
        debug!("Tools: clustalw={:?} muscle={:?} fasttree={:?}", tools.clustalw, tools.muscle, tools.fasttree);
    }
    debug!("Export directory: {:?}, strict Newick: {}", cli.output, cli.strict_newick);
    debug!("Available CPU cores: {}", num_cpus::get());
}

pub fn log_shutdown() {
    info!("msaview finished at {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
}

/// Log an error and echo it to stderr, which is visible once the dashboard has closed
pub fn log_critical_error(error: &str, context: Option<&str>) {
    let message = match context {
        Some(ctx) => format!("CRITICAL ERROR [{ctx}]: {error}"),
        None => format!("CRITICAL ERROR: {error}"),
    };
    error!("{message}");
    eprintln!("[{}] {message}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
}
