use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Model Context Protocol server for bedtools
///
/// Exposes bedtools intersect/merge/sort as MCP tools over stdio for
/// LLM clients like Claude Desktop.
#[derive(Parser, Debug)]
#[command(name = "bedtools-mcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the bedtools executable
    #[arg(long)]
    bedtools_path: Option<String>,

    /// Command timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Maximum input file size in bytes
    #[arg(long)]
    max_file_size: Option<u64>,

    /// Directory for per-invocation scratch directories
    #[arg(long)]
    temp_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Log to file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn setup_logging(log_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // stdout carries the MCP transport; logs go to stderr or a file
    let subscriber = fmt().with_env_filter(filter).with_target(true);

    if let Some(log_path) = log_file {
        let file = std::fs::File::create(log_path)?;
        subscriber.with_writer(file).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level, args.log_file)?;

    info!("Starting bedtools-mcp v{}", env!("CARGO_PKG_VERSION"));

    // Config file and environment first, CLI flags on top
    let mut settings = match bedtools_mcp::Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(path) = args.bedtools_path {
        settings.bedtools_path = path;
    }
    if let Some(timeout) = args.timeout {
        settings.timeout = timeout;
    }
    if let Some(max) = args.max_file_size {
        settings.max_file_size = max;
    }
    if let Some(dir) = args.temp_dir {
        settings.temp_dir = Some(dir);
    }

    info!(
        "Configuration: bedtools={}, timeout={}s, max_file_size={} bytes",
        settings.bedtools_path, settings.timeout, settings.max_file_size
    );

    let runner = std::sync::Arc::new(bedtools_mcp::BedtoolsRunner::new(settings));

    let mcp_server = bedtools_mcp::McpServer::new(runner);

    info!("bedtools-mcp ready to accept MCP requests on stdio");

    match mcp_server.run().await {
        Ok(()) => {
            info!("MCP server stopped normally");
        }
        Err(e) => {
            eprintln!("MCP server error: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
