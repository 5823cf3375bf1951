use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fakeroll_datagen::{write_csv, GenerationRequest, RawRequest, RecordGenerator};
use fakeroll_server::ServerConfig;
use std::io::Write;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fakeroll")]
#[command(about = "Reproducible fake personal records with injected typos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the generation API over HTTP
    Serve(ServeArgs),
    /// Print generated records to stdout
    Generate(GenerateArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Config file (defaults to ./fakeroll.yml when present)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides the config file
    #[arg(long, env = "FAKEROLL_LISTEN")]
    listen: Option<SocketAddr>,

    /// Port to listen on, overrides the port of the listen address
    #[arg(long, env = "PORT")]
    port: Option<u16>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Parser)]
struct GenerateArgs {
    /// Mexico, United_States or Great_Britain
    #[arg(long, default_value = "United_States")]
    region: String,

    /// Seed string
    #[arg(long, default_value = "default-seed")]
    seed: String,

    /// Expected typos per record, may be fractional
    #[arg(long, default_value = "0")]
    errors: String,

    /// First page to print
    #[arg(long, default_value = "1")]
    page: String,

    /// Number of consecutive pages to print, at most 100
    #[arg(long, default_value = "1", value_parser = parse_page_count)]
    pages: NonZeroU32,

    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Config file for limits and locale overrides
    #[arg(long, short)]
    config: Option<PathBuf>,
}

fn parse_page_count(value: &str) -> Result<NonZeroU32, String> {
    fakeroll_server::http::parse_pages(Some(value)).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Generate(args) => generate(args),
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let mut config = ServerConfig::discover(args.config.as_deref())
        .context("Failed to load fakeroll configuration")?;

    if let Some(listen) = args.listen {
        config.listen_addr = listen;
    }
    if let Some(port) = args.port {
        config.listen_addr.set_port(port);
    }

    fakeroll_server::serve(config).await
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = ServerConfig::discover(args.config.as_deref())
        .context("Failed to load fakeroll configuration")?;
    let generator = RecordGenerator::new(config.locale_catalog()?);

    let raw = RawRequest {
        region: Some(args.region),
        errors_per_record: Some(args.errors),
        seed: Some(args.seed),
        page_number: Some(args.page),
    };
    let first = GenerationRequest::parse(&raw, &config.request_limits())?;

    let mut records = Vec::new();
    for offset in 0..args.pages.get() {
        let page = first
            .page_number
            .checked_add(offset)
            .context("Page number out of range")?;
        records.extend(generator.page(&first.with_page(page)));
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &records)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(&records, &mut out)?,
    }
    out.flush()?;
    Ok(())
}
