use anyhow::anyhow;
use clap::Parser;
use ferrous_lookup_application::use_cases::{DnsQuerying, DnsService};
use ferrous_lookup_domain::{CliOverrides, Config, Message, QueryRequest};
use ferrous_lookup_infrastructure::UdpTransportFactory;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tracing::{debug, info};

mod bootstrap;
mod output;

#[derive(Parser)]
#[command(name = "ferrous-lookup")]
#[command(version)]
#[command(about = "Ferrous Lookup - one-shot DNS queries over UDP")]
struct Cli {
    /// Domain name to query
    domain: String,

    /// Record type (A, AAAA, TXT, MX, CNAME, NS, PTR, TYPEnn, ...)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    record_type: Option<String>,

    /// Name server host or IP address
    #[arg(short = 's', long, value_name = "HOST")]
    server: Option<String>,

    /// Name server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Transaction ID, decimal or 0x-prefixed hex
    #[arg(long, value_name = "ID", value_parser = parse_transaction_id)]
    id: Option<u16>,

    /// Query timeout in milliseconds (0 waits forever)
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the response as JSON
    #[arg(long)]
    json: bool,
}

fn parse_transaction_id(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| format!("invalid transaction ID '{}': {}", s, e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        host: cli.server.clone(),
        port: cli.port,
        record_type: cli.record_type.clone(),
        timeout_ms: cli.timeout,
        transaction_id: cli.id,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    debug!("Starting Ferrous Lookup v{}", env!("CARGO_PKG_VERSION"));

    let request = build_request(&cli.domain, &config)?;
    let service = DnsService::new(Arc::new(UdpTransportFactory::new(Handle::current())));

    info!(
        server = %request.endpoint,
        domain = %request.domain,
        record_type = %request.record_type,
        "Querying"
    );

    let started = Instant::now();
    let message = run_query(&service, request.clone(), config.resolver.timeout_ms).await?;
    let elapsed = started.elapsed();

    if cli.json {
        println!("{}", output::render_json(&request, &message, elapsed)?);
    } else {
        print!("{}", output::render_text(&request, &message, elapsed));
    }

    message.ensure_success()?;
    Ok(())
}

fn build_request(domain: &str, config: &Config) -> anyhow::Result<QueryRequest> {
    let record_type = config.record_type()?;
    Ok(QueryRequest::parse(domain)?
        .with_endpoint(config.resolver.endpoint())
        .with_record_type(record_type)
        .with_transaction_id(config.resolver.transaction_id))
}

async fn run_query(
    service: &DnsService,
    request: QueryRequest,
    timeout_ms: u64,
) -> anyhow::Result<Message> {
    let server = request.endpoint.clone();
    let context = Handle::current();
    let lookup = service.lookup(request, &context);

    if timeout_ms == 0 {
        return Ok(lookup.await?);
    }

    // Dropping the lookup on timeout cancels the query.
    let message = tokio::time::timeout(Duration::from_millis(timeout_ms), lookup)
        .await
        .map_err(|_| anyhow!("No response from {} within {} ms", server, timeout_ms))??;
    Ok(message)
}
