use anyhow::Result;
use clap::Parser;
use shortlink::config::Config;
use shortlink::server;
use tracing_subscriber::EnvFilter;

/// URL shortener service.
///
/// Settings come from the environment (and `.env`); flags override them.
#[derive(Parser, Debug)]
#[command(name = "shortlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PostgreSQL connection string (overrides DATABASE_URL)
    #[arg(long)]
    dsn: Option<String>,

    /// Host to bind to (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Prefix of returned short URLs (overrides BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Log output format: text or json (overrides LOG_FORMAT)
    #[arg(long)]
    log_format: Option<String>,

    /// Requests per second per client IP (overrides RATE_LIMIT_PER_SECOND)
    #[arg(long)]
    rate_limit: Option<u32>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(log_format) = self.log_format {
            config.log_format = log_format;
        }
        if let Some(rate) = self.rate_limit {
            config.rate_limit_per_second = Some(rate);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let mut cli = Cli::parse();

    let mut config = Config::from_env_with_dsn(cli.dsn.take())?;
    cli.apply(&mut config);
    config.validate()?;

    init_tracing(&config);
    config.print_summary();

    server::run(config).await
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
