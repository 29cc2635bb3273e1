use clap::Parser;
use iptoloc::location::{LocationResolver, ResolverConfig, DEFAULT_ENDPOINT};

/// iptoloc: map an IP address to "City, Country"
///
/// Queries the ip-api.com geolocation service once per run.
///
/// Examples:
///   iptoloc 8.8.8.8
///   iptoloc 2001:4860:4860::8888 --json
///   iptoloc 1.1.1.1 --endpoint http://localhost:8080/json/
#[derive(Parser)]
#[command(name = "iptoloc", version, about, long_about = None)]
struct Cli {
    /// IPv4 or IPv6 address to locate.
    ip: String,

    /// Provider endpoint; the address is appended to it.
    #[arg(long, env = "IPTOLOC_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Print the full provider record as JSON.
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "warn")]
    log_level: log::Level,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = simple_logger::init_with_level(cli.log_level) {
        eprintln!("Warning: logger not installed: {}", e);
    }

    let config = ResolverConfig::default().with_endpoint(&cli.endpoint);
    let resolver = LocationResolver::with_config(config);

    if cli.json {
        match resolver.lookup(&cli.ip) {
            Ok(record) => {
                let json = serde_json::to_string_pretty(&record).unwrap_or_else(|e| fail(e));
                println!("{}", json);
            }
            Err(e) => match e.sentinel() {
                Some(sentinel) => println!("{}", sentinel),
                None => fail(e),
            },
        }
        return;
    }

    match resolver.resolve(&cli.ip) {
        Ok(line) => println!("{}", line),
        Err(e) => fail(e),
    }
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}
