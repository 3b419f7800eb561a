use iplocate_rs::{Config, ErrorKind, IpLocate};
use std::time::Duration;

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::FmtSubscriber;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

#[tokio::main]
async fn main() {
    #[cfg(feature = "tracing")]
    init_tracing();

    let api_key = std::env::var("IPLOCATE_API_KEY").unwrap_or_default();

    let iplocate = match IpLocate::new(
        &api_key,
        Some(Config {
            timeout: Duration::from_secs(10),
            ..Default::default()
        }),
    ) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{e}. Set IPLOCATE_API_KEY, get one at https://iplocate.io/signup");
            std::process::exit(1);
        }
    };

    for ip in ["8.8.8.8", "1.1.1.1", "2001:4860:4860::8888", "not-an-ip"] {
        println!("Looking up {ip}...");
        match iplocate.lookup(ip).await {
            Ok(result) => {
                println!(
                    "  Country: {} ({})",
                    result.country.as_deref().unwrap_or("?"),
                    result.country_code.as_deref().unwrap_or("?")
                );
                println!("  City: {}", result.city.as_deref().unwrap_or("Unknown"));
                if let Some(asn) = &result.asn {
                    println!("  ASN: {} - {} ({})", asn.asn, asn.name, asn.kind.as_str());
                }
                println!(
                    "  VPN: {} Proxy: {} Tor: {}",
                    result.privacy.is_vpn, result.privacy.is_proxy, result.privacy.is_tor
                );
            }
            Err(e) => match e.kind() {
                ErrorKind::InvalidIp => eprintln!("  Invalid IP format: {ip}"),
                ErrorKind::Api => eprintln!("  API error ({:?}): {e}", e.status_code()),
                _ => eprintln!("  {:?}: {e}", e.kind()),
            },
        }
    }

    match iplocate.lookup_self().await {
        Ok(me) => println!("Your IP: {} ({})", me.ip, me.country.as_deref().unwrap_or("?")),
        Err(e) => eprintln!("Self lookup failed: {e}"),
    }
}
