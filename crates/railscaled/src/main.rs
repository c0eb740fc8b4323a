//! railscaled — the railscale daemon.
//!
//! Single binary that wires the pieces together: resolve and validate
//! the scaling policy from flags/environment, build the Railway
//! client, run one control loop until ctrl-c.
//!
//! # Usage
//!
//! ```text
//! RAILWAY_TOKEN=... SERVICE_ID=... railscaled
//! railscaled --cpu-high 80 --cpu-low 20 --max-replicas 10
//! ```

use clap::Parser;
use tokio::sync::watch;
use tracing::info;

use railscale_core::{ScalePolicy, parse_duration};
use railscale_railway::RailwayClient;
use railscale_scaler::ControlLoop;

#[derive(Parser)]
#[command(name = "railscaled", about = "CPU autoscaler for a Railway service")]
struct Cli {
    /// Railway project access token.
    #[arg(long, env = "RAILWAY_TOKEN", hide_env_values = true)]
    token: String,

    /// Railway service to watch and scale.
    #[arg(long, env = "SERVICE_ID")]
    service_id: String,

    /// Scale up when average CPU exceeds this percentage.
    #[arg(long, env = "CPU_HIGH", default_value_t = 75.0)]
    cpu_high: f64,

    /// Scale down when average CPU falls below this percentage.
    #[arg(long, env = "CPU_LOW", default_value_t = 30.0)]
    cpu_low: f64,

    /// Fewest replicas the service may shrink to.
    #[arg(long, env = "MIN_REPLICAS", default_value_t = 1)]
    min_replicas: u32,

    /// Most replicas the service may grow to.
    #[arg(long, env = "MAX_REPLICAS", default_value_t = 5)]
    max_replicas: u32,

    /// Minimum time between scaling actions, e.g. "2m" or "120s".
    #[arg(long, env = "COOLDOWN", default_value = "2m")]
    cooldown: String,

    /// Time between sampling cycles.
    #[arg(long, env = "POLL_INTERVAL", default_value = "30s")]
    poll_interval: String,

    /// Railway GraphQL endpoint override.
    #[arg(long, env = "RAILWAY_API_URL", default_value = railscale_railway::DEFAULT_ENDPOINT)]
    api_url: String,

    /// Network budget for each remote call.
    #[arg(long, env = "HTTP_TIMEOUT", default_value = "10s")]
    http_timeout: String,
}

impl Cli {
    /// Resolve the scaling policy, failing on any invalid value.
    ///
    /// This runs before the loop starts; the loop never executes with
    /// an invalid policy.
    fn policy(&self) -> anyhow::Result<ScalePolicy> {
        let policy = ScalePolicy {
            high_threshold: self.cpu_high,
            low_threshold: self.cpu_low,
            min_replicas: self.min_replicas,
            max_replicas: self.max_replicas,
            cooldown: parse_duration(&self.cooldown)?,
            poll_interval: parse_duration(&self.poll_interval)?,
        };
        policy.validate()?;
        Ok(policy)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,railscaled=debug,railscale=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let policy = cli.policy()?;

    info!(
        service = %cli.service_id,
        high = policy.high_threshold,
        low = policy.low_threshold,
        min = policy.min_replicas,
        max = policy.max_replicas,
        "railscaled starting"
    );

    let client = RailwayClient::new(
        cli.api_url,
        cli.token,
        cli.service_id,
        parse_duration(&cli.http_timeout)?,
    )?;
    let control = ControlLoop::new(client, policy);

    // ── Shutdown signal ────────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let loop_handle = tokio::spawn(control.run(shutdown_rx));

    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C handler");
    info!("shutdown signal received");
    let _ = shutdown_tx.send(true);

    let _ = loop_handle.await;

    info!("railscaled stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let base = ["railscaled", "--token", "t", "--service-id", "svc-1"];
        Cli::parse_from(base.iter().copied().chain(args.iter().copied()))
    }

    #[test]
    fn defaults_form_the_documented_policy() {
        let policy = parse(&[]).policy().unwrap();
        assert_eq!(policy, ScalePolicy::default());
    }

    #[test]
    fn flags_override_defaults() {
        let policy = parse(&[
            "--cpu-high",
            "80",
            "--cpu-low",
            "20",
            "--max-replicas",
            "10",
            "--cooldown",
            "5m",
        ])
        .policy()
        .unwrap();

        assert_eq!(policy.high_threshold, 80.0);
        assert_eq!(policy.low_threshold, 20.0);
        assert_eq!(policy.max_replicas, 10);
        assert_eq!(policy.cooldown, std::time::Duration::from_secs(300));
    }

    #[test]
    fn inverted_thresholds_are_fatal() {
        let cli = parse(&["--cpu-high", "20", "--cpu-low", "50"]);
        assert!(cli.policy().is_err());
    }

    #[test]
    fn malformed_durations_are_fatal() {
        let cli = parse(&["--cooldown", "soon"]);
        assert!(cli.policy().is_err());
    }
}
