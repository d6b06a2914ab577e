// # ddns-route53 - one-shot Route53 reconciler
//
// Thin integration layer: load configuration, initialize logging, wire the
// IP source and Route53 provider into the reconciler, run one pass, exit.
// All reconciliation logic lives in ddns-core.
//
// Scheduling is external (cron, systemd timer, Kubernetes CronJob). The
// `CRON_SCHEDULE` value is required so that deployments carry it alongside
// the rest of the settings, but it is never interpreted here.
//
// ## Configuration
//
// Environment variables, optionally loaded from a `.env` file in the working
// directory. Variables already set in the environment win over the file.
//
// ### Required
// - `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`: Route53 credentials
// - `AWS_REGION`: selects the Route53 partition
// - `ROUTE53_DOMAIN_NAME`: record to reconcile
// - `ROUTE53_TYPE`: record type, e.g. `A`
// - `ROUTE53_TTL`: record TTL in seconds
// - `CRON_SCHEDULE`: schedule of the external trigger
//
// ### Optional
// - `AWS_SESSION_TOKEN`: temporary credentials
// - `DDNS_IP_ECHO_URL`: IP echo service (default https://api.ipify.org)
// - `DDNS_LOG_LEVEL`: trace, debug, info, warn, error (default info)
// - `DDNS_MODE`: `dry-run` to skip the upsert
//
// ## Example
//
// ```bash
// export AWS_ACCESS_KEY_ID=AKIA...
// export AWS_SECRET_ACCESS_KEY=...
// export AWS_REGION=us-east-1
// export ROUTE53_DOMAIN_NAME=home.example.com
// export ROUTE53_TYPE=A
// export ROUTE53_TTL=300
// export CRON_SCHEDULE="*/5 * * * *"
//
// ddns-route53
// ```
//
// Two overlapping runs against the same record are not coordinated; the
// scheduler must not start a run while the previous one is still going.

use anyhow::{Context, Result};
use ddns_core::{DdnsConfig, ReconcileOutcome, Reconciler};
use ddns_ip_http::HttpIpSource;
use ddns_provider_route53::Route53Provider;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the scheduler
///
/// - 0: Pass completed (updated, unchanged or dry-run)
/// - 1: Configuration error, no network call was made
/// - 2: Runtime error
#[derive(Debug, Clone, Copy)]
enum DdnsExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    // Config failures need formatted log lines too, before the level is known
    let config = tracing::subscriber::with_default(build_subscriber(Level::INFO), || {
        // A missing .env file is fine; a malformed one is not
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            error!("Configuration error: failed to load .env file: {}", e);
            return None;
        }

        load_config(DdnsConfig::from_env)
    });

    let Some(config) = config else {
        return DdnsExitCode::ConfigError.into();
    };

    let log_level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);

    if let Err(e) = tracing::subscriber::set_global_default(build_subscriber(log_level)) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    info!(
        "Reconciling {} ({}) in {}{}",
        config.domain_name,
        config.record_type,
        config.region,
        if config.is_dry_run() { " [dry-run]" } else { "" }
    );

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run(config).await {
            Ok(outcome) => {
                report(&outcome);
                DdnsExitCode::Success
            }
            Err(e) => {
                error!("Reconciliation failed: {:#}", e);
                exit_code_for(&e)
            }
        }
    })
    .into()
}

fn build_subscriber(level: Level) -> FmtSubscriber {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish()
}

/// Load the configuration, logging the failure if there is one
fn load_config(load: impl FnOnce() -> ddns_core::Result<DdnsConfig>) -> Option<DdnsConfig> {
    match load() {
        Ok(config) => Some(config),
        Err(e) => {
            error!("{}", e);
            None
        }
    }
}

/// Build the components and run one pass
async fn run(config: DdnsConfig) -> Result<ReconcileOutcome> {
    let ip_source = HttpIpSource::new(config.ip_echo_url.clone());
    let provider = Route53Provider::new(config.credentials.clone(), &config.region)
        .context("Failed to create Route53 provider")?;

    let reconciler = Reconciler::new(Box::new(ip_source), Box::new(provider), config)?;

    Ok(reconciler.run().await?)
}

fn report(outcome: &ReconcileOutcome) {
    match outcome {
        ReconcileOutcome::Updated { record, change, .. } => info!(
            "Updated {} -> {} (change {}, {:?})",
            record.name,
            record.values.join(","),
            change.id,
            change.status
        ),
        ReconcileOutcome::Unchanged { current } => info!("Record up to date at {}", current),
        ReconcileOutcome::DryRun { record, .. } => info!(
            "Dry run complete, {} left untouched",
            record.name
        ),
    }
}

fn exit_code_for(err: &anyhow::Error) -> DdnsExitCode {
    match err.downcast_ref::<ddns_core::Error>() {
        Some(e) if e.is_config() => DdnsExitCode::ConfigError,
        _ => DdnsExitCode::RuntimeError,
    }
}
