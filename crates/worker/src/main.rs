use anyhow::Context;
use autotrade_core::api::ApiClient;
use autotrade_core::auth;
use autotrade_core::pipeline::{self, RunOptions};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod prompt;

#[derive(Debug, Parser)]
#[command(name = "autotrade", about = "Preview and place pending rebalancing trades")]
struct Args {
    /// Preview trade impact only; never place orders.
    #[arg(long)]
    dry_run: bool,

    /// API base URL. Overrides AUTOTRADE_API_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// HTTP timeout per request, in seconds. Overrides AUTOTRADE_HTTP_TIMEOUT_SECS.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = autotrade_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    if let Some(base_url) = args.base_url {
        settings.api_url = base_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.http_timeout_secs = timeout_secs;
    }

    let credentials = {
        let settings = settings.clone();
        tokio::task::spawn_blocking(move || prompt::resolve_credentials(&settings))
            .await
            .context("credential prompt panicked")??
    };

    let client = ApiClient::from_settings(&settings)?;

    tracing::info!(api_url = %settings.api_url, "Signing in...");
    let session = match auth::authenticate(client, credentials).await {
        Ok(session) => session,
        Err(err) => {
            let err = anyhow::Error::new(err);
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "sign-in failed");
            return Err(err);
        }
    };
    tracing::info!("Success!");

    let opts = RunOptions {
        dry_run: args.dry_run,
    };
    let report = pipeline::run(&session, &opts)
        .await
        .context("failed to fetch portfolio groups")?;
    report.log_summary();

    Ok(())
}

fn init_sentry(settings: &autotrade_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
