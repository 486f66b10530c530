pub mod api;
pub mod auth;
pub mod domain;
pub mod pipeline;
pub mod report;
pub mod session;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_API_URL: &str = "https://api.passiv.com/api/v1/";
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub email: Option<String>,
        pub password: Option<String>,
        pub api_url: String,
        pub http_timeout_secs: u64,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let http_timeout_secs = match std::env::var("AUTOTRADE_HTTP_TIMEOUT_SECS") {
                Ok(s) => s
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("AUTOTRADE_HTTP_TIMEOUT_SECS is not a number: {s}"))?,
                Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
            };

            Ok(Self {
                email: non_empty_var("EMAIL"),
                password: non_empty_var("PASSWORD"),
                api_url: non_empty_var("AUTOTRADE_API_URL")
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                http_timeout_secs,
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn require_email(&self) -> anyhow::Result<&str> {
            self.email.as_deref().context("EMAIL is required")
        }

        pub fn require_password(&self) -> anyhow::Result<&str> {
            self.password.as_deref().context("PASSWORD is required")
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }
}
