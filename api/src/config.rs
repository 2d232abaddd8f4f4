use std::env;

#[derive(Clone)]
pub struct Config {
    /// Base URL of the remote amount-normalization service.
    /// Absent means the remote path is disabled and every normalization
    /// runs the local grammar directly.
    pub normalizer_url: Option<String>,
    /// Path to a JSON policy-table override file. Absent means the
    /// built-in tables are used.
    pub policy_tables_path: Option<String>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            normalizer_url: env::var("AMOUNT_NORMALIZER_URL").ok(),
            policy_tables_path: env::var("POLICY_TABLES_PATH").ok(),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Check if remote amount normalization is configured
    pub fn remote_normalizer_enabled(&self) -> bool {
        self.normalizer_url.is_some()
    }
}
