use {
    crate::domain::{error::PipelineError, site::SiteRegistry},
    std::{env, net::SocketAddr, time::Duration},
};

pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub sites: SiteRegistry,
}

impl Config {
    /// Read settings from the environment (after `.env` has been loaded) and
    /// the site registry file named by `SITES_CONFIG`.
    pub fn from_env() -> Result<Self, PipelineError> {
        let database_url = required("DATABASE_URL")?;
        let sites_path = required("SITES_CONFIG")?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| PipelineError::Config(format!("BIND_ADDR: {e}")))?;

        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(v) => v
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| PipelineError::Config(format!("REQUEST_TIMEOUT_SECS: {e}")))?,
            Err(_) => Duration::from_secs(10),
        };

        let json = std::fs::read_to_string(&sites_path)
            .map_err(|e| PipelineError::Config(format!("reading {sites_path}: {e}")))?;
        let sites = SiteRegistry::from_json(&json)?;

        Ok(Self {
            database_url,
            bind_addr,
            request_timeout,
            sites,
        })
    }
}

fn required(name: &str) -> Result<String, PipelineError> {
    env::var(name).map_err(|_| PipelineError::Config(format!("{name} must be set")))
}
