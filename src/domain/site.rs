//! Per-site gateway configuration.
//!
//! Loaded once at startup and shared read-only between requests. Each
//! request derives its own [`SiteSecrets`] from the resolved site's
//! [`SiteConfig`]; nothing here is mutated after construction.

use {
    super::error::PipelineError,
    super::event::EventType,
    super::id::SiteId,
    serde::Deserialize,
    std::{collections::HashMap, collections::HashSet, fmt},
};

fn enabled() -> bool {
    true
}

#[derive(Clone, Deserialize)]
pub struct SiteConfig {
    /// Key the gateway signs webhook bodies with.
    #[serde(default)]
    pub signature_key: String,
    /// Expected value of the `Authorization` header.
    #[serde(default)]
    pub auth_header_key: String,
    #[serde(default = "enabled")]
    pub require_auth_header: bool,
    #[serde(default = "enabled")]
    pub require_signature: bool,
    #[serde(default)]
    pub allowed_event_types: HashSet<EventType>,
}

impl SiteConfig {
    /// An enabled check needs a key to check against.
    fn ensure_keys(&self, site_id: &SiteId) -> Result<(), PipelineError> {
        if self.require_signature && self.signature_key.trim().is_empty() {
            return Err(PipelineError::Config(format!(
                "site {site_id}: require_signature is on but signature_key is blank"
            )));
        }
        if self.require_auth_header && self.auth_header_key.trim().is_empty() {
            return Err(PipelineError::Config(format!(
                "site {site_id}: require_auth_header is on but auth_header_key is blank"
            )));
        }
        Ok(())
    }

    pub fn secrets(&self) -> SiteSecrets {
        SiteSecrets {
            signature_key: self.signature_key.as_bytes().into(),
            auth_header_key: self.auth_header_key.clone(),
            require_auth_header: self.require_auth_header,
            require_signature: self.require_signature,
        }
    }
}

impl fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteConfig")
            .field("require_auth_header", &self.require_auth_header)
            .field("require_signature", &self.require_signature)
            .field("allowed_event_types", &self.allowed_event_types)
            .finish_non_exhaustive()
    }
}

/// Request-scoped credentials for the site an event was routed to.
pub struct SiteSecrets {
    pub signature_key: Box<[u8]>,
    pub auth_header_key: String,
    pub require_auth_header: bool,
    pub require_signature: bool,
}

impl fmt::Debug for SiteSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteSecrets")
            .field("require_auth_header", &self.require_auth_header)
            .field("require_signature", &self.require_signature)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct RegistryFile {
    sites: HashMap<String, SiteConfig>,
}

#[derive(Debug, Default)]
pub struct SiteRegistry {
    sites: HashMap<SiteId, SiteConfig>,
}

impl SiteRegistry {
    pub fn new(sites: impl IntoIterator<Item = (SiteId, SiteConfig)>) -> Self {
        Self {
            sites: sites.into_iter().collect(),
        }
    }

    /// Parse `{"sites": {"<site id>": {...}}}`. Unknown event-type codes,
    /// blank site ids and enabled checks without a key are rejected.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        let file: RegistryFile = serde_json::from_str(json)
            .map_err(|e| PipelineError::Config(format!("invalid site registry: {e}")))?;

        let sites = file
            .sites
            .into_iter()
            .map(|(id, config)| -> Result<_, PipelineError> { Ok((SiteId::new(id)?, config)) })
            .collect::<Result<HashMap<_, _>, _>>()
            .map_err(|e| PipelineError::Config(format!("invalid site registry: {e}")))?;

        for (site_id, config) in &sites {
            config.ensure_keys(site_id)?;
        }

        Ok(Self { sites })
    }

    pub fn get(&self, site_id: &SiteId) -> Result<&SiteConfig, PipelineError> {
        self.sites
            .get(site_id)
            .ok_or_else(|| PipelineError::UnknownSite(site_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
