use async_trait::async_trait;
use log::debug;

use crate::changeset::ChangeDescriptor;
use crate::error::Result;
use crate::provider::Provider;

use super::restful_cli::PdnsClient;
use super::serializer;

#[derive(Debug, Clone, PartialEq)]
pub enum Auth {
    ApiKey(String),
}

/// Connection settings for a PowerDNS-style authoritative API.
#[derive(Debug, Clone)]
pub struct PdnsCfg {
    pub url: String,
    pub server_id: String,
    pub auth: Auth,
}

pub struct Pdns {
    cli: PdnsClient,
}

impl Pdns {
    pub fn from_cfg(cfg: PdnsCfg) -> Result<Self> {
        Ok(Self {
            cli: PdnsClient::new(cfg),
        })
    }
}

#[async_trait]
impl Provider for Pdns {
    async fn submit(&self, hosted_zone: &str, changes: &[ChangeDescriptor]) -> Result<()> {
        let body = serializer::patch_body(changes)?;
        debug!(
            "submitting {} rrset change(s) to zone {}",
            changes.len(),
            hosted_zone
        );
        self.cli.patch_zone(hosted_zone, body).await
    }
}
