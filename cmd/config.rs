use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use zone_syncer::error::Error;
use zone_syncer::error::Result;
use zone_syncer::provider::Auth;
use zone_syncer::provider::PdnsCfg;
use zone_syncer::record::RecordTypeFilter;
use zone_syncer::sync::DEFAULT_MAX_BATCH_SIZE;
use zone_syncer::sync::SyncJob;

////////////////////////////////////////////////////////////
// Parameters
////////////////////////////////////////////////////////////
#[derive(Debug, Clone, Deserialize)]
pub struct CfgParam {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CfgParamList(Vec<CfgParam>);

impl CfgParamList {
    pub fn iter(&self) -> impl Iterator<Item = &CfgParam> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

////////////////////////////////////////////////////////////
// Provider
////////////////////////////////////////////////////////////
#[derive(Debug, Clone, Deserialize)]
pub struct CfgAuthentication {
    pub method: String,
    pub params: CfgParamList,
}

impl CfgAuthentication {
    pub fn get_value_ref(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name == key)
            .map(|p| p.value.as_str())
    }
}

impl TryFrom<CfgAuthentication> for Auth {
    type Error = Error;

    fn try_from(cfg: CfgAuthentication) -> Result<Self> {
        if cfg.method == "api_key" {
            let api_key = cfg.get_value_ref("api_key").ok_or(Error::ParseError(
                "authentication method is declared as api_key, but api_key is not found"
                    .to_string(),
            ))?;
            Ok(Auth::ApiKey(api_key.to_string()))
        } else {
            Err(Error::ParseError(format!(
                "{}: unsupported authentication method",
                cfg.method
            )))
        }
    }
}

fn default_server_id() -> String {
    "localhost".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CfgProvider {
    pub url: String,

    #[serde(default = "default_server_id")]
    pub server_id: String,

    pub authentication: CfgAuthentication,
}

impl TryFrom<CfgProvider> for PdnsCfg {
    type Error = Error;

    fn try_from(cfg: CfgProvider) -> Result<Self> {
        Ok(PdnsCfg {
            url: cfg.url,
            server_id: cfg.server_id,
            auth: cfg.authentication.try_into()?,
        })
    }
}

////////////////////////////////////////////////////////////
// Zones
////////////////////////////////////////////////////////////
#[derive(Debug, Clone, Deserialize)]
pub struct CfgZone {
    pub domain: String,
    pub dnsserver: String,
    pub record_types: Vec<String>,
    pub hosted_zone: String,
}

impl CfgZone {
    pub fn into_sync_job(self) -> Result<SyncJob> {
        if self.domain.is_empty() {
            return Err(Error::ParseError("domain must not be empty".to_string()));
        }
        if self.record_types.is_empty() {
            return Err(Error::ParseError(format!(
                "zone {}: record_types must not be empty",
                self.domain
            )));
        }

        let record_types = RecordTypeFilter::parse(&self.record_types)?;
        Ok(SyncJob {
            domain: self.domain,
            dnsserver: self.dnsserver,
            record_types,
            hosted_zone: self.hosted_zone,
        })
    }
}

////////////////////////////////////////////////////////////
// Yaml parser
////////////////////////////////////////////////////////////
fn default_max_batch_size() -> usize {
    DEFAULT_MAX_BATCH_SIZE
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cfg {
    pub provider: CfgProvider,

    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    pub zones: Vec<CfgZone>,
}

pub struct Parser;

impl Parser {
    pub fn parse_yaml<P: AsRef<Path>>(path: P) -> Result<Cfg> {
        let reader = Self::file_reader(path)?;
        let config: Cfg = serde_yaml::from_reader(reader)?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(cfg: &Cfg) -> Result<()> {
        if cfg.max_batch_size == 0 {
            return Err(Error::ParseError(
                "max_batch_size must be at least 1".to_string(),
            ));
        }
        if cfg.zones.is_empty() {
            return Err(Error::ParseError("no zones configured".to_string()));
        }
        Ok(())
    }

    fn file_reader<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
        let f = std::fs::File::open(path)?;
        Ok(BufReader::new(f))
    }
}

////////////////////////////////////////////////////////////
// Unit test
////////////////////////////////////////////////////////////
#[cfg(test)]
#[path = "config_test.rs"]
mod test;
