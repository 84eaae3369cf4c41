use serde::Deserialize;

use crate::error::{Error, Result};
use crate::wrapper::http::{Client, Header, HeaderKey, Response};

use super::pdns::{Auth, PdnsCfg};

impl From<Auth> for Vec<Header> {
    fn from(auth: Auth) -> Self {
        match auth {
            Auth::ApiKey(key) => vec![Header::new(HeaderKey::Custom("X-API-Key".to_string()), key)],
        }
    }
}

pub(super) struct PdnsClient {
    base: String,
    server_id: String,
    cli: Client,
}

impl PdnsClient {
    pub fn new(cfg: PdnsCfg) -> Self {
        let mut cli = Client::new();
        let mut headers: Vec<Header> = cfg.auth.into();
        headers.push(Header::new(
            HeaderKey::ContentType,
            "application/json".to_string(),
        ));
        cli.set_default_headers(headers);

        Self {
            base: cfg.url.trim_end_matches('/').to_string(),
            server_id: cfg.server_id,
            cli,
        }
    }

    pub async fn patch_zone(&self, zone_id: &str, body: String) -> Result<()> {
        let url = format!(
            "{}/api/v1/servers/{}/zones/{}",
            self.base, self.server_id, zone_id
        );
        let resp = self.cli.patch(&url, None, body).await?;
        Self::check(resp)
    }

    fn check(resp: Response) -> Result<()> {
        if (200..300).contains(&resp.status) {
            return Ok(());
        }
        Err(Error::Api(format!(
            "status {}: {}",
            resp.status,
            api_message(&resp.body)
        )))
    }
}

/// The API reports failures as `{"error": "..."}`; anything else is
/// passed through as-is.
fn api_message(body: &str) -> String {
    #[derive(Debug, Deserialize)]
    struct ApiError {
        error: String,
    }

    match serde_json::from_str::<ApiError>(body) {
        Ok(e) => e.error,
        Err(_) => body.trim().to_string(),
    }
}
