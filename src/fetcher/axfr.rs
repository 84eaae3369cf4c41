use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use async_trait::async_trait;
use hickory_client::client::{Client, SyncClient};
use hickory_client::rr::{DNSClass, Name, Record, RecordType};
use hickory_client::tcp::TcpClientConnection;
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::record::{APEX, RecordKind, ZoneSnapshot};

use super::ZoneFetcher;

// SPF has no variant of its own in hickory's RecordType.
const TYPE_SPF: u16 = 99;

/// Fetcher backed by a full zone transfer (AXFR) over TCP.
///
/// The hickory sync client drives the transfer, so the query runs on the
/// blocking thread pool and the async caller just awaits it.
#[derive(Debug, Clone, Default)]
pub struct AxfrFetcher;

#[async_trait]
impl ZoneFetcher for AxfrFetcher {
    async fn fetch(&self, server: &str, domain: &str) -> Result<ZoneSnapshot> {
        let addr = resolve_server(server)?;
        let server = server.to_string();
        let domain = domain.to_string();
        tokio::task::spawn_blocking(move || transfer(addr, &server, &domain))
            .await
            .map_err(|e| Error::Transfer(format!("transfer task aborted: {}", e)))?
    }
}

/// Accepts `ip`, `ip:port`, `host` or `host:port`; port defaults to 53.
fn resolve_server(server: &str) -> Result<SocketAddr> {
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = server.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, 53));
    }
    let target = if server.contains(':') {
        server.to_string()
    } else {
        format!("{}:53", server)
    };
    target
        .to_socket_addrs()
        .map_err(|e| Error::Transfer(format!("{}: {}", server, e)))?
        .next()
        .ok_or_else(|| Error::Transfer(format!("{}: no usable address", server)))
}

fn transfer(addr: SocketAddr, server: &str, domain: &str) -> Result<ZoneSnapshot> {
    let origin = Name::from_str(domain)
        .map_err(|e| Error::Transfer(format!("{}: bad zone name: {}", domain, e)))?;
    let conn = TcpClientConnection::new(addr)
        .map_err(|e| Error::Transfer(format!("{} {}: {}", server, domain, e)))?;
    let client = SyncClient::new(conn);

    debug!("AXFR {} from {}", domain, server);
    let response = client
        .query(&origin, DNSClass::IN, RecordType::AXFR)
        .map_err(|e| Error::Transfer(format!("{} {}: {}", server, domain, e)))?;

    let snapshot = snapshot_from_answers(&origin, response.answers());
    if snapshot.is_empty() {
        return Err(Error::EmptyZone(domain.to_string()));
    }
    debug!(
        "AXFR {} returned {} owner name(s)",
        domain,
        snapshot.owner_count()
    );
    Ok(snapshot)
}

fn snapshot_from_answers(origin: &Name, answers: &[Record]) -> ZoneSnapshot {
    let mut snapshot = ZoneSnapshot::default();
    for record in answers {
        let Some(owner) = relativize(record.name(), origin) else {
            warn!("skipping out-of-zone owner {}", record.name());
            continue;
        };
        snapshot.touch(&owner);
        let Some(kind) = kind_of(record.record_type()) else {
            continue;
        };
        let Some(data) = record.data() else {
            continue;
        };
        snapshot.push(&owner, kind, record.ttl(), data.to_string());
    }
    snapshot
}

/// Strip the zone origin from an absolute owner name; the apex maps to
/// `@`. Returns None for names outside the zone, which a well-formed
/// AXFR answer does not contain.
fn relativize(name: &Name, origin: &Name) -> Option<String> {
    if !origin.zone_of(name) {
        return None;
    }
    let full = dotted(name);
    let apex = dotted(origin);
    if full == apex {
        return Some(APEX.to_string());
    }
    full.strip_suffix(&format!(".{}", apex)).map(str::to_string)
}

fn dotted(name: &Name) -> String {
    let mut s = name.to_lowercase().to_utf8();
    if !s.ends_with('.') {
        s.push('.');
    }
    s
}

fn kind_of(rtype: RecordType) -> Option<RecordKind> {
    match rtype {
        RecordType::A => Some(RecordKind::A),
        RecordType::AAAA => Some(RecordKind::AAAA),
        RecordType::CNAME => Some(RecordKind::CNAME),
        RecordType::MX => Some(RecordKind::MX),
        RecordType::NS => Some(RecordKind::NS),
        RecordType::PTR => Some(RecordKind::PTR),
        RecordType::TXT => Some(RecordKind::TXT),
        RecordType::SRV => Some(RecordKind::SRV),
        RecordType::Unknown(TYPE_SPF) => Some(RecordKind::SPF),
        _ => None,
    }
}
