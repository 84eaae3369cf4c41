use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Owner name of the zone root. Its records are managed separately on the
/// hosting side and must never be touched by the sync pipeline.
pub const APEX: &str = "@";

/// The record types the pipeline knows how to carry. Anything else in a
/// zone is ignored; anything else in a filter is a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKind {
    A,
    AAAA,
    CNAME,
    MX,
    NS,
    PTR,
    SPF,
    TXT,
    SRV,
}

impl RecordKind {
    pub fn as_str(&self) -> &str {
        match self {
            RecordKind::A => "A",
            RecordKind::AAAA => "AAAA",
            RecordKind::CNAME => "CNAME",
            RecordKind::MX => "MX",
            RecordKind::NS => "NS",
            RecordKind::PTR => "PTR",
            RecordKind::SPF => "SPF",
            RecordKind::TXT => "TXT",
            RecordKind::SRV => "SRV",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(RecordKind::A),
            "AAAA" => Ok(RecordKind::AAAA),
            "CNAME" => Ok(RecordKind::CNAME),
            "MX" => Ok(RecordKind::MX),
            "NS" => Ok(RecordKind::NS),
            "PTR" => Ok(RecordKind::PTR),
            "SPF" => Ok(RecordKind::SPF),
            "TXT" => Ok(RecordKind::TXT),
            "SRV" => Ok(RecordKind::SRV),
            _ => Err(Error::UnsupportedRecordType(s.to_string())),
        }
    }
}

/// Ordered set of record types to synchronize. Built from configuration
/// before any network activity, so an unsupported type fails the run
/// before the upstream server is contacted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTypeFilter {
    kinds: Vec<RecordKind>,
}

impl RecordTypeFilter {
    /// Request order is preserved, duplicates are dropped.
    pub fn parse<I, S>(types: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kinds: Vec<RecordKind> = Vec::new();
        for t in types {
            let kind = t.as_ref().parse()?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Ok(Self { kinds })
    }

    pub fn kinds(&self) -> &[RecordKind] {
        &self.kinds
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }
}

/// Same-type record values sharing one owner name and TTL.
///
/// If values arrive with diverging TTLs the last one wins; the protocol
/// forbids that situation, so it is not special-cased.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rdataset {
    pub ttl: u32,
    pub values: Vec<String>,
}

/// Full result of one zone transfer: owner name (relative to the zone,
/// `@` for the apex) to per-type rdatasets. Built once per run and
/// discarded with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneSnapshot {
    entries: BTreeMap<String, BTreeMap<RecordKind, Rdataset>>,
}

impl ZoneSnapshot {
    /// Record that `owner` exists in the zone, even when none of its
    /// rdatasets are of a supported type. Emptiness of the snapshot means
    /// "the zone has no names at all", not "no supported records".
    pub fn touch(&mut self, owner: &str) {
        self.entries.entry(owner.to_string()).or_default();
    }

    /// Append one value to the owner's rdataset of the given kind.
    /// Identical values are suppressed; the TTL of the last call wins.
    pub fn push(&mut self, owner: &str, kind: RecordKind, ttl: u32, value: String) {
        let set = self
            .entries
            .entry(owner.to_string())
            .or_default()
            .entry(kind)
            .or_default();
        set.ttl = ttl;
        if !set.values.contains(&value) {
            set.values.push(value);
        }
    }

    pub fn get(&self, owner: &str, kind: RecordKind) -> Option<&Rdataset> {
        self.entries.get(owner)?.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<RecordKind, Rdataset>)> {
        self.entries.iter()
    }

    pub fn owner_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
