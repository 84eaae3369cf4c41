use std::collections::BTreeMap;

use log::debug;

use crate::error::{Error, Result};

use super::types::{APEX, Rdataset, RecordKind, RecordTypeFilter, ZoneSnapshot};

/// Snapshot records reshaped for submission: one rdataset per
/// (fully-qualified name, type) key, keys in lexicographic order so the
/// resulting change sequence is reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedRecords {
    inner: BTreeMap<(String, RecordKind), Rdataset>,
}

impl AggregatedRecords {
    fn push(&mut self, name: String, kind: RecordKind, ttl: u32, value: String) {
        let set = self.inner.entry((name, kind)).or_default();
        set.ttl = ttl;
        set.values.push(value);
    }

    pub fn get(&self, name: &str, kind: RecordKind) -> Option<&Rdataset> {
        self.inner.get(&(name.to_string(), kind))
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl IntoIterator for AggregatedRecords {
    type Item = ((String, RecordKind), Rdataset);
    type IntoIter = std::collections::btree_map::IntoIter<(String, RecordKind), Rdataset>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

/// Qualify a zone-relative owner name against the configured domain,
/// always terminating with the trailing dot the hosting API expects.
pub fn qualify(owner: &str, domain: &str) -> String {
    if domain.ends_with('.') {
        format!("{}.{}", owner, domain)
    } else {
        format!("{}.{}.", owner, domain)
    }
}

/// Walk the snapshot restricted to the requested types and build the
/// aggregate keyed by (qualified name, type). The apex owner is skipped:
/// the hosted zone's root records have their own lifecycle.
pub fn aggregate(
    snapshot: &ZoneSnapshot,
    domain: &str,
    filter: &RecordTypeFilter,
) -> Result<AggregatedRecords> {
    if snapshot.is_empty() {
        return Err(Error::EmptyZone(domain.to_string()));
    }

    let mut aggregated = AggregatedRecords::default();
    for kind in filter.kinds() {
        for (owner, sets) in snapshot.iter() {
            if owner.as_str() == APEX {
                continue;
            }
            let Some(set) = sets.get(kind) else {
                continue;
            };
            let name = qualify(owner, domain);
            for value in &set.values {
                aggregated.push(name.clone(), *kind, set.ttl, value.clone());
            }
        }
    }

    if aggregated.is_empty() {
        return Err(Error::NoMatchingRecords(domain.to_string()));
    }

    debug!(
        "aggregated {} record set(s) for zone {} from {} owner name(s)",
        aggregated.len(),
        domain,
        snapshot.owner_count()
    );
    Ok(aggregated)
}
