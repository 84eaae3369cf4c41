use serde::Serialize;

use crate::changeset::ChangeDescriptor;
use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
struct RrsetRecord {
    content: String,
    disabled: bool,
}

#[derive(Debug, Clone, Serialize)]
struct RrsetChange {
    name: String,
    r#type: String,
    ttl: u32,
    changetype: &'static str,
    records: Vec<RrsetRecord>,
}

impl From<&ChangeDescriptor> for RrsetChange {
    fn from(change: &ChangeDescriptor) -> Self {
        Self {
            name: change.name.clone(),
            r#type: change.kind.as_str().to_string(),
            ttl: change.ttl,
            // REPLACE is the API's upsert: create the rrset if absent,
            // overwrite its whole value set if present.
            changetype: "REPLACE",
            records: change
                .values
                .iter()
                .map(|v| RrsetRecord {
                    content: v.clone(),
                    disabled: false,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ZonePatch {
    rrsets: Vec<RrsetChange>,
}

pub(super) fn patch_body(changes: &[ChangeDescriptor]) -> Result<String> {
    let patch = ZonePatch {
        rrsets: changes.iter().map(RrsetChange::from).collect(),
    };
    Ok(serde_json::to_string(&patch)?)
}
