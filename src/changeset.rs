use crate::record::{AggregatedRecords, RecordKind};

/// One UPSERT instruction for the hosting API: set the rdataset of
/// (name, kind) to exactly `values`. Never a create or a delete; an
/// upsert is safe to repeat and self-heals drift on the next run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeDescriptor {
    pub name: String,
    pub kind: RecordKind,
    pub ttl: u32,
    pub values: Vec<String>,
}

/// Flatten the aggregate into the change sequence, one descriptor per
/// (name, type) key, ordered by the aggregate's lexicographic key so
/// batch contents are reproducible.
pub fn build_changes(records: AggregatedRecords) -> Vec<ChangeDescriptor> {
    records
        .into_iter()
        .map(|((name, kind), set)| ChangeDescriptor {
            name,
            kind,
            ttl: set.ttl,
            values: set.values,
        })
        .collect()
}
