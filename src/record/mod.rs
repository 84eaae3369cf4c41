mod aggregate;
mod types;

pub use aggregate::AggregatedRecords;
pub use aggregate::aggregate;
pub use aggregate::qualify;
pub use types::APEX;
pub use types::Rdataset;
pub use types::RecordKind;
pub use types::RecordTypeFilter;
pub use types::ZoneSnapshot;

#[cfg(test)]
mod unit_test;
