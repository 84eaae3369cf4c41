mod axfr;
mod types;

pub use axfr::AxfrFetcher;
pub use types::ZoneFetcher;
