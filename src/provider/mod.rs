mod pdns;
mod types;

pub use pdns::Auth;
pub use pdns::Pdns;
pub use pdns::PdnsCfg;
pub use types::Provider;
