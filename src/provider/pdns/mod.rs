mod pdns;
mod restful_cli;
mod serializer;

pub use pdns::Auth;
pub use pdns::Pdns;
pub use pdns::PdnsCfg;
