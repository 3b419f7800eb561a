pub mod client;
pub mod errors;
pub mod response;
pub mod types;
pub mod utils;

pub use client::IpLocate;
pub use errors::{ErrorKind, IpLocateError};
pub use response::{Abuse, Asn, AsnType, Company, CompanyType, Hosting, LookupResponse, Privacy};
pub use types::{Config, HttpClientOptions};
