pub mod config;
pub mod error;
pub mod payment;
pub mod profile;
pub mod region;
pub mod role;

pub use config::*;
pub use error::*;
pub use payment::*;
pub use profile::*;
pub use region::*;
pub use role::*;
