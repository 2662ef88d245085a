pub mod connection;
pub mod error;

pub use connection::*;
pub use error::*;
