// Submodules
pub mod core;
pub mod error;
pub mod general;
pub mod options;
pub mod server;
pub mod table;

pub use self::core::Config;
pub use error::Error;
pub use general::{General, Guards, LogFormat};
pub use options::Options;
pub use server::Server;
pub use table::{Column, Table};
