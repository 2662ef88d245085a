pub mod api;
#[path = "bootstrap/app_bootstrap.rs"]
pub mod app_bootstrap;
pub mod client;
pub mod cmd;
#[path = "bootstrap/command_registry.rs"]
pub mod command_registry;
pub mod comm;
pub mod db;
pub mod error;
pub mod models;
pub mod repo;
#[path = "bootstrap/route_registry.rs"]
pub mod route_registry;

// Re-export bootstrap modules
pub use app_bootstrap::*;
pub use command_registry::*;
pub use route_registry::*;
