pub mod browse;
pub mod server;
pub mod version;

pub use browse::handle_browse_command;
pub use server::handle_server_command;
pub use version::handle_version_command;
