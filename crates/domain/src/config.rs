pub mod client;
pub mod errors;
pub mod logging;
pub mod records;
pub mod root;
pub mod server;
pub mod settings;

pub use client::ClientConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use records::load_records_file;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use settings::Settings;
