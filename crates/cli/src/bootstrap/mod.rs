mod config;
mod logging;
mod signals;

pub use config::load_config;
pub use logging::init_logging;
pub use signals::spawn_shutdown_listener;
