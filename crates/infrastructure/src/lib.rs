pub mod codec;
pub mod repositories;
pub mod server;
pub mod transport;
