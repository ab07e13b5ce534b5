pub mod handler;
pub mod udp_loop;

pub use handler::LookupServerHandler;
pub use udp_loop::serve_udp;
