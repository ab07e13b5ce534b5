mod client;
mod server;

pub use client::ClientServices;
pub use server::ServerServices;
