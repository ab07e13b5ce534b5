pub mod endpoint_eviction;

pub use endpoint_eviction::EndpointEvictionJob;
