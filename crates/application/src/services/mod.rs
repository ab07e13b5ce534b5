mod endpoint_tracker;

pub use endpoint_tracker::{AckCorrelation, EndpointState, EndpointTracker};
