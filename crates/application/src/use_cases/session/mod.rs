mod lookup_session;
mod report;

pub use lookup_session::{LookupSessionUseCase, SessionOptions, SessionState};
pub use report::{LookupOutcome, LookupResult, SessionReport};
