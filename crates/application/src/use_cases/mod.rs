pub mod dispatch;
pub mod session;

pub use dispatch::DispatchMessageUseCase;
pub use session::{
    LookupOutcome, LookupResult, LookupSessionUseCase, SessionOptions, SessionReport,
    SessionState,
};
