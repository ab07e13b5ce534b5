mod dispatch_message;

pub use dispatch_message::DispatchMessageUseCase;
