pub mod json;

pub use json::JsonMessageCodec;
