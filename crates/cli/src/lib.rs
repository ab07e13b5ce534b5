pub mod bootstrap;
pub mod di;
