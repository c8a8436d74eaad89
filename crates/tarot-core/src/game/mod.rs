pub mod serialization;
pub mod session;
pub mod standings;
pub mod store;
