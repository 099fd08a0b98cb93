pub mod message;
pub mod seed;
pub mod store;
