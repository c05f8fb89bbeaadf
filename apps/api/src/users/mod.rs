// User registration and profile lookup.

pub mod handlers;
pub mod store;
