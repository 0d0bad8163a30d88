// Persistence helpers
pub mod file_system;
pub(crate) mod ttl_cache;
