// Application layer - use cases orchestrating the domain
pub mod dto;
pub mod errors;
pub mod services;
