pub mod active_theme_cache;
pub mod theme_service;
