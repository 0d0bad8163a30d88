// Client side of the theme pipeline: fetch the active theme and publish its variables
pub mod http_theme_source;
pub mod theme_applier;
pub mod theme_loader;
