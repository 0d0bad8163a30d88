pub mod theme_repository;
