// Data transfer objects exchanged with the presentation layer
pub mod api_response;
pub mod theme_dto;
