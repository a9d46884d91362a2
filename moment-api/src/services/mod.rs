pub mod auth_service;
pub mod friend_service;
pub mod token_service;
