// Backend-as-a-service collaborators: email/password auth and per-user
// document storage.

pub mod auth;
pub mod handlers;
pub mod repository;
