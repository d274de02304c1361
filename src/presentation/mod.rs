// Presentation layer - the HTTP surface the host talks to
pub mod app_state;
pub mod handlers;
pub mod router;
