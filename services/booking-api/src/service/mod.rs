pub mod auth_service;
pub mod category_service;
pub mod room_service;

pub use auth_service::{AuthService, ExternalIdentity};
pub use category_service::CategoryService;
pub use room_service::{CreateRoomInput, RoomService};

pub(crate) fn db_error(e: anyhow::Error) -> common::errors::AppError {
    tracing::error!("Database error: {}", e);
    common::errors::AppError::Database(e.to_string())
}
