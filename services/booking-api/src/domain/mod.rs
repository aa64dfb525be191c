pub mod category;
pub mod room;
pub mod user;

pub use category::{Category, CategoryWithRooms};
pub use room::{Room, RoomImage};
pub use user::{User, UserPublic};
