pub mod category_repo;
pub mod room_repo;
pub mod user_repo;

pub use category_repo::CategoryRepository;
pub use room_repo::RoomRepository;
pub use user_repo::UserRepository;
