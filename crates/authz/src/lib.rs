// Authorization helpers
pub mod extract;
pub mod jwt;

pub use extract::{AdminOnly, Authenticated, SuperAdminOnly};
pub use jwt::{Claims, JwtValidator};
