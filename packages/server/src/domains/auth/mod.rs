pub mod jwt;
pub mod models;
pub mod password;

pub use jwt::{Claims, JwtService, TokenPair};
pub use models::{Role, User};
pub use password::{hash_password, verify_password};
