//! Authentication: credential hashing, token codec, cookie transport

pub mod cookie;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use cookie::{build_session_cookie, extract_cookie};
pub use jwt::{Claims, JwtService};
pub use middleware::{cookie_auth_middleware, AuthContext};
pub use password::PasswordHasher;
