pub mod jwt;

pub use jwt::{Claims, TokenService, BEARER_PREFIX};
