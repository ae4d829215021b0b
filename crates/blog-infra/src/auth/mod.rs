//! Bearer token implementation of the identity port.

mod jwt;

pub use jwt::{JwtConfig, JwtTokenService};
