//! # campusdesk-auth
//!
//! Authentication and authorization primitives for CampusDesk.
//!
//! ## Modules
//!
//! - `jwt` — stateless HS256 bearer token issuing and verification
//! - `password` — Argon2id password hashing and policy enforcement
//! - `rbac` — role-to-permission policy and its enforcement

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{Permission, RbacEnforcer, RbacPolicies};
