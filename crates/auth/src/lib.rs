//! `booking-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the ownership
//! check reaches records through the [`ResourceLookup`] port and the route gate
//! is a pure function of a path and a credential flag.

pub mod authorize;
pub mod claims;
pub mod gate;
pub mod jwt;
pub mod ownership;
pub mod principal;
pub mod registry;
pub mod roles;

pub use authorize::{AuthzError, require_role};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use gate::{GateDecision, gate};
pub use jwt::{Hs256JwtValidator, JwtValidator};
pub use ownership::{AccessDecision, DenyReason, ResourceLookup, ResourcePolicy, ResourceRecord, evaluate};
pub use principal::{Principal, PrincipalId};
pub use registry::{HandlerId, PolicyRegistry, RegistryError};
pub use roles::Role;
