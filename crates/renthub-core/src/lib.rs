// Renthub Client Domain Core
//
// This crate provides the pure domain layer shared by the client and the CLI:
//
// Key design decisions:
// - No I/O anywhere in this crate; the gateway and credential storage live in renthub-client
// - Session state has a single invariant worth enforcing: an identity is never
//   present without a credential backing it
// - Bearer tokens are decoded without signature verification (the client only
//   needs the expiry claim; verification is the server's job)
// - Route guarding is a pure decision function so it can be re-evaluated on
//   every navigation at zero cost

pub mod error;
pub mod guard;
pub mod session;
pub mod token;
pub mod user;

// Re-exports for convenience
pub use error::{AuthError, FieldError, Result};
pub use guard::{evaluate, RedirectTarget, RouteClass, RouteDecision};
pub use session::Session;
pub use token::TokenClaims;
pub use user::{
    LoginCredentials, PasswordChange, ProfileUpdate, RegisterInfo, UserProfile, UserRole,
};
