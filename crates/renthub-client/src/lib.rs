// Renthub Auth Client
//
// This crate owns everything that talks to the outside world on behalf of the
// session: the HTTP gateway against the user service, the persisted
// credential, and the session store that ties them together.
//
// Key design decisions:
// - The gateway is the single place where HTTP failures become AuthError values
// - CredentialStore is a trait so the session store can be tested with an
//   in-memory token slot instead of a file
// - One SessionHandle per process is the composition root; it is cheap to
//   clone and hands out read-only watch subscriptions
// - Overlapping login-class operations are sequenced: a settled attempt is
//   discarded unless it is still the latest one issued

pub mod config;
pub mod credentials;
pub mod gateway;
pub mod session;

// Re-exports for convenience
pub use config::ClientConfig;
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use gateway::AuthGateway;
pub use session::SessionHandle;
