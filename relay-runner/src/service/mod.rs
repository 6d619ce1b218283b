//! Service layer
//!
//! Capabilities the scheduler is handed at construction instead of reaching
//! for ambient state: where the credential comes from, how time passes
//! between polls, and where progress is reported.
//!
//! All services are trait-based to enable testing and dependency injection.

mod credentials;
mod progress;
mod sleeper;

// Re-export traits
pub use credentials::CredentialSource;
pub use progress::ProgressSink;
pub use sleeper::Sleeper;

// Re-export implementations
pub use credentials::{
    ChainCredential, EnvCredential, KeyringCredential, PromptCredential, StaticCredential,
};
pub use progress::NoopProgress;
pub use sleeper::TokioSleeper;
