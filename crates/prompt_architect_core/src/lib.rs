pub mod auth;
pub mod composer;
pub mod domain;
pub mod ports;

pub use auth::{AuthError, SessionError, SessionManager, SignupError};
pub use composer::Composer;
pub use domain::{AuthSession, ComposedPayload, GenerationRequest, Identity, User};
pub use ports::{
    CredentialStore, GenerationGateway, PasswordHasher, PortError, PortResult, SessionStore,
};
