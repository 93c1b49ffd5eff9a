//! `baas-http` is an async HTTP client for hosted backend-as-a-service
//! object stores (users, schema-less classes, installations and push).
//!
//! Every call is authorized in exactly one of two modes, see [`AuthMode`]:
//! - session mode sends the application id and REST API key,
//! - master mode sends the application id and the master key.
//!
//! The entry points are:
//! - [`Credentials`] / [`Session`] for configuration and authentication
//! - [`Class`] for generic CRUD against a named collection
//! - [`BaasError::is_object_not_found`] to tell "absent" from other failures

mod class;
mod credentials;
mod decode;
mod dispatch;
mod error;
mod session;
mod types;
mod wire;

pub use class::Class;
pub use credentials::{Credentials, CredentialsConfig};
pub use dispatch::{execute, execute_discard};
pub use error::{BaasError, ServerError};
pub use reqwest::Method;
pub use session::{AuthMode, Session};
pub use types::{
    Anonymous, AuthData, Facebook, Installation, Object, ObjectMeta, Pointer, PushData,
    PushNotification, Results, Signup, Twitter, UpdateResponse, User,
};

pub type Result<T> = std::result::Result<T, BaasError>;
