//! Session and role gate for the back-office areas.
//!
//! SYSTEM CONTEXT
//! ==============
//! The admin (`/admin`) and dashboard (`/dashboard`) trees are both guarded
//! by the same pipeline: a persisted session blob is read through a
//! [`store::SessionStore`], classified by [`resolver::resolve`], held in an
//! [`auth::AuthGate`], and turned into a render/redirect decision by a
//! [`guard::RouteGuard`] which filters its navigation through
//! [`nav::visible`].
//!
//! This crate has no HTTP dependency. Storage and credential checks are
//! injected through async traits so a network-backed session check or a
//! real identity provider can replace the defaults without touching the
//! gate's state machine.

pub mod auth;
pub mod credentials;
pub mod guard;
pub mod nav;
pub mod record;
pub mod resolver;
pub mod role;
pub mod store;

pub use auth::{AuthGate, AuthSnapshot, AuthStatus, LoginOutcome};
pub use credentials::{CredentialVerifier, Principal, StaticCredentials};
pub use guard::{GuardDecision, RouteGuard};
pub use nav::NavItem;
pub use record::SessionRecord;
pub use resolver::{Denial, Resolution};
pub use role::Role;
pub use store::{MemoryStorage, SessionBackend, SessionStore, StoreError};
