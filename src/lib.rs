//! # homeschool
//!
//! Platform-neutral core of the Homeschool Interactive front-end. The same
//! code backs the Leptos browser client (`client/`) and the native CLI
//! (`cli/`).
//!
//! DESIGN
//! ======
//! - [`session`] owns the single authentication state of a running client:
//!   `login`, `logout`, rehydration from [`storage`], and a watch channel for
//!   anything that must react to session changes.
//! - [`guard`] decides, per navigation, whether a view renders or where to
//!   redirect. Elevated access is one named [`guard::AccessPolicy`].
//! - [`net`] is the REST client. Every call returns [`net::ApiResult`] so
//!   each call site makes exactly one surface-or-log decision.
//! - [`state`] holds the pure dashboard helpers (sorting, status toggles,
//!   date filters, edit-on-blur diffs) that the UI components call.

pub mod config;
pub mod guard;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod net;
pub mod role;
pub mod session;
pub mod state;
pub mod storage;
pub mod util;

pub use config::ClientConfig;
pub use guard::{AccessPolicy, AppRoute, GuardDecision, GuardState, RouteGuard};
pub use net::{ApiClient, ApiError, ApiResult};
pub use role::{Role, RoleSet};
pub use session::{AuthApi, Session, SessionStore};
pub use storage::{DurableStorage, MemoryStorage, StorageError};
