//! # sorng-msgraph – Microsoft Graph Resource Client
//!
//! Thin, typed client for a subset of the **Microsoft Graph API v1.0**.
//!
//! Every operation is built the same way: a resource facade assembles an
//! immutable [`GraphRequest`] (verb, path, query, headers, body, declared
//! cardinality), the [`GraphApiClient`] hands it to an injected
//! [`GraphTransport`], and the JSON reply is decoded into one model or an
//! ordered list of models.  Failures surface as a single [`GraphError`]
//! type with the remote status and body left untouched.
//!
//! ## Capabilities
//!
//! - **Drives** – list a user's drives.
//! - **Files & Folders** – get items by id or path, list root / child
//!   folders, list children, delete items, resolve download URLs.
//! - **Permissions** – list or get permissions, update roles, remove.
//! - **Sharing** – send invitations, create sharing links.
//! - **Groups** – search Microsoft 365 groups by display name.
//! - **Messages** – list inbox messages, list / get attachments, move a
//!   message to Deleted Items.
//! - **Planner** – list a group's plans and a plan's tasks.
//!
//! There are no retries, no automatic pagination, and no token acquisition:
//! one call is one HTTP exchange.

pub mod types;
pub mod error;
pub mod auth;
pub mod request;
pub mod transport;
pub mod api_client;
pub mod drives;
pub mod files;
pub mod permissions;
pub mod sharing;
pub mod groups;
pub mod messages;
pub mod planner;

// Re-exports
pub use api_client::GraphApiClient;
pub use auth::{StaticTokenProvider, TokenProvider};
pub use drives::GraphDrives;
pub use error::{GraphError, GraphErrorKind, GraphResult};
pub use files::GraphFiles;
pub use groups::GraphGroups;
pub use messages::GraphMessages;
pub use permissions::GraphPermissions;
pub use planner::GraphPlanner;
pub use request::{Cardinality, GraphRequest};
pub use sharing::GraphSharing;
pub use transport::{GraphResponse, GraphTransport, RecordingTransport, ReqwestTransport};
pub use types::*;
