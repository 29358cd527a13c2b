//! # SortOfRemote NG – Microsoft Graph Resource Client
//!
//! Typed access to the Microsoft Graph v1.0 resources used across the
//! collaboration features: user drives and drive items, item permissions
//! and sharing, Microsoft 365 groups, mailbox messages and attachments, and
//! Planner plans and tasks.

pub mod msgraph;

pub use msgraph::*;
