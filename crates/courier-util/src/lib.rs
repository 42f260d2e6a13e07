//! Conversion and normalization helpers for Courier messaging services.
//!
//! Request handlers receive loosely-typed payloads (webhook bodies, form
//! posts, config maps). This crate turns them into the primitives the
//! handlers need:
//! - integer, float, string and map conversions over [`Value`]
//! - JSON marshal/unmarshal and body buffering
//! - phone-number cleanup and US country-code coercion
//! - channel-target lookups (origin label, phone visibility)
//! - a few string, identifier and message-tagging helpers
//!
//! Malformed input never aborts a request. [`Toolkit`] reports the failure
//! to its [`Reporter`] and hands back a best-effort value; the [`convert`]
//! module returns the same value together with the error.

pub mod body;
pub mod config;
pub mod convert;
pub mod error;
pub mod form;
pub mod id;
pub mod message;
pub mod phone;
pub mod render;
pub mod report;
pub mod target;
pub mod text;
pub mod toolkit;
pub mod value;

pub use body::{read_all, BufferedBody};
pub use config::{CastPolicy, UtilityConfig};
pub use error::{ErrorKind, Recovered, UtilityError};
pub use form::FormData;
pub use id::new_id;
pub use message::shopify_message;
pub use phone::{clean_phone, e164_phone, phone_valid};
pub use render::{Render, RenderOptions, Rendered};
pub use report::{MemoryReporter, Reporter, TracingReporter};
pub use target::{origin, show_phone, Channel, Target};
pub use text::{split, substring_between, trim};
pub use toolkit::Toolkit;
pub use value::Value;
