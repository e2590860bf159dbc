#![deny(unsafe_code)]
#![warn(missing_docs)]

//! The IPMI channel-management command family for BMCs.
//!
//! The crate implements:
//! - `Get Channel Authentication Capabilities` with the v1.5 fallback retry
//! - `Get Channel Info` plus both stored variants of `Get Channel Access`
//! - `Get User Access` / `Get User Name` enumeration
//! - `Set User Access` read-modify-write updates
//! - subcommand dispatch for `authcap`, `getaccess`, `setaccess`, and `info`
//!
//! Session establishment and the wire transport are external concerns:
//! callers hand in any [`Transport`] implementation and the crate performs
//! the command encoding, response decoding, and reporting on top of it.

mod channel;
mod cli;
pub mod commands;
mod debug;
mod error;
mod observe;
mod strings;
mod transport;
mod types;
mod user;

pub use crate::channel::{auth_capabilities, channel_info};
pub use crate::cli::{CURRENT_CHANNEL, ChannelCommand, print_usage, run};
pub use crate::error::{Error, Result};
pub use crate::transport::{Transport, execute};
pub use crate::types::{
    AccessMode, AccessSelector, ChannelAccess, ChannelAuthCapabilities, ChannelInfo,
    ChannelMedium, ChannelProtocol, PrivilegeLevel, RawResponse, SessionSupport, UserAccess,
};
pub use crate::user::{set_user_access, user_access};
