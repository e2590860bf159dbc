use std::io::Write;

use crate::cli::{parse_u8, print_usage};
use crate::commands::{GetUserAccess, GetUserName, SetUserAccess};
use crate::error::{Error, Result};
use crate::observe::report_failure;
use crate::transport::{Transport, execute};
use crate::types::{PrivilegeLevel, UserAccess};

/// Enumerate and report per-user access records on a channel.
///
/// A nonzero `user_id` reports exactly that user. Zero means "all users":
/// the enumeration starts at id 1 and its bound is the `max_user_ids`
/// count decoded from the first response.
pub fn user_access(
    transport: &mut dyn Transport,
    out: &mut dyn Write,
    channel: u8,
    user_id: u8,
) -> Result<()> {
    raise_privilege(transport)?;

    let explicit = user_id != 0;
    let mut current = if explicit { user_id } else { 1 };
    let mut max_id = 0;
    let mut first = true;

    loop {
        let access = fetch_user_access(transport, channel, current)?;
        let name = match execute(transport, &GetUserName { user_id: current }) {
            Ok(name) => name,
            Err(err) => {
                report_failure(format_args!("Get User Name (id {current}) failed: {err}"));
                return Err(err);
            }
        };

        if first {
            writeln!(out, "Maximum User IDs     : {}", access.max_user_ids)?;
            writeln!(out, "Enabled User IDs     : {}", access.enabled_user_ids)?;
            max_id = access.max_user_ids;
            first = false;
        }

        writeln!(out)?;
        writeln!(out, "User ID              : {current}")?;
        writeln!(out, "User Name            : {name}")?;
        writeln!(
            out,
            "Fixed Name           : {}",
            if current <= access.fixed_user_ids {
                "Yes"
            } else {
                "No"
            }
        )?;
        writeln!(
            out,
            "Access Available     : {}",
            if access.callin_callback {
                "callback"
            } else {
                "call-in / callback"
            }
        )?;
        writeln!(
            out,
            "Link Authentication  : {}abled",
            if access.link_auth { "en" } else { "dis" }
        )?;
        writeln!(
            out,
            "IPMI Messaging       : {}abled",
            if access.ipmi_messaging { "en" } else { "dis" }
        )?;
        writeln!(out, "Privilege Level      : {}", access.privilege_limit)?;

        if explicit {
            break;
        }
        current += 1;
        if current > max_id {
            break;
        }
    }

    Ok(())
}

/// Update one user's access record on a channel.
///
/// `args` carries the remaining tokens after the subcommand: channel, user
/// id, then `key=value` options drawn from callin/link/ipmi/privilege. The
/// update is a read-modify-write against the record the controller holds,
/// so unspecified fields are sent back unchanged.
pub fn set_user_access(
    transport: &mut dyn Transport,
    out: &mut dyn Write,
    args: &[&str],
) -> Result<()> {
    if args.len() < 2 || args[0] == "help" {
        print_usage(out)?;
        return Ok(());
    }

    raise_privilege(transport)?;

    let channel = parse_u8(args[0])?;
    let user_id = parse_u8(args[1])?;

    let baseline = fetch_user_access(transport, channel, user_id)?;
    let mut request = SetUserAccess::from_baseline(channel, user_id, &baseline);

    for option in &args[2..] {
        match option.split_once('=') {
            Some(("callin", value)) => request.callin_callback = value != "off",
            Some(("link", value)) => request.link_auth = value != "off",
            Some(("ipmi", value)) => request.ipmi_messaging = value != "off",
            Some(("privilege", value)) => {
                // Range is the device's call; any parsed value goes through.
                request.privilege_limit = PrivilegeLevel::from_u8(parse_u8(value)?);
            }
            _ => {
                writeln!(out, "Invalid option: {option}")?;
                return Err(Error::InvalidOption((*option).to_string()));
            }
        }
    }

    match execute(transport, &request) {
        Ok(()) => Ok(()),
        Err(err) => {
            report_failure(format_args!(
                "Set User Access (channel {channel} id {user_id}) failed: {err}"
            ));
            Err(err)
        }
    }
}

/// User-access commands act on the whole user table and require an
/// administrator-level session.
fn raise_privilege(transport: &mut dyn Transport) -> Result<()> {
    transport
        .set_privilege_level(PrivilegeLevel::Administrator)
        .inspect_err(|err| {
            report_failure(format_args!("Unable to raise session privilege: {err}"));
        })
}

fn fetch_user_access(
    transport: &mut dyn Transport,
    channel: u8,
    user_id: u8,
) -> Result<UserAccess> {
    match execute(transport, &GetUserAccess { channel, user_id }) {
        Ok(access) => Ok(access),
        Err(err) => {
            report_failure(format_args!(
                "Get User Access (channel {} id {}) failed: {err}",
                channel & 0x0F,
                user_id & 0x3F
            ));
            Err(err)
        }
    }
}
