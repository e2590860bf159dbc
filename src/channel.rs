use std::io::Write;

use crate::commands::{GetChannelAccess, GetChannelAuthCapabilities, GetChannelInfo};
use crate::error::{Error, Result};
use crate::observe::report_failure;
use crate::strings::{AUTH_TYPE_OEM, auth_type_list};
use crate::transport::{Transport, execute};
use crate::types::{AccessSelector, PrivilegeLevel};

/// Query and report a channel's authentication capabilities.
///
/// The first request asks for IPMI v2.0 data; controllers that predate v2.0
/// may refuse it, so a failed attempt is retried exactly once without the
/// v2.0 bit. No other request in this crate is retried.
pub fn auth_capabilities(
    transport: &mut dyn Transport,
    out: &mut dyn Write,
    channel: u8,
    privilege: PrivilegeLevel,
) -> Result<()> {
    let command = GetChannelAuthCapabilities::new(channel, privilege);
    let caps = match execute(transport, &command) {
        Ok(caps) => caps,
        Err(Error::Device { .. } | Error::Timeout | Error::Io(_)) => {
            match execute(transport, &command.without_v2_data()) {
                Ok(caps) => caps,
                Err(err) => {
                    report_failure(format_args!(
                        "Get Channel Authentication Capabilities failed: {err}"
                    ));
                    return Err(err);
                }
            }
        }
        Err(err) => {
            report_failure(format_args!(
                "Get Channel Authentication Capabilities failed: {err}"
            ));
            return Err(err);
        }
    };

    writeln!(out, "Channel number             : {}", caps.channel_number)?;
    writeln!(
        out,
        "IPMI v1.5  auth types      : {}",
        auth_type_list(caps.enabled_auth_types)
    )?;

    if caps.v20_data_available {
        writeln!(
            out,
            "KG status                  : {}",
            if caps.kg_status {
                "non-zero"
            } else {
                "default (all zeroes)"
            }
        )?;
    }

    writeln!(
        out,
        "Per message authentication : {}abled",
        if caps.per_message_auth { "en" } else { "dis" }
    )?;
    writeln!(
        out,
        "User level authentication  : {}abled",
        if caps.user_level_auth { "en" } else { "dis" }
    )?;

    writeln!(
        out,
        "Non-null user names exist  : {}",
        if caps.non_null_usernames { "yes" } else { "no" }
    )?;
    writeln!(
        out,
        "Null user names exist      : {}",
        if caps.null_usernames { "yes" } else { "no" }
    )?;
    writeln!(
        out,
        "Anonymous login enabled    : {}",
        if caps.anon_login_enabled { "yes" } else { "no" }
    )?;

    if caps.v20_data_available {
        writeln!(
            out,
            "Channel supports IPMI v1.5 : {}",
            if caps.ipmiv15_support { "yes" } else { "no" }
        )?;
        writeln!(
            out,
            "Channel supports IPMI v2.0 : {}",
            if caps.ipmiv20_support { "yes" } else { "no" }
        )?;
    }

    // OEM auth types come with an IANA number and auxiliary data.
    if caps.enabled_auth_types & AUTH_TYPE_OEM != 0 {
        if let Some(oem_id) = caps.oem_id {
            writeln!(out, "IANA Number for OEM        : {oem_id}")?;
        }
        if let Some(aux) = caps.oem_aux_data {
            writeln!(out, "OEM Auxiliary Data         : 0x{aux:x}")?;
        }
    }

    Ok(())
}

/// Query and report a channel's medium, protocol, and session metadata,
/// followed by both stored variants of its access settings.
///
/// A failure on either access query abandons the command; output already
/// written for earlier steps stands.
pub fn channel_info(transport: &mut dyn Transport, out: &mut dyn Write, channel: u8) -> Result<()> {
    let info = match execute(transport, &GetChannelInfo { channel }) {
        Ok(info) => info,
        Err(err) => {
            report_failure(format_args!("Get Channel Info failed: {err}"));
            return Err(err);
        }
    };

    writeln!(out, "Channel 0x{:x} info:", info.channel_number)?;
    writeln!(out, "  Channel Medium Type   : {}", info.channel_medium)?;
    writeln!(out, "  Channel Protocol Type : {}", info.channel_protocol)?;
    writeln!(out, "  Session Support       : {}", info.session_support)?;
    writeln!(out, "  Active Session Count  : {}", info.active_sessions)?;
    writeln!(out, "  Protocol Vendor ID    : {}", info.vendor_id)?;

    report_access_settings(transport, out, channel, AccessSelector::Active)?;
    report_access_settings(transport, out, channel, AccessSelector::NonVolatile)?;

    Ok(())
}

/// Fetch one stored variant of the channel access settings and write its
/// labeled section. Both variants share this path; only the selector byte
/// and the heading differ.
fn report_access_settings(
    transport: &mut dyn Transport,
    out: &mut dyn Write,
    channel: u8,
    selector: AccessSelector,
) -> Result<()> {
    let access = match execute(transport, &GetChannelAccess { channel, selector }) {
        Ok(access) => access,
        Err(err) => {
            report_failure(format_args!(
                "Get Channel Access ({}) failed: {err}",
                match selector {
                    AccessSelector::Active => "volatile",
                    AccessSelector::NonVolatile => "non-volatile",
                }
            ));
            return Err(err);
        }
    };

    writeln!(out, "  {}", selector.label())?;
    // The wire encodes these three as disable bits.
    writeln!(
        out,
        "    Alerting            : {}abled",
        if access.alerting { "dis" } else { "en" }
    )?;
    writeln!(
        out,
        "    Per-message Auth    : {}abled",
        if access.per_message_auth { "dis" } else { "en" }
    )?;
    writeln!(
        out,
        "    User Level Auth     : {}abled",
        if access.user_level_auth { "dis" } else { "en" }
    )?;
    writeln!(out, "    Access Mode         : {}", access.access_mode)?;

    Ok(())
}
