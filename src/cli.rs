use std::io::Write;

use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::PrivilegeLevel;
use crate::{channel, user};

/// Channel sentinel meaning "the channel this request arrives on".
pub const CURRENT_CHANNEL: u8 = 0x0E;

/// A parsed channel subcommand.
///
/// Parsing happens once at the dispatch boundary; handlers receive typed
/// arguments, not raw tokens. `setaccess` keeps its tail of `key=value`
/// tokens because their validation is part of that command's own flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelCommand<'a> {
    /// Print the usage summary.
    Help,
    /// Query authentication capabilities for a channel and privilege.
    AuthCap {
        /// Channel to query.
        channel: u8,
        /// Requested maximum privilege.
        privilege: PrivilegeLevel,
    },
    /// Enumerate user access records on a channel.
    GetAccess {
        /// Channel to query.
        channel: u8,
        /// Explicit user id, or 0 for all users.
        user_id: u8,
    },
    /// Update one user's access record.
    SetAccess {
        /// Remaining tokens: channel, user id, and `key=value` options.
        args: &'a [&'a str],
    },
    /// Report channel medium, protocol, session, and access settings.
    Info {
        /// Channel to query.
        channel: u8,
    },
}

impl<'a> ChannelCommand<'a> {
    /// Parse a token list into a subcommand, validating argument counts.
    pub fn parse(args: &'a [&'a str]) -> Result<Self> {
        let Some(&subcommand) = args.first() else {
            return Ok(Self::Help);
        };

        match subcommand {
            "help" => Ok(Self::Help),
            "authcap" => {
                if args.len() != 3 {
                    return Err(Error::Usage);
                }
                Ok(Self::AuthCap {
                    channel: parse_u8(args[1])?,
                    privilege: PrivilegeLevel::from_u8(parse_u8(args[2])?),
                })
            }
            "getaccess" => {
                if args.len() < 2 || args.len() > 3 {
                    return Err(Error::Usage);
                }
                let user_id = if args.len() == 3 {
                    parse_u8(args[2])?
                } else {
                    0
                };
                Ok(Self::GetAccess {
                    channel: parse_u8(args[1])?,
                    user_id,
                })
            }
            "setaccess" => Ok(Self::SetAccess { args: &args[1..] }),
            "info" => {
                if args.len() > 2 {
                    return Err(Error::Usage);
                }
                let channel = if args.len() == 2 {
                    parse_u8(args[1])?
                } else {
                    CURRENT_CHANNEL
                };
                Ok(Self::Info { channel })
            }
            other => Err(Error::InvalidCommand(other.to_string())),
        }
    }
}

/// Dispatch a channel subcommand.
///
/// `args` starts at the subcommand token. Reports go to `out`; failures are
/// returned as typed errors so the embedding binary can map them to an exit
/// status.
pub fn run(transport: &mut dyn Transport, out: &mut dyn Write, args: &[&str]) -> Result<()> {
    let command = match ChannelCommand::parse(args) {
        Ok(command) => command,
        Err(err) => {
            if let Error::InvalidCommand(token) = &err {
                writeln!(out, "Invalid CHANNEL command: {token}")?;
            }
            print_usage(out)?;
            return Err(err);
        }
    };

    match command {
        ChannelCommand::Help => {
            print_usage(out)?;
            Ok(())
        }
        ChannelCommand::AuthCap { channel, privilege } => {
            channel::auth_capabilities(transport, out, channel, privilege)
        }
        ChannelCommand::GetAccess { channel, user_id } => {
            user::user_access(transport, out, channel, user_id)
        }
        ChannelCommand::SetAccess { args } => user::set_user_access(transport, out, args),
        ChannelCommand::Info { channel } => channel::channel_info(transport, out, channel),
    }
}

/// Write the channel command usage summary.
pub fn print_usage(out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "Channel Commands: authcap   <channel number> <max privilege>"
    )?;
    writeln!(
        out,
        "                  getaccess <channel number> [user id]"
    )?;
    writeln!(
        out,
        "                  setaccess <channel number> <user id> \
         [callin=on|off] [ipmi=on|off] [link=on|off] [privilege=level]"
    )?;
    writeln!(out, "                  info      [channel number]")?;
    writeln!(out)?;
    writeln!(out, "Possible privilege levels are:")?;
    writeln!(out, "   1   Callback level")?;
    writeln!(out, "   2   User level")?;
    writeln!(out, "   3   Operator level")?;
    writeln!(out, "   4   Administrator level")?;
    writeln!(out, "   5   OEM Proprietary level")?;
    writeln!(out, "  15   No access")?;
    Ok(())
}

/// Parse a decimal or `0x`-prefixed hex byte argument.
pub(crate) fn parse_u8(s: &str) -> Result<u8> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16)
    } else {
        s.parse::<u8>()
    };
    parsed.map_err(|_| Error::InvalidArgument("expected a byte value"))
}
