//! Typed channel commands and their fixed-layout codecs.
//!
//! Requests are encoded as explicit byte vectors and responses decoded with
//! masked shifts over the payload; nothing here relies on in-memory struct
//! layout or host byte order.

use crate::error::{Error, Result};
use crate::types::{
    AccessMode, AccessSelector, ChannelAccess, ChannelAuthCapabilities, ChannelInfo,
    ChannelMedium, ChannelProtocol, PrivilegeLevel, RawResponse, SessionSupport, UserAccess,
};

/// A typed IPMI command (single request/response).
pub trait Command {
    /// Parsed output type.
    type Output;

    /// Network Function (NetFn) for the request.
    const NETFN: u8;

    /// Command number.
    const CMD: u8;

    /// Encode request payload bytes (excluding NetFn/Cmd framing).
    fn request_data(&self) -> Vec<u8>;

    /// Parse a raw response into the typed output.
    fn parse_response(&self, response: RawResponse) -> Result<Self::Output>;
}

/// Application NetFn carrying the whole channel command family.
pub(crate) const NETFN_APP: u8 = 0x06;

fn ok_data(response: &RawResponse) -> Result<&[u8]> {
    if response.completion_code != 0x00 {
        return Err(Error::Device {
            completion_code: response.completion_code,
        });
    }
    Ok(&response.data)
}

fn check_len(command: &'static str, data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::ShortResponse {
            command,
            len: data.len(),
            min,
        });
    }
    Ok(())
}

fn u24_le(bytes: &[u8]) -> u32 {
    u32::from(bytes[0]) | (u32::from(bytes[1]) << 8) | (u32::from(bytes[2]) << 16)
}

/// `Get Channel Authentication Capabilities` (App NetFn, cmd 0x38).
#[derive(Debug, Clone, Copy)]
pub struct GetChannelAuthCapabilities {
    /// Channel number (low nibble).
    pub channel: u8,
    /// Privilege to query.
    pub privilege: PrivilegeLevel,
    /// Request that IPMI v2.0 data be included when available.
    pub request_v2_data: bool,
}

impl GetChannelAuthCapabilities {
    /// Create a query that requests IPMI v2.0 data (when supported).
    pub fn new(channel: u8, privilege: PrivilegeLevel) -> Self {
        Self {
            channel,
            privilege,
            request_v2_data: true,
        }
    }

    /// Return a variant that does not request IPMI v2.0 data.
    pub fn without_v2_data(self) -> Self {
        Self {
            request_v2_data: false,
            ..self
        }
    }
}

impl Command for GetChannelAuthCapabilities {
    type Output = ChannelAuthCapabilities;
    const NETFN: u8 = NETFN_APP;
    const CMD: u8 = 0x38;

    fn request_data(&self) -> Vec<u8> {
        let channel = if self.request_v2_data {
            (self.channel & 0x0F) | 0x80
        } else {
            self.channel & 0x0F
        };
        vec![channel, self.privilege.as_u8() & 0x0F]
    }

    fn parse_response(&self, response: RawResponse) -> Result<Self::Output> {
        parse_channel_auth_capabilities(ok_data(&response)?)
    }
}

/// `Get Channel Info` (App NetFn, cmd 0x42).
#[derive(Debug, Clone, Copy)]
pub struct GetChannelInfo {
    /// Channel number (low nibble); 0xE queries the issuing channel.
    pub channel: u8,
}

impl Command for GetChannelInfo {
    type Output = ChannelInfo;
    const NETFN: u8 = NETFN_APP;
    const CMD: u8 = 0x42;

    fn request_data(&self) -> Vec<u8> {
        vec![self.channel & 0x0F]
    }

    fn parse_response(&self, response: RawResponse) -> Result<Self::Output> {
        parse_channel_info(ok_data(&response)?)
    }
}

/// `Get Channel Access` (App NetFn, cmd 0x41).
#[derive(Debug, Clone, Copy)]
pub struct GetChannelAccess {
    /// Channel number (low nibble).
    pub channel: u8,
    /// Which stored settings variant to read.
    pub selector: AccessSelector,
}

impl Command for GetChannelAccess {
    type Output = ChannelAccess;
    const NETFN: u8 = NETFN_APP;
    const CMD: u8 = 0x41;

    fn request_data(&self) -> Vec<u8> {
        vec![self.channel & 0x0F, self.selector.as_u8()]
    }

    fn parse_response(&self, response: RawResponse) -> Result<Self::Output> {
        parse_channel_access(ok_data(&response)?)
    }
}

/// `Get User Access` (App NetFn, cmd 0x44).
#[derive(Debug, Clone, Copy)]
pub struct GetUserAccess {
    /// Channel number (low nibble).
    pub channel: u8,
    /// User ID (low six bits).
    pub user_id: u8,
}

impl Command for GetUserAccess {
    type Output = UserAccess;
    const NETFN: u8 = NETFN_APP;
    const CMD: u8 = 0x44;

    fn request_data(&self) -> Vec<u8> {
        vec![self.channel & 0x0F, self.user_id & 0x3F]
    }

    fn parse_response(&self, response: RawResponse) -> Result<Self::Output> {
        parse_user_access(ok_data(&response)?)
    }
}

/// `Get User Name` (App NetFn, cmd 0x46).
#[derive(Debug, Clone, Copy)]
pub struct GetUserName {
    /// User ID (low six bits).
    pub user_id: u8,
}

impl Command for GetUserName {
    type Output = String;
    const NETFN: u8 = NETFN_APP;
    const CMD: u8 = 0x46;

    fn request_data(&self) -> Vec<u8> {
        vec![self.user_id & 0x3F]
    }

    fn parse_response(&self, response: RawResponse) -> Result<Self::Output> {
        parse_user_name(ok_data(&response)?)
    }
}

/// `Set User Access` (App NetFn, cmd 0x43).
///
/// The request always carries the change-bits flag, so every field below is
/// applied, and leaves the user's session limit untouched.
#[derive(Debug, Clone, Copy)]
pub struct SetUserAccess {
    /// Channel number (low nibble).
    pub channel: u8,
    /// User ID (low six bits).
    pub user_id: u8,
    /// Restrict the user to callback connections.
    pub callin_callback: bool,
    /// Enable link authentication.
    pub link_auth: bool,
    /// Enable IPMI messaging.
    pub ipmi_messaging: bool,
    /// Privilege ceiling to apply.
    pub privilege_limit: PrivilegeLevel,
}

impl SetUserAccess {
    /// Build a request that reproduces `baseline` unchanged.
    pub fn from_baseline(channel: u8, user_id: u8, baseline: &UserAccess) -> Self {
        Self {
            channel,
            user_id,
            callin_callback: baseline.callin_callback,
            link_auth: baseline.link_auth,
            ipmi_messaging: baseline.ipmi_messaging,
            privilege_limit: baseline.privilege_limit,
        }
    }
}

impl Command for SetUserAccess {
    type Output = ();
    const NETFN: u8 = NETFN_APP;
    const CMD: u8 = 0x43;

    fn request_data(&self) -> Vec<u8> {
        let mut flags = self.channel & 0x0F;
        if self.ipmi_messaging {
            flags |= 0x10;
        }
        if self.link_auth {
            flags |= 0x20;
        }
        if self.callin_callback {
            flags |= 0x40;
        }
        // Bit 7: apply the enable flags above rather than leaving them as-is.
        flags |= 0x80;

        // Session limit byte stays zero: no change to the user's session cap.
        vec![
            flags,
            self.user_id & 0x3F,
            self.privilege_limit.as_u8() & 0x0F,
            0x00,
        ]
    }

    fn parse_response(&self, response: RawResponse) -> Result<Self::Output> {
        let _ = ok_data(&response)?;
        Ok(())
    }
}

pub(crate) fn parse_channel_auth_capabilities(data: &[u8]) -> Result<ChannelAuthCapabilities> {
    check_len("Get Channel Authentication Capabilities", data, 8)?;

    let channel_number = data[0] & 0x0F;
    let enabled_auth_types = data[1] & 0x3F;
    let v20_data_available = data[1] & 0x80 != 0;

    let anon_login_enabled = data[2] & 0x01 != 0;
    let null_usernames = data[2] & 0x02 != 0;
    let non_null_usernames = data[2] & 0x04 != 0;
    let user_level_auth = data[2] & 0x08 != 0;
    let per_message_auth = data[2] & 0x10 != 0;
    let kg_status = data[2] & 0x20 != 0;

    let ipmiv15_support = data[3] & 0x01 != 0;
    let ipmiv20_support = data[3] & 0x02 != 0;

    let has_oem = enabled_auth_types & crate::strings::AUTH_TYPE_OEM != 0;
    let (oem_id, oem_aux_data) = if has_oem {
        (Some(u24_le(&data[4..7])), Some(data[7]))
    } else {
        (None, None)
    };

    Ok(ChannelAuthCapabilities {
        channel_number,
        v20_data_available,
        enabled_auth_types,
        kg_status,
        per_message_auth,
        user_level_auth,
        non_null_usernames,
        null_usernames,
        anon_login_enabled,
        ipmiv15_support,
        ipmiv20_support,
        oem_id,
        oem_aux_data,
    })
}

pub(crate) fn parse_channel_info(data: &[u8]) -> Result<ChannelInfo> {
    check_len("Get Channel Info", data, 7)?;

    Ok(ChannelInfo {
        channel_number: data[0] & 0x0F,
        channel_medium: ChannelMedium::from_u8(data[1] & 0x7F),
        channel_protocol: ChannelProtocol::from_u8(data[2] & 0x1F),
        session_support: SessionSupport::classify(data[3]),
        active_sessions: data[3] & 0x3F,
        vendor_id: u24_le(&data[4..7]),
    })
}

pub(crate) fn parse_channel_access(data: &[u8]) -> Result<ChannelAccess> {
    check_len("Get Channel Access", data, 2)?;

    Ok(ChannelAccess {
        access_mode: AccessMode::from_u8(data[0] & 0x07),
        user_level_auth: data[0] & 0x08 != 0,
        per_message_auth: data[0] & 0x10 != 0,
        alerting: data[0] & 0x20 != 0,
    })
}

pub(crate) fn parse_user_access(data: &[u8]) -> Result<UserAccess> {
    check_len("Get User Access", data, 4)?;

    Ok(UserAccess {
        max_user_ids: data[0] & 0x3F,
        enabled_user_ids: data[1] & 0x3F,
        fixed_user_ids: data[2] & 0x3F,
        privilege_limit: PrivilegeLevel::from_u8(data[3] & 0x0F),
        ipmi_messaging: data[3] & 0x10 != 0,
        link_auth: data[3] & 0x20 != 0,
        callin_callback: data[3] & 0x40 != 0,
    })
}

pub(crate) fn parse_user_name(data: &[u8]) -> Result<String> {
    // Fixed 16-byte field, NUL padded; tolerate shorter responses.
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    Ok(String::from_utf8_lossy(&data[..end]).into_owned())
}
