use core::fmt;

/// An IPMI privilege level.
///
/// Values outside the enumerated tiers are preserved rather than rejected;
/// the BMC is the authority on which limits a channel accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeLevel {
    /// Callback privilege.
    Callback,
    /// User privilege.
    User,
    /// Operator privilege.
    Operator,
    /// Administrator privilege.
    Administrator,
    /// OEM-defined privilege.
    Oem,
    /// No access.
    NoAccess,
    /// A value outside the enumerated tiers.
    Unknown(u8),
}

impl PrivilegeLevel {
    /// Map a raw privilege value to a level, preserving unknown values.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x01 => Self::Callback,
            0x02 => Self::User,
            0x03 => Self::Operator,
            0x04 => Self::Administrator,
            0x05 => Self::Oem,
            0x0F => Self::NoAccess,
            other => Self::Unknown(other),
        }
    }

    pub(crate) fn as_u8(self) -> u8 {
        match self {
            Self::Callback => 0x01,
            Self::User => 0x02,
            Self::Operator => 0x03,
            Self::Administrator => 0x04,
            Self::Oem => 0x05,
            Self::NoAccess => 0x0F,
            Self::Unknown(value) => value,
        }
    }
}

impl fmt::Display for PrivilegeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback => f.write_str("CALLBACK"),
            Self::User => f.write_str("USER"),
            Self::Operator => f.write_str("OPERATOR"),
            Self::Administrator => f.write_str("ADMINISTRATOR"),
            Self::Oem => f.write_str("OEM"),
            Self::NoAccess => f.write_str("NO ACCESS"),
            Self::Unknown(value) => write!(f, "Unknown (0x{value:02x})"),
        }
    }
}

/// A raw IPMI response.
#[derive(Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// IPMI completion code.
    pub completion_code: u8,
    /// Payload bytes after the completion code.
    pub data: Vec<u8>,
}

impl fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawResponse")
            .field(
                "completion_code",
                &format_args!("{:#04x}", self.completion_code),
            )
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Parsed response for `Get Channel Authentication Capabilities`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelAuthCapabilities {
    /// Channel number the capabilities describe.
    pub channel_number: u8,
    /// Indicates IPMI v2.0 data is present in the response.
    pub v20_data_available: bool,
    /// IPMI v1.5 enabled authentication types (bitmask).
    pub enabled_auth_types: u8,
    /// Non-zero Kg key configured (two-key login). Only meaningful when
    /// `v20_data_available` is set.
    pub kg_status: bool,
    /// Per-message authentication status.
    pub per_message_auth: bool,
    /// User-level authentication status.
    pub user_level_auth: bool,
    /// One or more non-null user names exist.
    pub non_null_usernames: bool,
    /// One or more null user names with non-null passwords exist.
    pub null_usernames: bool,
    /// Anonymous login (null user/null password) is enabled.
    pub anon_login_enabled: bool,
    /// Channel supports IPMI v1.5. Only meaningful when `v20_data_available`
    /// is set.
    pub ipmiv15_support: bool,
    /// Channel supports IPMI v2.0. Only meaningful when `v20_data_available`
    /// is set.
    pub ipmiv20_support: bool,
    /// OEM IANA enterprise number, present when an OEM auth type is enabled.
    pub oem_id: Option<u32>,
    /// OEM auxiliary data, present when an OEM auth type is enabled.
    pub oem_aux_data: Option<u8>,
}

/// Channel medium reported by `Get Channel Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMedium {
    /// Reserved medium value 0.
    Reserved,
    /// IPMB (I2C).
    Ipmb,
    /// ICMB v1.0.
    IcmbV10,
    /// ICMB v0.9.
    IcmbV09,
    /// 802.3 LAN.
    Lan,
    /// Serial/modem.
    SerialModem,
    /// Other LAN.
    OtherLan,
    /// PCI SMBus.
    PciSmbus,
    /// SMBus v1.0/1.1.
    SmbusV1,
    /// SMBus v2.0.
    SmbusV2,
    /// USB 1.x.
    Usb1,
    /// USB 2.x.
    Usb2,
    /// System interface (KCS, SMIC, or BT).
    SystemInterface,
    /// A medium outside the defined table.
    Unknown(u8),
}

impl ChannelMedium {
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0x00 => Self::Reserved,
            0x01 => Self::Ipmb,
            0x02 => Self::IcmbV10,
            0x03 => Self::IcmbV09,
            0x04 => Self::Lan,
            0x05 => Self::SerialModem,
            0x06 => Self::OtherLan,
            0x07 => Self::PciSmbus,
            0x08 => Self::SmbusV1,
            0x09 => Self::SmbusV2,
            0x0A => Self::Usb1,
            0x0B => Self::Usb2,
            0x0C => Self::SystemInterface,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for ChannelMedium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reserved => f.write_str("reserved"),
            Self::Ipmb => f.write_str("IPMB (I2C)"),
            Self::IcmbV10 => f.write_str("ICMB v1.0"),
            Self::IcmbV09 => f.write_str("ICMB v0.9"),
            Self::Lan => f.write_str("802.3 LAN"),
            Self::SerialModem => f.write_str("Serial/Modem"),
            Self::OtherLan => f.write_str("Other LAN"),
            Self::PciSmbus => f.write_str("PCI SMBus"),
            Self::SmbusV1 => f.write_str("SMBus v1.0/1.1"),
            Self::SmbusV2 => f.write_str("SMBus v2.0"),
            Self::Usb1 => f.write_str("USB 1.x"),
            Self::Usb2 => f.write_str("USB 2.x"),
            Self::SystemInterface => f.write_str("System Interface"),
            Self::Unknown(value) => write!(f, "Unknown (0x{value:02x})"),
        }
    }
}

/// Channel protocol reported by `Get Channel Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelProtocol {
    /// Reserved protocol value.
    Reserved(u8),
    /// IPMB-1.0.
    Ipmb,
    /// ICMB-1.0.
    Icmb,
    /// IPMI over SMBus.
    IpmiSmbus,
    /// Keyboard controller style.
    Kcs,
    /// Server management interface chip.
    Smic,
    /// Block transfer, v1.0.
    Bt10,
    /// Block transfer, v1.5.
    Bt15,
    /// Terminal mode.
    TMode,
    /// OEM protocol 1.
    Oem1,
    /// OEM protocol 2.
    Oem2,
    /// OEM protocol 3.
    Oem3,
    /// OEM protocol 4.
    Oem4,
    /// A protocol outside the defined table.
    Unknown(u8),
}

impl ChannelProtocol {
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0x00 | 0x03 => Self::Reserved(value),
            0x01 => Self::Ipmb,
            0x02 => Self::Icmb,
            0x04 => Self::IpmiSmbus,
            0x05 => Self::Kcs,
            0x06 => Self::Smic,
            0x07 => Self::Bt10,
            0x08 => Self::Bt15,
            0x09 => Self::TMode,
            0x1C => Self::Oem1,
            0x1D => Self::Oem2,
            0x1E => Self::Oem3,
            0x1F => Self::Oem4,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for ChannelProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reserved(_) => f.write_str("reserved"),
            Self::Ipmb => f.write_str("IPMB-1.0"),
            Self::Icmb => f.write_str("ICMB-1.0"),
            Self::IpmiSmbus => f.write_str("IPMI-SMBus"),
            Self::Kcs => f.write_str("KCS"),
            Self::Smic => f.write_str("SMIC"),
            Self::Bt10 => f.write_str("BT-10"),
            Self::Bt15 => f.write_str("BT-15"),
            Self::TMode => f.write_str("TMode"),
            Self::Oem1 => f.write_str("OEM 1"),
            Self::Oem2 => f.write_str("OEM 2"),
            Self::Oem3 => f.write_str("OEM 3"),
            Self::Oem4 => f.write_str("OEM 4"),
            Self::Unknown(value) => write!(f, "Unknown (0x{value:02x})"),
        }
    }
}

/// Session support classification from `Get Channel Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSupport {
    /// The channel never carries sessions.
    Sessionless,
    /// The channel carries at most one session.
    SingleSession,
    /// The channel carries multiple simultaneous sessions.
    MultiSession,
    /// Session-based operation (catch-all for every other encoding).
    SessionBased,
}

impl SessionSupport {
    /// Classify the raw session-support byte.
    ///
    /// Only the exact encodings 0x00/0x40/0x80 name a specific mode; every
    /// other value, 0xC0 included, reports as session-based.
    pub fn classify(byte: u8) -> Self {
        match byte {
            0x00 => Self::Sessionless,
            0x40 => Self::SingleSession,
            0x80 => Self::MultiSession,
            _ => Self::SessionBased,
        }
    }
}

impl fmt::Display for SessionSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sessionless => f.write_str("session-less"),
            Self::SingleSession => f.write_str("single-session"),
            Self::MultiSession => f.write_str("multi-session"),
            Self::SessionBased => f.write_str("session-based"),
        }
    }
}

/// Parsed response for `Get Channel Info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    /// Actual channel number (resolves the 0xE "this channel" sentinel).
    pub channel_number: u8,
    /// Medium the channel runs over.
    pub channel_medium: ChannelMedium,
    /// Messaging protocol spoken on the channel.
    pub channel_protocol: ChannelProtocol,
    /// Session support classification.
    pub session_support: SessionSupport,
    /// Number of sessions currently active on the channel.
    pub active_sessions: u8,
    /// Protocol vendor IANA number (24-bit, least-significant byte first).
    pub vendor_id: u32,
}

/// Access mode of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Channel disabled.
    Disabled,
    /// Available only before the system boots.
    PrebootOnly,
    /// Always available.
    AlwaysAvailable,
    /// Shared between pre-boot and runtime use.
    Shared,
    /// A mode outside the defined encodings.
    Unknown(u8),
}

impl AccessMode {
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Disabled,
            1 => Self::PrebootOnly,
            2 => Self::AlwaysAvailable,
            3 => Self::Shared,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("disabled"),
            Self::PrebootOnly => f.write_str("pre-boot only"),
            Self::AlwaysAvailable => f.write_str("always available"),
            Self::Shared => f.write_str("shared"),
            Self::Unknown(_) => f.write_str("unknown"),
        }
    }
}

/// Which stored variant of the channel access settings to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessSelector {
    /// Volatile settings currently in effect.
    Active,
    /// Settings that survive a controller reset.
    NonVolatile,
}

impl AccessSelector {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            Self::Active => 0x80,
            Self::NonVolatile => 0x40,
        }
    }

    /// Section heading used when reporting this variant.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Volatile(active) Settings",
            Self::NonVolatile => "Non-Volatile Settings",
        }
    }
}

/// Parsed response for `Get Channel Access`.
///
/// The three boolean flags use inverted polarity on the wire: a set bit
/// means the facility is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelAccess {
    /// Raw alerting bit; set when alerting is disabled.
    pub alerting: bool,
    /// Raw per-message authentication bit; set when it is disabled.
    pub per_message_auth: bool,
    /// Raw user-level authentication bit; set when it is disabled.
    pub user_level_auth: bool,
    /// Channel access mode.
    pub access_mode: AccessMode,
}

/// Parsed response for `Get User Access`.
///
/// `max_user_ids` and `enabled_user_ids` describe the whole user table and
/// are only authoritative on the first record fetched in an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAccess {
    /// Highest user ID the controller supports.
    pub max_user_ids: u8,
    /// Number of user IDs currently enabled.
    pub enabled_user_ids: u8,
    /// User IDs at or below this threshold have fixed names.
    pub fixed_user_ids: u8,
    /// Set when the user may connect only during callback.
    pub callin_callback: bool,
    /// Link authentication enabled for this user.
    pub link_auth: bool,
    /// IPMI messaging enabled for this user.
    pub ipmi_messaging: bool,
    /// Privilege ceiling for this user on the queried channel.
    pub privilege_limit: PrivilegeLevel,
}
