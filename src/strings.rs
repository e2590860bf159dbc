//! Name tables for decoded protocol values.

/// IPMI v1.5 authentication type bits, in display order.
pub(crate) const AUTH_TYPES: [(u8, &str); 5] = [
    (0x01, "NONE"),
    (0x02, "MD2"),
    (0x04, "MD5"),
    (0x10, "PASSWORD"),
    (0x20, "OEM"),
];

/// Bit in the enabled-auth-types mask signalling an OEM-defined mechanism.
pub(crate) const AUTH_TYPE_OEM: u8 = 0x20;

/// Build a human-readable list of the v1.5 auth types enabled in `mask`.
///
/// Names appear in table order (not bit order), separated by single spaces.
/// A fresh string is returned on every call.
pub(crate) fn auth_type_list(mask: u8) -> String {
    let mut list = String::new();
    for (bit, name) in AUTH_TYPES {
        if mask & bit != 0 {
            if !list.is_empty() {
                list.push(' ');
            }
            list.push_str(name);
        }
    }
    list
}

/// Describe an IPMI completion code.
///
/// Returns `None` for codes outside the generic table; OEM and
/// command-specific codes are rendered as their raw value by the caller.
pub(crate) fn completion_code_desc(code: u8) -> Option<&'static str> {
    let desc = match code {
        0x00 => "Command completed normally",
        0xC0 => "Node busy",
        0xC1 => "Invalid command",
        0xC2 => "Invalid command on LUN",
        0xC3 => "Timeout",
        0xC4 => "Out of space",
        0xC5 => "Reservation cancelled or invalid",
        0xC6 => "Request data truncated",
        0xC7 => "Request data length invalid",
        0xC8 => "Request data field length limit exceeded",
        0xC9 => "Parameter out of range",
        0xCA => "Cannot return number of requested data bytes",
        0xCB => "Requested sensor, data, or record not found",
        0xCC => "Invalid data field in request",
        0xCD => "Command illegal for specified sensor or record type",
        0xCE => "Command response could not be provided",
        0xCF => "Cannot execute duplicated request",
        0xD0 => "SDR Repository in update mode",
        0xD1 => "Device firmware in update mode",
        0xD2 => "BMC initialization in progress",
        0xD3 => "Destination unavailable",
        0xD4 => "Insufficient privilege level",
        0xD5 => "Command not supported in present state",
        0xD6 => "Cannot execute command, command disabled",
        0xFF => "Unspecified error",
        _ => return None,
    };
    Some(desc)
}
