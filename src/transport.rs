use std::time::Instant;

use crate::commands::Command;
use crate::error::Result;
use crate::types::{PrivilegeLevel, RawResponse};

/// A synchronous exchange with a managed controller over an established
/// session.
///
/// Session setup, authentication, timeouts, and retransmission all live
/// behind this trait; the command layer only sees one blocking round trip
/// per request. Implementations hand back the completion code and payload
/// of the matched response.
pub trait Transport {
    /// Send one request and block until its response or a transport failure.
    fn send_recv(&mut self, netfn: u8, cmd: u8, data: &[u8]) -> Result<RawResponse>;

    /// Change the privilege level of the active session.
    ///
    /// User-access commands require administrator privilege; the command
    /// layer raises the session before issuing them.
    fn set_privilege_level(&mut self, level: PrivilegeLevel) -> Result<()>;
}

/// Execute a typed command against `transport` and parse its response.
pub fn execute<C: Command>(transport: &mut dyn Transport, command: &C) -> Result<C::Output> {
    let request_data = command.request_data();
    crate::debug::dump_hex("request", C::NETFN, C::CMD, &request_data);

    let start = Instant::now();
    let result = transport.send_recv(C::NETFN, C::CMD, &request_data);
    let elapsed = start.elapsed();

    match &result {
        Ok(response) => {
            crate::debug::dump_hex("response", C::NETFN, C::CMD, &response.data);
            crate::observe::record_ok(C::NETFN, C::CMD, elapsed, response.completion_code);
        }
        Err(err) => crate::observe::record_err(C::NETFN, C::CMD, elapsed, err),
    }

    command.parse_response(result?)
}
