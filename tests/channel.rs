use std::collections::VecDeque;

use ipmi_channel::{Error, PrivilegeLevel, RawResponse, Result, Transport, run};

enum Reply {
    Data(u8, Vec<u8>),
    Timeout,
}

/// Transport double that replays canned replies and records every request.
struct ScriptedTransport {
    replies: VecDeque<Reply>,
    requests: Vec<(u8, u8, Vec<u8>)>,
    privilege_changes: Vec<PrivilegeLevel>,
}

impl ScriptedTransport {
    fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: replies.into(),
            requests: Vec::new(),
            privilege_changes: Vec::new(),
        }
    }

    fn commands_sent(&self) -> Vec<u8> {
        self.requests.iter().map(|(_, cmd, _)| *cmd).collect()
    }
}

impl Transport for ScriptedTransport {
    fn send_recv(&mut self, netfn: u8, cmd: u8, data: &[u8]) -> Result<RawResponse> {
        self.requests.push((netfn, cmd, data.to_vec()));
        match self.replies.pop_front() {
            Some(Reply::Data(completion_code, data)) => Ok(RawResponse {
                completion_code,
                data,
            }),
            Some(Reply::Timeout) => Err(Error::Timeout),
            None => panic!("unexpected request: netfn {netfn:#04x} cmd {cmd:#04x}"),
        }
    }

    fn set_privilege_level(&mut self, level: PrivilegeLevel) -> Result<()> {
        self.privilege_changes.push(level);
        Ok(())
    }
}

fn ok(data: &[u8]) -> Reply {
    Reply::Data(0x00, data.to_vec())
}

fn device_error(completion_code: u8) -> Reply {
    Reply::Data(completion_code, Vec::new())
}

fn user_name(name: &str) -> Reply {
    let mut data = vec![0u8; 16];
    data[..name.len()].copy_from_slice(name.as_bytes());
    ok(&data)
}

fn run_command(
    replies: Vec<Reply>,
    args: &[&str],
) -> (ScriptedTransport, String, Result<()>) {
    let mut transport = ScriptedTransport::new(replies);
    let mut out = Vec::new();
    let result = run(&mut transport, &mut out, args);
    (transport, String::from_utf8(out).expect("utf8 output"), result)
}

#[test]
fn authcap_retries_once_without_v2_bit() {
    let auth_data = [0x02, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    let (transport, output, result) = run_command(
        vec![device_error(0xD4), ok(&auth_data)],
        &["authcap", "2", "4"],
    );

    result.expect("fallback should succeed");
    assert_eq!(transport.commands_sent(), vec![0x38, 0x38]);
    assert_eq!(transport.requests[0].2, vec![0x82, 0x04]);
    assert_eq!(transport.requests[1].2, vec![0x02, 0x04]);
    assert!(output.contains("IPMI v1.5  auth types      : MD5 PASSWORD"));
}

#[test]
fn authcap_gives_up_after_single_retry() {
    let (transport, _output, result) = run_command(
        vec![Reply::Timeout, device_error(0xC1)],
        &["authcap", "1", "4"],
    );

    let err = result.expect_err("both attempts failed");
    assert!(matches!(
        err,
        Error::Device {
            completion_code: 0xC1
        }
    ));
    assert_eq!(transport.requests.len(), 2);
}

#[test]
fn authcap_without_v2_data_lists_types_and_oem_only() {
    // NONE and OEM enabled, no v2.0 data in the response.
    let auth_data = [0x01, 0x21, 0x00, 0x00, 0x33, 0x22, 0x11, 0x77];
    let (_transport, output, result) = run_command(vec![ok(&auth_data)], &["authcap", "1", "4"]);

    result.expect("authcap");
    assert!(output.contains("IPMI v1.5  auth types      : NONE OEM"));
    assert!(output.contains("IANA Number for OEM        : 1122867"));
    assert!(output.contains("OEM Auxiliary Data         : 0x77"));
    assert!(!output.contains("KG status"));
    assert!(!output.contains("Channel supports IPMI v1.5"));
    assert!(!output.contains("Channel supports IPMI v2.0"));
}

#[test]
fn authcap_v2_fields_gated_by_availability() {
    // v2.0 data available, KG nonzero, both versions supported, no OEM bit.
    let auth_data = [0x01, 0x94, 0x20, 0x03, 0x00, 0x00, 0x00, 0x00];
    let (_transport, output, result) = run_command(vec![ok(&auth_data)], &["authcap", "1", "4"]);

    result.expect("authcap");
    assert!(output.contains("KG status                  : non-zero"));
    assert!(output.contains("Channel supports IPMI v1.5 : yes"));
    assert!(output.contains("Channel supports IPMI v2.0 : yes"));
    assert!(!output.contains("IANA Number for OEM"));
}

#[test]
fn info_defaults_to_current_channel_sentinel() {
    let info_data = [0x01, 0x04, 0x01, 0x80, 0xF2, 0x1B, 0x00];
    let (transport, output, result) = run_command(
        vec![ok(&info_data), ok(&[0x3B, 0x04]), ok(&[0x02, 0x04])],
        &["info"],
    );

    result.expect("info");
    assert_eq!(transport.commands_sent(), vec![0x42, 0x41, 0x41]);
    assert_eq!(transport.requests[0].2, vec![0x0E]);
    assert_eq!(transport.requests[1].2, vec![0x0E, 0x80]);
    assert_eq!(transport.requests[2].2, vec![0x0E, 0x40]);

    assert!(output.contains("Channel 0x1 info:"));
    assert!(output.contains("Channel Medium Type   : 802.3 LAN"));
    assert!(output.contains("Session Support       : multi-session"));
    assert!(output.contains("Protocol Vendor ID    : 7154"));
    assert!(output.contains("Volatile(active) Settings"));
    assert!(output.contains("Non-Volatile Settings"));

    // Disable bits set on the volatile variant, clear on the non-volatile one.
    assert_eq!(output.matches("Alerting            : disabled").count(), 1);
    assert_eq!(output.matches("Alerting            : enabled").count(), 1);
    assert_eq!(output.matches("Per-message Auth    : disabled").count(), 1);
    assert_eq!(output.matches("User Level Auth     : disabled").count(), 1);
    assert_eq!(output.matches("Access Mode         : shared").count(), 1);
    assert_eq!(
        output.matches("Access Mode         : always available").count(),
        1
    );
}

#[test]
fn info_aborts_when_access_query_fails() {
    let info_data = [0x01, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00];
    let (transport, output, result) =
        run_command(vec![ok(&info_data), device_error(0xD4)], &["info", "1"]);

    let err = result.expect_err("access query failed");
    assert!(matches!(
        err,
        Error::Device {
            completion_code: 0xD4
        }
    ));
    // The second access variant is never requested; earlier output stands.
    assert_eq!(transport.commands_sent(), vec![0x42, 0x41]);
    assert!(output.contains("Channel 0x1 info:"));
    assert!(output.contains("Session Support       : session-less"));
}

#[test]
fn getaccess_enumerates_ids_up_to_first_reported_max() {
    let mut replies = Vec::new();
    // Later responses advertise a smaller table; only the first one counts.
    replies.push(ok(&[0x05, 0x03, 0x02, 0x54]));
    replies.push(user_name("root"));
    for _ in 2..=5 {
        replies.push(ok(&[0x02, 0x03, 0x02, 0x04]));
        replies.push(user_name("user"));
    }

    let (transport, output, result) = run_command(replies, &["getaccess", "1"]);

    result.expect("getaccess");
    assert_eq!(transport.privilege_changes, vec![PrivilegeLevel::Administrator]);
    assert_eq!(
        transport.commands_sent(),
        vec![0x44, 0x46, 0x44, 0x46, 0x44, 0x46, 0x44, 0x46, 0x44, 0x46]
    );
    // Access requests walk ids 1..=5 in order; name requests follow suit.
    for (i, id) in (1u8..=5).enumerate() {
        assert_eq!(transport.requests[i * 2].2, vec![0x01, id]);
        assert_eq!(transport.requests[i * 2 + 1].2, vec![id]);
    }

    assert_eq!(output.matches("Maximum User IDs     : 5").count(), 1);
    assert_eq!(output.matches("Enabled User IDs     : 3").count(), 1);
    assert_eq!(output.matches("User ID              :").count(), 5);
    assert!(output.contains("User Name            : root"));
    // Id 1 falls inside the fixed-name threshold, id 3 does not.
    assert_eq!(output.matches("Fixed Name           : Yes").count(), 2);
    assert!(output.contains("Access Available     : callback"));
    assert!(output.contains("Access Available     : call-in / callback"));
    assert!(output.contains("Privilege Level      : ADMINISTRATOR"));
}

#[test]
fn getaccess_with_explicit_id_fetches_exactly_one_pair() {
    let (transport, output, result) = run_command(
        vec![ok(&[0x05, 0x03, 0x00, 0x02]), user_name("guest")],
        &["getaccess", "1", "3"],
    );

    result.expect("getaccess");
    assert_eq!(transport.commands_sent(), vec![0x44, 0x46]);
    assert_eq!(transport.requests[0].2, vec![0x01, 0x03]);
    assert_eq!(transport.requests[1].2, vec![0x03]);
    assert!(output.contains("User ID              : 3"));
    assert!(output.contains("User Name            : guest"));
    assert!(output.contains("Privilege Level      : USER"));
}

#[test]
fn getaccess_aborts_on_mid_enumeration_failure() {
    let replies = vec![
        ok(&[0x03, 0x02, 0x00, 0x04]),
        user_name("root"),
        device_error(0xCB),
    ];
    let (transport, output, result) = run_command(replies, &["getaccess", "1"]);

    let err = result.expect_err("second id failed");
    assert!(matches!(
        err,
        Error::Device {
            completion_code: 0xCB
        }
    ));
    assert_eq!(transport.commands_sent(), vec![0x44, 0x46, 0x44]);
    assert!(output.contains("User Name            : root"));
}

#[test]
fn setaccess_without_options_is_a_pure_passthrough() {
    let (transport, _output, result) = run_command(
        vec![ok(&[0x0A, 0x43, 0x01, 0x54]), ok(&[])],
        &["setaccess", "2", "3"],
    );

    result.expect("setaccess");
    assert_eq!(transport.privilege_changes, vec![PrivilegeLevel::Administrator]);
    assert_eq!(transport.commands_sent(), vec![0x44, 0x43]);
    // callin and ipmi bits from the baseline, change-bits flag, channel 2.
    assert_eq!(transport.requests[1].2, vec![0xD2, 0x03, 0x04, 0x00]);
}

#[test]
fn setaccess_applies_overrides_to_baseline() {
    // Baseline: callin restricted, link on, ipmi off, administrator.
    let (transport, _output, result) = run_command(
        vec![ok(&[0x0A, 0x02, 0x01, 0x64]), ok(&[])],
        &["setaccess", "1", "2", "callin=off", "ipmi=on", "privilege=3"],
    );

    result.expect("setaccess");
    assert_eq!(transport.requests[1].2, vec![0xB1, 0x02, 0x03, 0x00]);
}

#[test]
fn setaccess_unknown_key_sends_no_mutation() {
    let (transport, output, result) = run_command(
        vec![ok(&[0x0A, 0x02, 0x01, 0x14])],
        &["setaccess", "1", "2", "password=secret"],
    );

    let err = result.expect_err("unknown key");
    assert!(matches!(err, Error::InvalidOption(token) if token == "password=secret"));
    assert_eq!(transport.commands_sent(), vec![0x44]);
    assert!(output.contains("Invalid option: password=secret"));
}

#[test]
fn setaccess_with_too_few_tokens_is_a_usage_no_op() {
    let (transport, output, result) = run_command(vec![], &["setaccess", "1"]);

    result.expect("usage no-op");
    assert!(transport.requests.is_empty());
    assert!(transport.privilege_changes.is_empty());
    assert!(output.contains("Channel Commands:"));
}

#[test]
fn setaccess_help_request_is_a_usage_no_op() {
    let (transport, output, result) = run_command(vec![], &["setaccess", "help", "1", "2"]);

    result.expect("usage no-op");
    assert!(transport.requests.is_empty());
    assert!(output.contains("Channel Commands:"));
}

#[test]
fn dispatcher_rejects_unknown_subcommand() {
    let (transport, output, result) = run_command(vec![], &["lan"]);

    let err = result.expect_err("unknown subcommand");
    assert!(matches!(err, Error::InvalidCommand(token) if token == "lan"));
    assert!(transport.requests.is_empty());
    assert!(output.contains("Invalid CHANNEL command: lan"));
    assert!(output.contains("Channel Commands:"));
}

#[test]
fn dispatcher_rejects_bad_argument_counts() {
    let (transport, output, result) = run_command(vec![], &["authcap", "1"]);

    assert!(matches!(result, Err(Error::Usage)));
    assert!(transport.requests.is_empty());
    assert!(output.contains("Channel Commands:"));
}

#[test]
fn help_and_empty_argument_lists_print_usage() {
    let (transport, output, result) = run_command(vec![], &[]);
    result.expect("empty args");
    assert!(transport.requests.is_empty());
    assert!(output.contains("Possible privilege levels are:"));

    let (transport, output, result) = run_command(vec![], &["help"]);
    result.expect("help");
    assert!(transport.requests.is_empty());
    assert!(output.contains("   4   Administrator level"));
    assert!(output.contains("  15   No access"));
}
