use ipmi_channel::{PrivilegeLevel, RawResponse, Result, Transport, run};

/// A canned BMC standing in for a real session, so the demo runs offline.
///
/// Real deployments implement [`Transport`] on top of their session layer
/// (RMCP+, KCS, ...) and hand it to [`run`] unchanged.
struct DemoBmc;

impl Transport for DemoBmc {
    fn send_recv(&mut self, _netfn: u8, cmd: u8, data: &[u8]) -> Result<RawResponse> {
        let data = match cmd {
            // Get Channel Info: LAN channel 1, multi-session, IANA 7154.
            0x42 => vec![0x01, 0x04, 0x01, 0x80, 0xF2, 0x1B, 0x00],
            // Get Channel Access: the volatile variant runs wide open, the
            // non-volatile one has user-level auth disabled.
            0x41 if data[1] == 0x80 => vec![0x02, 0x04],
            0x41 => vec![0x0A, 0x04],
            _ => Vec::new(),
        };
        Ok(RawResponse {
            completion_code: 0x00,
            data,
        })
    }

    fn set_privilege_level(&mut self, _level: PrivilegeLevel) -> Result<()> {
        Ok(())
    }
}

fn main() -> Result<()> {
    // Example:
    //   cargo run --example channel_info
    //   cargo run --example channel_info -- 1
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut tokens = vec!["info"];
    tokens.extend(args.iter().map(String::as_str));

    let mut bmc = DemoBmc;
    run(&mut bmc, &mut std::io::stdout(), &tokens)
}
