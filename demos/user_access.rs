use ipmi_channel::{PrivilegeLevel, RawResponse, Result, Transport, run};

/// A canned BMC with a three-slot user table, so the demo runs offline.
struct DemoBmc;

impl Transport for DemoBmc {
    fn send_recv(&mut self, _netfn: u8, cmd: u8, data: &[u8]) -> Result<RawResponse> {
        let data = match cmd {
            0x44 => {
                let flags: u8 = match data[1] {
                    1 => 0x54, // administrator, callback only
                    2 => 0x34, // administrator, link auth + messaging
                    _ => 0x0F, // no access
                };
                vec![0x03, 0x02, 0x01, flags]
            }
            0x46 => {
                let text: &[u8] = match data[0] {
                    1 => b"admin",
                    2 => b"operator",
                    _ => b"",
                };
                let mut name = [0u8; 16];
                name[..text.len()].copy_from_slice(text);
                name.to_vec()
            }
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
    //   cargo run --example user_access          (all users on channel 1)
    //   cargo run --example user_access -- 2     (one user)
    let mut tokens = vec!["getaccess".to_string(), "1".to_string()];
    tokens.extend(std::env::args().skip(1));
    let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();

    let mut bmc = DemoBmc;
    run(&mut bmc, &mut std::io::stdout(), &tokens)
}
