pub(crate) fn enabled() -> bool {
    std::env::var("IPMI_CHANNEL_DEBUG")
        .map(|v| !v.is_empty())
        .unwrap_or(false)
}

/// Dump one side of a round trip as hex, tagged with its NetFn/Cmd pair.
pub(crate) fn dump_hex(direction: &str, netfn: u8, cmd: u8, bytes: &[u8]) {
    if !enabled() {
        return;
    }
    let mut out = format!(
        "{direction} netfn {netfn:#04x} cmd {cmd:#04x} ({} bytes):",
        bytes.len()
    );
    for b in bytes {
        out.push(' ');
        out.push_str(&format!("{b:02x}"));
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("{out}");

    #[cfg(not(feature = "tracing"))]
    eprintln!("{out}");
}
