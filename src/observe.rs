use core::fmt;
use std::time::Duration;

use crate::error::Error;

pub(crate) fn record_ok(netfn: u8, cmd: u8, elapsed: Duration, completion_code: u8) {
    let _ = (netfn, cmd, elapsed, completion_code);

    #[cfg(feature = "metrics")]
    {
        metrics::counter!("ipmi_channel_requests_total", "outcome" => "ok").increment(1);
        metrics::histogram!("ipmi_channel_request_seconds").record(elapsed.as_secs_f64());
        if completion_code != 0x00 {
            metrics::counter!("ipmi_channel_completion_code_nonzero_total").increment(1);
        }
    }

    #[cfg(feature = "tracing")]
    {
        tracing::debug!(
            netfn,
            cmd,
            completion_code,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "ipmi request ok"
        );
    }
}

pub(crate) fn record_err(netfn: u8, cmd: u8, elapsed: Duration, err: &Error) {
    let _ = (netfn, cmd, elapsed, err);

    #[cfg(feature = "metrics")]
    {
        metrics::counter!("ipmi_channel_requests_total", "outcome" => "err").increment(1);
        metrics::counter!("ipmi_channel_request_errors_total", "kind" => error_kind(err))
            .increment(1);
        metrics::histogram!("ipmi_channel_request_seconds").record(elapsed.as_secs_f64());
    }

    #[cfg(feature = "tracing")]
    {
        tracing::warn!(
            netfn,
            cmd,
            error = %err,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "ipmi request failed"
        );
    }
}

/// Report a failed channel operation to the operator, with context.
pub(crate) fn report_failure(context: fmt::Arguments<'_>) {
    #[cfg(feature = "tracing")]
    tracing::error!("{context}");

    #[cfg(not(feature = "tracing"))]
    eprintln!("{context}");
}

#[cfg(feature = "metrics")]
fn error_kind(err: &Error) -> &'static str {
    match err {
        Error::Io(_) => "io",
        Error::Timeout => "timeout",
        Error::Device { .. } => "completion_code",
        Error::ShortResponse { .. } => "short_response",
        Error::Usage | Error::InvalidCommand(_) => "usage",
        Error::InvalidOption(_) => "invalid_option",
        Error::InvalidArgument(_) => "invalid_argument",
    }
}
