// Transcript persistence and diagnostic logging setup
//
// The transcript file is the only persistent artifact of a run. Diagnostic
// output goes through `tracing` to stderr so stdout stays the dialogue.

pub mod transcript_log;

pub use transcript_log::TranscriptLog;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` (count of `-v` flags)
/// picks warn / info / debug / trace.
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("parley={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
