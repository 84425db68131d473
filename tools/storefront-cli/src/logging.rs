//! Tracing subscriber setup.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,storefront=info,storefront_catalog=info",
        2 => "warn,storefront=debug,storefront_catalog=debug,storefront_data=debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean for
/// `--json` output.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1);

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::registry().with(filter).with(fmt).try_init();
}
