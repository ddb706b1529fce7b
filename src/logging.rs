//! Tracing subscriber bootstrap for applications embedding clipforge.

/// Install a `tracing-subscriber` fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks between debug output
/// (every engine command line) and per-operation info lines. Calling this
/// twice, or after another subscriber was installed, leaves the existing one
/// in place.
pub fn init(verbose: bool) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(verbose).to_string());

    if tracing_subscriber::fmt()
        .with_env_filter(env_filter.as_str())
        .try_init()
        .is_err()
    {
        tracing::debug!("global tracing subscriber already installed");
    }
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "clipforge=debug,cf_av=debug,cf_core=debug"
    } else {
        "clipforge=info,cf_av=info,cf_core=warn"
    }
}
