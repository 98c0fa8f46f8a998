//! User-Agent header sent by the built-in HTTP transport.

use std::sync::OnceLock;

const CLIENT_NAME: &str = "hapi-client-rust";

const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Returns the default User-Agent string.
///
/// Format: `hapi-client-rust/0.1.0 (rust/1.92; linux/x86_64)`
///
/// The string is computed once and cached.
pub fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        format!(
            "{CLIENT_NAME}/{CLIENT_VERSION} ({}; {}/{})",
            rust_version(),
            os_name(),
            std::env::consts::ARCH,
        )
    })
}

fn rust_version() -> &'static str {
    concat!("rust/", env!("CARGO_PKG_RUST_VERSION"))
}

fn os_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}
