use std::time::Duration;

use reqwest::{Client, ClientBuilder, Error};

/// Product token sent with every outbound request.
pub const APP_USER_AGENT: &str = concat!("Portfolio/", env!("CARGO_PKG_VERSION"));

/// Per-request ceiling for theme fetches; retries are handled by the loader.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub fn apply_default_user_agent(builder: ClientBuilder) -> ClientBuilder {
    builder.user_agent(APP_USER_AGENT)
}

pub fn build_http_client(builder: ClientBuilder) -> Result<Client, Error> {
    apply_default_user_agent(builder)
        .timeout(DEFAULT_REQUEST_TIMEOUT)
        .build()
}

#[cfg(test)]
mod tests {
    use super::APP_USER_AGENT;

    #[test]
    fn app_user_agent_matches_package_version() {
        assert_eq!(
            APP_USER_AGENT,
            concat!("Portfolio/", env!("CARGO_PKG_VERSION"))
        );
    }
}
