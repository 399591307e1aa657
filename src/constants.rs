//! Shared constants used across the application.

/// Default Discord REST API prefix.
pub const DEFAULT_API_BASE_URL: &str = "https://discord.com/api/v9";

/// User agent sent with every API request.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_names_crate_and_version() {
        assert_eq!(
            USER_AGENT,
            format!("discord-thread-scraper/{}", env!("CARGO_PKG_VERSION"))
        );
    }
}
