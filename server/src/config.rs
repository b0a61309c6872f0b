use std::time::Duration;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_MAX_NATIONS: usize = 10_000;
pub const DEFAULT_NATION_IDLE_TTL_SECS: u64 = 86_400; // 1 day
pub const NATION_EVICTION_INTERVAL_SECS: u64 = 300; // 5 minutes
pub const MAX_NATION_NAME_LEN: usize = 64;

pub fn server_port() -> u16 {
    std::env::var("ECOWORLD_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn static_dir() -> String {
    std::env::var("ECOWORLD_STATIC_DIR")
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_owned())
}

pub fn max_nations() -> usize {
    std::env::var("ECOWORLD_MAX_NATIONS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_MAX_NATIONS)
}

pub fn nation_idle_ttl() -> Duration {
    std::env::var("ECOWORLD_NATION_IDLE_TTL_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_NATION_IDLE_TTL_SECS))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{
        DEFAULT_MAX_NATIONS, DEFAULT_SERVER_PORT, DEFAULT_STATIC_DIR, max_nations,
        nation_idle_ttl, server_port, static_dir,
    };

    #[test]
    fn defaults_apply_when_unset() {
        temp_env::with_vars_unset(
            [
                "ECOWORLD_PORT",
                "ECOWORLD_STATIC_DIR",
                "ECOWORLD_MAX_NATIONS",
                "ECOWORLD_NATION_IDLE_TTL_SECS",
            ],
            || {
                assert_eq!(server_port(), DEFAULT_SERVER_PORT);
                assert_eq!(static_dir(), DEFAULT_STATIC_DIR);
                assert_eq!(max_nations(), DEFAULT_MAX_NATIONS);
                assert_eq!(nation_idle_ttl(), Duration::from_secs(86_400));
            },
        );
    }

    #[test]
    fn env_overrides_are_parsed() {
        temp_env::with_vars(
            [
                ("ECOWORLD_PORT", Some("8080")),
                ("ECOWORLD_STATIC_DIR", Some(" public ")),
                ("ECOWORLD_MAX_NATIONS", Some("25")),
                ("ECOWORLD_NATION_IDLE_TTL_SECS", Some("60")),
            ],
            || {
                assert_eq!(server_port(), 8080);
                assert_eq!(static_dir(), "public");
                assert_eq!(max_nations(), 25);
                assert_eq!(nation_idle_ttl(), Duration::from_secs(60));
            },
        );
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        temp_env::with_vars(
            [
                ("ECOWORLD_PORT", Some("not-a-port")),
                ("ECOWORLD_STATIC_DIR", Some("   ")),
                ("ECOWORLD_MAX_NATIONS", Some("0")),
                ("ECOWORLD_NATION_IDLE_TTL_SECS", Some("-5")),
            ],
            || {
                assert_eq!(server_port(), DEFAULT_SERVER_PORT);
                assert_eq!(static_dir(), DEFAULT_STATIC_DIR);
                assert_eq!(max_nations(), DEFAULT_MAX_NATIONS);
                assert_eq!(nation_idle_ttl(), Duration::from_secs(86_400));
            },
        );
    }
}
