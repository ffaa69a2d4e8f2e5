use game_core::GameRules;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub words_file: String,
    pub time_attack_seconds: u64,
    pub survival_lives: u32,
    pub hint_point_penalty: u32,
    pub session_prune_interval_seconds: u64,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults for
    /// unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            words_file: env::var("WORDS_FILE").unwrap_or(defaults.words_file),
            time_attack_seconds: parse_var("TIME_ATTACK_SECONDS", defaults.time_attack_seconds)?,
            survival_lives: parse_var("SURVIVAL_LIVES", defaults.survival_lives)?,
            hint_point_penalty: parse_var("HINT_POINT_PENALTY", defaults.hint_point_penalty)?,
            session_prune_interval_seconds: parse_var(
                "SESSION_PRUNE_INTERVAL_SECONDS",
                defaults.session_prune_interval_seconds,
            )?,
        })
    }

    pub fn game_rules(&self) -> GameRules {
        GameRules::new(
            Duration::from_secs(self.time_attack_seconds),
            self.survival_lives,
            self.hint_point_penalty,
        )
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            words_file: "./shared/words.txt".to_string(),
            time_attack_seconds: 120,
            survival_lives: 3,
            hint_point_penalty: 5,
            session_prune_interval_seconds: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_game_rules() {
        let config = Config::default();
        assert_eq!(config.game_rules(), GameRules::default());
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_parse_var() {
        // Unset variables use the default
        assert_eq!(parse_var("WORD_SCRAMBLE_TEST_UNSET", 7u32).unwrap(), 7);

        unsafe { env::set_var("WORD_SCRAMBLE_TEST_PORT", "not-a-port") };
        let err = parse_var::<u16>("WORD_SCRAMBLE_TEST_PORT", 8080).unwrap_err();
        assert!(err.to_string().contains("WORD_SCRAMBLE_TEST_PORT"));

        unsafe { env::set_var("WORD_SCRAMBLE_TEST_PORT", " 9090 ") };
        assert_eq!(parse_var::<u16>("WORD_SCRAMBLE_TEST_PORT", 8080).unwrap(), 9090);
    }
}
