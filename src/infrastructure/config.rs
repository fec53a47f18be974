use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub log_filter: String,
    pub profile: String,
}

impl Config {
    /// Read settings from the environment, after loading any `.env` file.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let profile = env::var("PROFILE").unwrap_or_else(|_| "default".to_string());

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            if profile == "default" {
                "sqlite://customers.db?mode=rwc".to_string()
            } else {
                format!("sqlite://customers_{}.db?mode=rwc", profile)
            }
        });

        Self {
            database_url,
            log_filter: env::var("LOG_FILTER")
                .unwrap_or_else(|_| "customer_store=info".to_string()),
            profile,
        }
    }

    /// Settings for a throwaway in-memory database.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            log_filter: "customer_store=debug".to_string(),
            profile: "test".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: tests touching the environment are serialized
        unsafe {
            env::remove_var("PROFILE");
            env::remove_var("DATABASE_URL");
            env::remove_var("LOG_FILTER");
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config.profile, "default");
        assert_eq!(config.database_url, "sqlite://customers.db?mode=rwc");
        assert_eq!(config.log_filter, "customer_store=info");
    }

    #[test]
    #[serial]
    fn test_profile_selects_database_file() {
        clear_env();
        unsafe {
            env::set_var("PROFILE", "staging");
        }
        let config = Config::from_env();
        assert_eq!(config.database_url, "sqlite://customers_staging.db?mode=rwc");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_explicit_database_url_wins() {
        clear_env();
        unsafe {
            env::set_var("PROFILE", "staging");
            env::set_var("DATABASE_URL", "sqlite::memory:");
        }
        let config = Config::from_env();
        assert_eq!(config.database_url, "sqlite::memory:");
        clear_env();
    }
}
