pub mod conversation;
pub mod events;
pub mod island;
pub mod view;

pub mod settings {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;
    use zeroize::Zeroizing;

    fn default_log_level() -> String {
        "info".into()
    }

    /// Delays driving the simulated assistant and island timers (millis)
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct TimingSettings {
        pub reply_delay_ms: u64,
        pub browser_delay_ms: u64,
        pub wake_delay_ms: u64,
        pub max_recording_ms: u64,
        pub auto_compact_ms: u64,
        pub feature_open_delay_ms: u64,
        pub default_dismiss_ms: u64,
        pub browser_success_dismiss_ms: u64,
        pub feature_dismiss_ms: u64,
    }

    impl Default for TimingSettings {
        fn default() -> Self {
            Self {
                reply_delay_ms: 1500,
                browser_delay_ms: 2000,
                wake_delay_ms: 1000,
                max_recording_ms: 30_000,
                auto_compact_ms: 5000,
                feature_open_delay_ms: 500,
                default_dismiss_ms: 3000,
                browser_success_dismiss_ms: 2000,
                feature_dismiss_ms: 2000,
            }
        }
    }

    impl TimingSettings {
        pub fn reply_delay(&self) -> Duration {
            Duration::from_millis(self.reply_delay_ms)
        }

        pub fn browser_delay(&self) -> Duration {
            Duration::from_millis(self.browser_delay_ms)
        }

        pub fn wake_delay(&self) -> Duration {
            Duration::from_millis(self.wake_delay_ms)
        }

        pub fn max_recording(&self) -> Duration {
            Duration::from_millis(self.max_recording_ms)
        }

        pub fn auto_compact(&self) -> Duration {
            Duration::from_millis(self.auto_compact_ms)
        }

        pub fn feature_open_delay(&self) -> Duration {
            Duration::from_millis(self.feature_open_delay_ms)
        }

        pub fn default_dismiss(&self) -> Duration {
            Duration::from_millis(self.default_dismiss_ms)
        }

        pub fn browser_success_dismiss(&self) -> Duration {
            Duration::from_millis(self.browser_success_dismiss_ms)
        }

        pub fn feature_dismiss(&self) -> Duration {
            Duration::from_millis(self.feature_dismiss_ms)
        }

        /// Longest delay any single reply can take
        pub fn longest_reply(&self) -> Duration {
            self.reply_delay().max(self.browser_delay())
        }
    }

    /// User preferences surfaced in the model selector and category filter
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Preferences {
        pub selected_model: String,
        pub selected_category: String,
    }

    impl Default for Preferences {
        fn default() -> Self {
            Self {
                selected_model: "vexla-ultra".into(),
                selected_category: "All modes".into(),
            }
        }
    }

    /// Query backend (ClickHouse Cloud Queries API) used by the proxy
    #[derive(Clone, Serialize, Deserialize)]
    #[serde(default)]
    pub struct QueryBackendSettings {
        pub queries_api_url: Option<String>,
        pub key_id: Option<String>,
        pub key_secret: Option<Zeroizing<String>>,
        pub bind_addr: String,
        pub request_timeout_secs: u64,
    }

    impl Default for QueryBackendSettings {
        fn default() -> Self {
            Self {
                queries_api_url: None,
                key_id: None,
                key_secret: None,
                bind_addr: "127.0.0.1:8787".into(),
                request_timeout_secs: 30,
            }
        }
    }

    // Never print the secret
    impl std::fmt::Debug for QueryBackendSettings {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("QueryBackendSettings")
                .field("queries_api_url", &self.queries_api_url)
                .field("key_id", &self.key_id)
                .field("key_secret", &self.key_secret.as_ref().map(|_| "<redacted>"))
                .field("bind_addr", &self.bind_addr)
                .field("request_timeout_secs", &self.request_timeout_secs)
                .finish()
        }
    }

    /// Resolved credentials for the query backend
    #[derive(Clone)]
    pub struct QueryCredentials {
        pub queries_api_url: String,
        pub key_id: String,
        pub key_secret: Zeroizing<String>,
    }

    #[derive(Debug, thiserror::Error, PartialEq, Eq)]
    pub enum ConfigError {
        #[error("query backend setting `{0}` is not configured")]
        Missing(&'static str),
    }

    impl QueryBackendSettings {
        /// Apply `CLICKHOUSE_*` environment overrides
        pub fn with_env_overrides(self) -> Self {
            self.with_overrides(|key| std::env::var(key).ok())
        }

        /// Apply overrides from an arbitrary lookup (env in production)
        pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
            let non_empty = |v: String| if v.trim().is_empty() { None } else { Some(v) };
            if let Some(url) = lookup("CLICKHOUSE_QUERIES_API").and_then(non_empty) {
                self.queries_api_url = Some(url);
            }
            if let Some(id) = lookup("CLICKHOUSE_KEY_ID").and_then(non_empty) {
                self.key_id = Some(id);
            }
            if let Some(secret) = lookup("CLICKHOUSE_KEY_SECRET").and_then(non_empty) {
                self.key_secret = Some(Zeroizing::new(secret));
            }
            self
        }

        pub fn credentials(&self) -> Result<QueryCredentials, ConfigError> {
            let queries_api_url = self
                .queries_api_url
                .clone()
                .filter(|s| !s.trim().is_empty())
                .ok_or(ConfigError::Missing("queries_api_url"))?;
            let key_id = self
                .key_id
                .clone()
                .filter(|s| !s.trim().is_empty())
                .ok_or(ConfigError::Missing("key_id"))?;
            let key_secret = self
                .key_secret
                .clone()
                .filter(|s| !s.trim().is_empty())
                .ok_or(ConfigError::Missing("key_secret"))?;
            Ok(QueryCredentials {
                queries_api_url,
                key_id,
                key_secret,
            })
        }

        pub fn request_timeout(&self) -> Duration {
            Duration::from_secs(self.request_timeout_secs)
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AppSettings {
        #[serde(default)]
        pub timing: TimingSettings,
        #[serde(default)]
        pub preferences: Preferences,
        #[serde(default)]
        pub query_backend: QueryBackendSettings,
        #[serde(default = "default_log_level")]
        pub log_level: String,
    }

    impl Default for AppSettings {
        fn default() -> Self {
            Self {
                timing: TimingSettings::default(),
                preferences: Preferences::default(),
                query_backend: QueryBackendSettings::default(),
                log_level: default_log_level(),
            }
        }
    }

}
