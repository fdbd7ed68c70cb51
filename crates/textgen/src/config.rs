//! Text-generation client configuration loaded from environment variables.

use std::time::Duration;

/// A configuration variable that was set but could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{key} must be a whole number of seconds, got '{value}'")]
pub struct TextGenConfigError {
    pub key: &'static str,
    pub value: String,
}

/// Connection settings for the text-generation endpoint.
#[derive(Debug, Clone)]
pub struct TextGenConfig {
    /// Base URL without the trailing `/chat/completions`.
    pub base_url: String,
    /// Bearer token. Empty means no `Authorization` header is sent.
    pub api_key: String,
    pub model: String,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl TextGenConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env var                | Default                      |
    /// |------------------------|------------------------------|
    /// | `TEXTGEN_BASE_URL`     | `https://api.openai.com/v1`  |
    /// | `TEXTGEN_API_KEY`      | (empty)                      |
    /// | `TEXTGEN_MODEL`        | `gpt-4o-mini`                |
    /// | `TEXTGEN_TIMEOUT_SECS` | (unset, no timeout)          |
    pub fn from_env() -> Result<Self, TextGenConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, TextGenConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("TEXTGEN_BASE_URL")
            .unwrap_or_else(|| "https://api.openai.com/v1".into())
            .trim_end_matches('/')
            .to_string();

        let timeout = match lookup("TEXTGEN_TIMEOUT_SECS") {
            None => None,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    return Err(TextGenConfigError {
                        key: "TEXTGEN_TIMEOUT_SECS",
                        value,
                    })
                }
            },
        };

        Ok(Self {
            base_url,
            api_key: lookup("TEXTGEN_API_KEY").unwrap_or_default(),
            model: lookup("TEXTGEN_MODEL").unwrap_or_else(|| "gpt-4o-mini".into()),
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(key: &'static str, value: &'static str) -> impl Fn(&str) -> Option<String> {
        move |k| (k == key).then(|| value.to_string())
    }

    #[test]
    fn defaults_without_timeout() {
        let config = TextGenConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o-mini");
        assert!(config.api_key.is_empty());
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn trailing_slash_is_trimmed_and_timeout_parsed() {
        let config = TextGenConfig::from_lookup(|k| match k {
            "TEXTGEN_BASE_URL" => Some("http://llm.local/v1/".into()),
            "TEXTGEN_TIMEOUT_SECS" => Some("45".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url, "http://llm.local/v1");
        assert_eq!(config.timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn bad_timeout_is_an_error() {
        let err = TextGenConfig::from_lookup(only("TEXTGEN_TIMEOUT_SECS", "soon")).unwrap_err();
        assert_eq!(err.key, "TEXTGEN_TIMEOUT_SECS");
        assert_eq!(err.value, "soon");
    }
}
