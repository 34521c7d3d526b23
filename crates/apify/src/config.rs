use std::fmt::Debug;

/// Builder for [`ApifyConfig`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApifyConfigBuilder {
    actor_id: String,
    token: String,
    base_url: Option<String>,
}

impl ApifyConfigBuilder {
    /// Creates a builder for running the given actor with an API token.
    ///
    /// Actor identifiers use the `username~actor-name` form.
    #[inline]
    pub fn with_actor<S1: Into<String>, S2: Into<String>>(
        actor_id: S1,
        token: S2,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            token: token.into(),
            base_url: None,
        }
    }

    /// Sets a custom base URL.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> ApifyConfig {
        let base_url = self
            .base_url
            .unwrap_or_else(|| "https://api.apify.com/v2".to_string());
        ApifyConfig {
            actor_id: self.actor_id,
            token: self.token,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

impl Debug for ApifyConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApifyConfigBuilder")
            .field("actor_id", &self.actor_id)
            .field("token", &"<deducted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Configuration for the Apify platform.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApifyConfig {
    pub(crate) actor_id: String,
    pub(crate) token: String,
    pub(crate) base_url: String,
}

impl ApifyConfig {
    /// Returns the actor this configuration runs.
    #[inline]
    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    /// Returns the API base URL without a trailing slash.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Debug for ApifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApifyConfig")
            .field("actor_id", &self.actor_id)
            .field("token", &"<deducted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config =
            ApifyConfigBuilder::with_actor("voyager~booking-scraper", "secret")
                .build();
        assert_eq!(config.actor_id(), "voyager~booking-scraper");
        assert_eq!(config.base_url(), "https://api.apify.com/v2");
    }

    #[test]
    fn test_custom_base_url() {
        let config = ApifyConfigBuilder::with_actor("me~actor", "secret")
            .with_base_url("http://localhost:8080/v2/")
            .build();
        assert_eq!(config.base_url(), "http://localhost:8080/v2");
    }

    #[test]
    fn test_debug_hides_token() {
        let builder = ApifyConfigBuilder::with_actor("me~actor", "secret");
        assert!(!format!("{builder:?}").contains("secret"));
        assert!(!format!("{:?}", builder.build()).contains("secret"));
    }
}
