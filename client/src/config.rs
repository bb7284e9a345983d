//! Runtime configuration for the browser app.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server resolves these values from its environment and embeds them in
//! the HTML shell as `<meta name="zscraper:...">` tags. The hydrated app reads
//! the same tags back, so the backend URL stays configurable at deploy time
//! without rebuilding the WASM bundle. Compile-time values and hardcoded
//! defaults fill whatever is missing.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_BACKEND_URL: &str = "http://192.168.0.100:5000";
pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// A configurable value: the env var the server reads and the meta tag it emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigKey {
    pub env: &'static str,
    pub meta: &'static str,
}

pub const BACKEND_URL_KEY: ConfigKey = ConfigKey { env: "ZSCRAPER_BACKEND_URL", meta: "zscraper:backend-url" };
pub const FIREBASE_API_KEY_KEY: ConfigKey =
    ConfigKey { env: "ZSCRAPER_FIREBASE_API_KEY", meta: "zscraper:firebase-api-key" };
pub const IDENTITY_URL_KEY: ConfigKey = ConfigKey { env: "ZSCRAPER_IDENTITY_URL", meta: "zscraper:identity-url" };
pub const TOKEN_URL_KEY: ConfigKey = ConfigKey { env: "ZSCRAPER_TOKEN_URL", meta: "zscraper:token-url" };

/// Identity provider endpoints and credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Web API key. `None` disables sign-in/sign-up.
    pub api_key: Option<String>,
    pub accounts_url: String,
    pub token_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub backend_base_url: String,
    pub identity: IdentityConfig,
}

impl ClientConfig {
    /// Resolve every value through `lookup`, then compile-time env, then defaults.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(ConfigKey) -> Option<String>,
    {
        let value = |key: ConfigKey, compiled: Option<&'static str>| {
            normalize(lookup(key)).or_else(|| normalize(compiled.map(str::to_owned)))
        };

        let backend_base_url = value(BACKEND_URL_KEY, option_env!("ZSCRAPER_BACKEND_URL"))
            .map_or_else(|| DEFAULT_BACKEND_URL.to_owned(), strip_trailing_slash);
        let api_key = value(FIREBASE_API_KEY_KEY, option_env!("ZSCRAPER_FIREBASE_API_KEY"));
        let accounts_url = value(IDENTITY_URL_KEY, option_env!("ZSCRAPER_IDENTITY_URL"))
            .map_or_else(|| DEFAULT_IDENTITY_URL.to_owned(), strip_trailing_slash);
        let token_url = value(TOKEN_URL_KEY, option_env!("ZSCRAPER_TOKEN_URL"))
            .map_or_else(|| DEFAULT_TOKEN_URL.to_owned(), strip_trailing_slash);

        Self { backend_base_url, identity: IdentityConfig { api_key, accounts_url, token_url } }
    }

    /// Load config for the current environment.
    ///
    /// Server: process environment. Browser: meta tags rendered by the server.
    pub fn load() -> Self {
        #[cfg(feature = "hydrate")]
        {
            Self::resolve(read_meta)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::resolve(|key| std::env::var(key.env).ok())
        }
    }

    /// Full URL of the question-answering endpoint.
    pub fn ask_endpoint(&self) -> String {
        format!("{}/ask", self.backend_base_url)
    }

    /// `(meta name, content)` pairs for the HTML shell.
    pub fn meta_entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![
            (BACKEND_URL_KEY.meta, self.backend_base_url.clone()),
            (IDENTITY_URL_KEY.meta, self.identity.accounts_url.clone()),
            (TOKEN_URL_KEY.meta, self.identity.token_url.clone()),
        ];
        if let Some(key) = &self.identity.api_key {
            entries.push((FIREBASE_API_KEY_KEY.meta, key.clone()));
        }
        entries
    }
}

fn normalize(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn strip_trailing_slash(url: String) -> String {
    url.trim_end_matches('/').to_owned()
}

#[cfg(feature = "hydrate")]
fn read_meta(key: ConfigKey) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let selector = format!("meta[name=\"{}\"]", key.meta);
    document.query_selector(&selector).ok().flatten()?.get_attribute("content")
}
