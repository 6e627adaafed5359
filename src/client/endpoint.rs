/*!
 * Transport endpoint resolution.
 *
 * Requests go either straight to the service, through one of two public
 * CORS relays, or through a proxy URL supplied by the user. Every fixed
 * endpoint already ends in `?`, so the query string is appended verbatim.
 */

use url::Url;

use crate::app_config::ProxyType;
use crate::errors::ConfigError;

/// Direct endpoint for free-tier accounts
pub const DEEPL_FREE_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate?";

/// Direct endpoint for paid accounts
pub const DEEPL_PRO_ENDPOINT: &str = "https://api.deepl.com/v2/translate?";

/// Public CORS relay in front of the free-tier endpoint
pub const CORS_PROXY_ENDPOINT: &str = "https://corsproxy.io/?url=https://api-free.deepl.com/v2/translate?";

/// Community-run relay for the translation API
pub const STB_PROXY_ENDPOINT: &str = "https://deepl-api-proxy.stbaf.de/v2/translate?";

/// Free-tier authentication keys carry this suffix
const FREE_TOKEN_SUFFIX: &str = ":fx";

/// A resolved base URL that a query string can be appended to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    /// Resolve the endpoint for a proxy selection
    ///
    /// # Arguments
    /// * `proxy` - Which transport to use
    /// * `own_proxy_url` - User-supplied URL, only read for `ProxyType::Own`
    /// * `token` - Authentication key, used to pick the direct endpoint tier
    pub fn resolve(proxy: &ProxyType, own_proxy_url: &str, token: &str) -> Result<Self, ConfigError> {
        let base = match proxy {
            ProxyType::Direct if token.trim().ends_with(FREE_TOKEN_SUFFIX) => DEEPL_FREE_ENDPOINT.to_string(),
            ProxyType::Direct => DEEPL_PRO_ENDPOINT.to_string(),
            ProxyType::CorsProxy => CORS_PROXY_ENDPOINT.to_string(),
            ProxyType::DeepLApiProxyStb => STB_PROXY_ENDPOINT.to_string(),
            ProxyType::Own => {
                let url = own_proxy_url.trim();
                if url.is_empty() {
                    return Err(ConfigError::InvalidProxyUrl {
                        url: String::new(),
                        reason: "no proxy URL configured".to_string(),
                    });
                }
                Url::parse(url).map_err(|e| ConfigError::InvalidProxyUrl {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;
                url.to_string()
            }
        };

        Ok(Self { base })
    }

    /// Use an arbitrary base URL as-is
    pub fn custom(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// The base URL without any query
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Build the full request URL for an encoded query string
    pub fn request_url(&self, query: &str) -> String {
        if self.base.ends_with('?') || self.base.ends_with('&') {
            format!("{}{}", self.base, query)
        } else if self.base.contains('?') {
            format!("{}&{}", self.base, query)
        } else {
            format!("{}?{}", self.base, query)
        }
    }
}
