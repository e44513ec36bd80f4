use crate::utils::trim_line;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Endpoint coordinates for the generative-language API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub base_url: String,
    pub model: String,
}

impl Default for Provider {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Provider {
    /// Blank overrides keep the defaults.
    pub fn new(base_url: Option<&str>, model: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: base_url
                .and_then(trim_line)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            model: model.and_then(trim_line).unwrap_or(defaults.model),
        }
    }

    /// `generateContent` URL without the key; the client appends it as a query parameter.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}
