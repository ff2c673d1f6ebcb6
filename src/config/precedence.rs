//! Ordered fallback chains for string-valued settings
//!
//! A [`PrecedenceChain`] is a list of named sources tried in order. The
//! first source that yields a non-empty value after trimming wins.

use tracing::debug;

/// Environment variable naming the remote slider document
pub const REMOTE_URL_ENV: &str = "ATERA_CALC_REMOTE_CONFIG_URL";

/// Environment variable naming the call-to-action link
pub const CTA_HREF_ENV: &str = "ATERA_CALC_CTA_HREF";

/// Remote URL baked in at build time, if any
pub const REMOTE_URL_CONST: Option<&str> = option_env!("ATERA_CALC_REMOTE_CONFIG_URL");

/// Call-to-action link baked in at build time, if any
pub const CTA_HREF_CONST: Option<&str> = option_env!("ATERA_CALC_CTA_HREF");

/// Link used when no source provides one
pub const DEFAULT_CTA_HREF: &str = "#";

type Source<'a> = Box<dyn Fn() -> Option<String> + Send + Sync + 'a>;

/// First-non-empty-wins list of value sources
pub struct PrecedenceChain<'a> {
    name: &'static str,
    sources: Vec<(&'static str, Source<'a>)>,
}

impl std::fmt::Debug for PrecedenceChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|(name, _)| *name).collect();
        f.debug_struct("PrecedenceChain")
            .field("name", &self.name)
            .field("sources", &names)
            .finish()
    }
}

impl<'a> PrecedenceChain<'a> {
    /// Start an empty chain; `name` only shows up in logs
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            sources: Vec::new(),
        }
    }

    /// Append a computed source
    pub fn then<F>(mut self, label: &'static str, source: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'a,
    {
        self.sources.push((label, Box::new(source)));
        self
    }

    /// Append a fixed value
    pub fn then_value(self, label: &'static str, value: Option<String>) -> Self {
        self.then(label, move || value.clone())
    }

    /// Append an environment variable lookup
    pub fn then_env(self, var: &'static str) -> Self {
        self.then(var, move || std::env::var(var).ok())
    }

    /// Labels of the sources in the order they are consulted
    pub fn labels(&self) -> Vec<&'static str> {
        self.sources.iter().map(|(label, _)| *label).collect()
    }

    /// First non-empty trimmed value, or `None`
    pub fn resolve(&self) -> Option<String> {
        for (label, source) in &self.sources {
            if let Some(value) = source() {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    debug!("{} resolved from {}", self.name, label);
                    return Some(trimmed.to_string());
                }
            }
        }
        debug!("{} not set by any source", self.name);
        None
    }

    /// Resolve, falling back to `default`
    pub fn resolve_or(&self, default: &str) -> String {
        self.resolve().unwrap_or_else(|| default.to_string())
    }
}

/// Remote URL chain: explicit override, persisted setting, environment, build constant
pub fn remote_url_chain<'a>(
    explicit: Option<String>,
    persisted: Option<String>,
) -> PrecedenceChain<'a> {
    PrecedenceChain::new("remote config URL")
        .then_value("explicit override", explicit)
        .then_value("persisted setting", persisted)
        .then_env(REMOTE_URL_ENV)
        .then_value("build constant", REMOTE_URL_CONST.map(str::to_string))
}

/// Call-to-action chain: document value, environment, build constant
pub fn cta_href_chain<'a>(document: Option<String>) -> PrecedenceChain<'a> {
    PrecedenceChain::new("ctaHref")
        .then_value("document", document)
        .then_env(CTA_HREF_ENV)
        .then_value("build constant", CTA_HREF_CONST.map(str::to_string))
}
