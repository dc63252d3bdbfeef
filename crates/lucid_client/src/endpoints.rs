//! Sub-endpoints derived from the Lucid endpoint root.

/// URLs derived once from the base endpoint by plain concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
    api: String,
    kv: String,
    ui: String,
}

impl Endpoints {
    /// Derive the sub-endpoints from a Lucid endpoint root.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            api: format!("{}/api", base),
            kv: format!("{}/api/kv", base),
            ui: format!("{}/api/ui", base),
            base,
        }
    }

    /// Lucid endpoint root
    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{base}/api`
    pub fn api(&self) -> &str {
        &self.api
    }

    /// `{base}/api/kv`
    pub fn kv(&self) -> &str {
        &self.kv
    }

    /// `{base}/api/ui`
    pub fn ui(&self) -> &str {
        &self.ui
    }

    pub(crate) fn version_url(&self) -> String {
        format!("{}/version", self.ui)
    }

    pub(crate) fn check_token_url(&self) -> String {
        format!("{}/check-token", self.kv)
    }

    /// Keys are appended verbatim.
    pub(crate) fn key_url(&self, key: &str) -> String {
        format!("{}/{}", self.kv, key)
    }
}
