use std::collections::HashMap;
use std::fmt;

/// Identifier of a rendering engine registered with the host.
///
/// Rendering itself lives outside this crate; the selector only decides which
/// engine a view maps to, and the host dispatches on the returned id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateEngineId(String);

impl TemplateEngineId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateEngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TemplateEngineId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TemplateEngineId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Picks the rendering engine for a view path. One of the container's default
/// services.
pub trait TemplateEngineSelector: Send + Sync {
    fn engine_for(&self, view_path: &str) -> Option<TemplateEngineId>;
}

/// Default selector: file-extension convention.
///
/// Starts empty; a host that renders views registers its engines. `None` from an
/// empty or unmatched selector means "no engine claims this view", which hosts
/// typically turn into a 500 or a pass-through.
#[derive(Debug, Default, Clone)]
pub struct ExtensionTemplateSelector {
    engines: HashMap<String, TemplateEngineId>,
}

impl ExtensionTemplateSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a file extension (without the dot, case-insensitive) to an engine.
    #[must_use]
    pub fn with_engine(mut self, extension: &str, engine: impl Into<TemplateEngineId>) -> Self {
        self.engines
            .insert(extension.to_ascii_lowercase(), engine.into());
        self
    }
}

impl TemplateEngineSelector for ExtensionTemplateSelector {
    fn engine_for(&self, view_path: &str) -> Option<TemplateEngineId> {
        let (_, extension) = view_path.rsplit_once('.')?;
        self.engines.get(&extension.to_ascii_lowercase()).cloned()
    }
}
