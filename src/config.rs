//! Tag rules and per-call options.
//!
//! A [`TagRule`] selects which elements get rewritten and with what
//! treatment; [`Options`] bundles everything one stamping call needs.
//! Rules can also be loaded from a TOML file:
//!
//! ```toml
//! [[tags]]
//! selector = 'script[src]'
//! attribute = "src"
//! integrity = true
//!
//! [[tags]]
//! selector = 'link[rel="stylesheet"][href]'
//! attribute = "href"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StampError;

// ============================================================================
// Tag Rule
// ============================================================================

/// One rewrite rule: which elements, which attribute, what treatment.
///
/// Immutable once constructed. A sequence of rules is processed in
/// order, each rule's output content feeding the next rule's input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagRule {
    /// CSS selector matching the elements to rewrite.
    pub selector: String,

    /// Attribute carrying the asset reference (`src`, `href`, ...).
    pub attribute: String,

    /// Add `integrity`/`crossorigin` attributes to matched `.js` files.
    #[serde(rename = "integrity", default)]
    pub with_integrity: bool,

    /// Append the `v=<token>` cache-busting parameter.
    #[serde(rename = "version", default = "default_true")]
    pub with_version: bool,
}

fn default_true() -> bool {
    true
}

impl TagRule {
    /// Create a rule with the default treatment (version only).
    pub fn new(selector: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            attribute: attribute.into(),
            with_integrity: false,
            with_version: true,
        }
    }

    /// Set whether matched `.js` references get integrity attributes.
    pub fn integrity(mut self, enabled: bool) -> Self {
        self.with_integrity = enabled;
        self
    }

    /// Set whether the `v=<token>` parameter is appended.
    pub fn version(mut self, enabled: bool) -> Self {
        self.with_version = enabled;
        self
    }
}

/// Default rule set: scripts and stylesheets, version only.
pub fn default_rules() -> Vec<TagRule> {
    vec![
        TagRule::new("script[src]", "src"),
        TagRule::new(r#"link[rel="stylesheet"][href]"#, "href"),
    ]
}

// ============================================================================
// Rules File
// ============================================================================

/// TOML rules file: a list of `[[tags]]` entries.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesFile {
    #[serde(default)]
    pub tags: Vec<TagRule>,
}

impl RulesFile {
    /// Load tag rules from a TOML file.
    pub fn load(path: &Path) -> Result<Self, StampError> {
        let text =
            fs::read_to_string(path).map_err(|e| StampError::Read(path.to_path_buf(), e))?;
        Ok(toml::from_str(&text)?)
    }
}

// ============================================================================
// Options
// ============================================================================

/// Configuration for one stamping call, constructed builder-style.
///
/// ```no_run
/// use hashstamp::{Options, TagRule};
///
/// let options = Options::new("dist/index.html")
///     .write(true)
///     .rules(vec![TagRule::new("script[src]", "src").integrity(true)])
///     .on_missing(|path| eprintln!("missing asset: {}", path.display()));
/// ```
pub struct Options<'a> {
    pub(crate) html_file: PathBuf,
    pub(crate) write_to_file: bool,
    pub(crate) rules: Vec<TagRule>,
    pub(crate) on_missing: Box<dyn FnMut(&Path) + 'a>,
}

impl<'a> Options<'a> {
    /// Options for stamping `html_file` with the default rules:
    /// no write-back, missing assets silently skipped.
    pub fn new(html_file: impl Into<PathBuf>) -> Self {
        Self {
            html_file: html_file.into(),
            write_to_file: false,
            rules: default_rules(),
            on_missing: Box::new(|_| {}),
        }
    }

    /// Set whether the final content overwrites the source file.
    pub fn write(mut self, enabled: bool) -> Self {
        self.write_to_file = enabled;
        self
    }

    /// Replace the default rule set.
    pub fn rules(mut self, rules: Vec<TagRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Hook invoked with the absolute path of each referenced asset
    /// that does not exist on disk.
    pub fn on_missing(mut self, hook: impl FnMut(&Path) + 'a) -> Self {
        self.on_missing = Box::new(hook);
        self
    }
}
