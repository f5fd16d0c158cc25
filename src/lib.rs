//! hashstamp - content-hash cache busting for static HTML files.
//!
//! Rewrites local asset references (`<script src>`, `<link href>`)
//! inside a single HTML file, appending a content-derived `?v=<token>`
//! query parameter and, optionally, a subresource-integrity hash, so
//! browsers are forced to re-fetch updated assets after deploy. Built
//! for static sites that skip the bundler.
//!
//! Remote references (anything containing `://`) are left untouched;
//! references to files that do not exist are reported through the
//! `on_missing` hook and left as-is.
//!
//! ```no_run
//! use hashstamp::{Options, run};
//!
//! let stamped = run(Options::new("dist/index.html").write(true))?;
//! # Ok::<(), hashstamp::StampError>(())
//! ```

pub mod checksum;
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod query;
pub mod rewrite;
pub mod run;

// Re-export the public surface for convenience
pub use config::{Options, RulesFile, TagRule, default_rules};
pub use error::StampError;
pub use run::run;
