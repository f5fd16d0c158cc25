//! Stamping orchestration.
//!
//! Reads the HTML file once, parses it once, folds the tag rewriter
//! over each rule in order (later rules see earlier rules' text edits,
//! but every rule queries the same unmutated parse tree), then
//! optionally writes the result back.

use scraper::Html;
use std::fs;
use std::path::Path;

use crate::config::Options;
use crate::error::StampError;
use crate::rewrite::rewrite_tag;

/// Stamp the configured HTML file and return the final content.
///
/// Fails only if the HTML file itself cannot be read (or, with
/// write-back enabled, written). Each call re-reads and re-parses from
/// scratch; nothing is cached across calls.
pub fn run(options: Options) -> Result<String, StampError> {
    let Options {
        html_file,
        write_to_file,
        rules,
        mut on_missing,
    } = options;

    let mut content =
        fs::read_to_string(&html_file).map_err(|e| StampError::Read(html_file.clone(), e))?;
    let doc = Html::parse_document(&content);
    let html_dir = html_file.parent().unwrap_or_else(|| Path::new("."));

    for rule in &rules {
        content = rewrite_tag(content, &doc, rule, html_dir, &mut on_missing)?;
    }

    if write_to_file {
        fs::write(&html_file, &content).map_err(|e| StampError::Write(html_file.clone(), e))?;
    }

    Ok(content)
}
