//! Tag rewriting: the core of the stamping pipeline.
//!
//! The parsed document is used only to FIND elements and read their
//! attributes; the actual edit is a literal text substitution on the
//! content string. The tree is never re-serialized, so after the first
//! edit it is stale relative to the text. Correctness rests on the
//! selector iterating in document order and on original attribute
//! values being distinguishable substrings. Two elements sharing an
//! identical attribute value are both fixed by successive first-
//! occurrence substitutions; that is a known limitation, not a bug to
//! fix here.

use scraper::{Html, Selector};
use std::fs;
use std::path::Path;

use crate::checksum;
use crate::config::TagRule;
use crate::error::StampError;
use crate::query::{self, QueryValue};

/// Rewrite every element matched by `rule` inside `content`.
///
/// `doc` is the parse of the ORIGINAL content; `html_dir` is the
/// directory containing the HTML file, against which references are
/// resolved. References that are absent, remote (`://`), or point at a
/// file that does not exist are left untouched; the latter are
/// reported through `on_missing` with the absolute resolved path.
pub fn rewrite_tag(
    content: String,
    doc: &Html,
    rule: &TagRule,
    html_dir: &Path,
    on_missing: &mut dyn FnMut(&Path),
) -> Result<String, StampError> {
    let selector = Selector::parse(&rule.selector).map_err(|e| StampError::Selector {
        selector: rule.selector.clone(),
        message: e.to_string(),
    })?;

    let mut content = content;
    for element in doc.select(&selector) {
        let Some(raw) = element.value().attr(&rule.attribute) else {
            continue;
        };
        if raw.contains("://") {
            continue;
        }

        let (file_part, query_part) = match raw.split_once('?') {
            Some((file, query)) => (file, Some(query)),
            None => (raw, None),
        };

        let resolved = html_dir.join(file_part);
        let resolved = std::path::absolute(&resolved).unwrap_or(resolved);
        if !resolved.exists() {
            on_missing(&resolved);
            continue;
        }

        let bytes =
            fs::read(&resolved).map_err(|e| StampError::Read(resolved.clone(), e))?;

        let suffix = if rule.with_integrity && resolved.extension().is_some_and(|ext| ext == "js")
        {
            format!(
                " integrity=\"{}\" crossorigin=\"anonymous\"",
                checksum::integrity(&bytes)
            )
        } else {
            String::new()
        };

        let new_ref = if rule.with_version {
            let mut params = query_part
                .filter(|q| !q.is_empty())
                .map(query::decode)
                .unwrap_or_default();
            params.insert("v".into(), QueryValue::Single(checksum::fingerprint(&bytes)));
            format!("{file_part}?{}", query::encode(&params, false))
        } else {
            // Versioning off drops any pre-existing query part
            file_part.to_string()
        };

        content = content.replacen(
            &format!("\"{raw}\""),
            &format!("\"{new_ref}\"{suffix}"),
            1,
        );
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::fingerprint;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const JS: &str = "console.log(1);";

    fn stamp(html: &str, rule: &TagRule, dir: &Path) -> String {
        let doc = Html::parse_document(html);
        rewrite_tag(html.to_string(), &doc, rule, dir, &mut |_| {}).unwrap()
    }

    #[test]
    fn test_version_token_appended() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), JS).unwrap();

        let html = r#"<html><head><script src="app.js"></script></head></html>"#;
        let out = stamp(html, &TagRule::new("script[src]", "src"), dir.path());

        let expected = format!(r#"<script src="app.js?v={}"></script>"#, fingerprint(JS.as_bytes()));
        assert!(out.contains(&expected), "got: {out}");
    }

    #[test]
    fn test_existing_query_params_kept_and_v_appended() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), JS).unwrap();

        let html = r#"<script src="app.js?theme=dark"></script>"#;
        let out = stamp(html, &TagRule::new("script[src]", "src"), dir.path());

        let token = fingerprint(JS.as_bytes());
        assert!(out.contains(&format!(r#"src="app.js?theme=dark&v={token}""#)));
    }

    #[test]
    fn test_stale_token_overridden_in_place() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), JS).unwrap();

        let html = r#"<script src="app.js?v=0000000000&theme=dark"></script>"#;
        let out = stamp(html, &TagRule::new("script[src]", "src"), dir.path());

        // `v` keeps its original position, value replaced
        let token = fingerprint(JS.as_bytes());
        assert!(out.contains(&format!(r#"src="app.js?v={token}&theme=dark""#)));
    }

    #[test]
    fn test_no_version_no_integrity_is_identity() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), JS).unwrap();

        let html = r#"<script src="app.js"></script>"#;
        let rule = TagRule::new("script[src]", "src").version(false);
        assert_eq!(stamp(html, &rule, dir.path()), html);
    }

    #[test]
    fn test_version_off_drops_existing_query() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), JS).unwrap();

        let html = r#"<script src="app.js?v=12345"></script>"#;
        let rule = TagRule::new("script[src]", "src").version(false);
        let out = stamp(html, &rule, dir.path());
        assert!(out.contains(r#"src="app.js""#));
        assert!(!out.contains("v=12345"));
    }

    #[test]
    fn test_integrity_on_js() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), JS).unwrap();

        let html = r#"<script src="app.js"></script>"#;
        let rule = TagRule::new("script[src]", "src")
            .integrity(true)
            .version(false);
        let out = stamp(html, &rule, dir.path());

        let expected = format!(
            r#"<script src="app.js" integrity="{}" crossorigin="anonymous"></script>"#,
            checksum::integrity(JS.as_bytes())
        );
        assert!(out.contains(&expected), "got: {out}");
    }

    #[test]
    fn test_integrity_never_added_to_non_js() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("style.css"), "body {}").unwrap();

        let html = r#"<link rel="stylesheet" href="style.css">"#;
        let rule = TagRule::new(r#"link[rel="stylesheet"][href]"#, "href").integrity(true);
        let out = stamp(html, &rule, dir.path());

        assert!(!out.contains("integrity"));
        assert!(!out.contains("crossorigin"));
        assert!(out.contains("style.css?v="));
    }

    #[test]
    fn test_remote_reference_untouched() {
        let dir = TempDir::new().unwrap();
        let html = r#"<script src="https://cdn.example.com/app.js"></script>"#;
        let rule = TagRule::new("script[src]", "src").integrity(true);
        assert_eq!(stamp(html, &rule, dir.path()), html);
    }

    #[test]
    fn test_attribute_absent_skipped() {
        let dir = TempDir::new().unwrap();
        let html = r#"<script>inline()</script>"#;
        assert_eq!(stamp(html, &TagRule::new("script", "src"), dir.path()), html);
    }

    #[test]
    fn test_missing_file_reported_and_untouched() {
        let dir = TempDir::new().unwrap();
        let html = r#"<script src="missing.js"></script>"#;
        let doc = Html::parse_document(html);

        let mut reported: Vec<PathBuf> = Vec::new();
        let out = rewrite_tag(
            html.to_string(),
            &doc,
            &TagRule::new("script[src]", "src"),
            dir.path(),
            &mut |path| reported.push(path.to_path_buf()),
        )
        .unwrap();

        assert_eq!(out, html);
        assert_eq!(reported.len(), 1);
        assert!(reported[0].is_absolute());
        assert!(reported[0].ends_with("missing.js"));
    }

    #[test]
    fn test_multiple_elements_in_document_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), "a").unwrap();
        fs::write(dir.path().join("b.js"), "b").unwrap();

        let html = r#"<script src="a.js"></script><script src="b.js"></script>"#;
        let out = stamp(html, &TagRule::new("script[src]", "src"), dir.path());

        assert!(out.contains(&format!(r#"src="a.js?v={}""#, fingerprint(b"a"))));
        assert!(out.contains(&format!(r#"src="b.js?v={}""#, fingerprint(b"b"))));
    }

    #[test]
    fn test_duplicate_references_both_stamped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), JS).unwrap();

        // Each element iteration replaces the first remaining literal
        // occurrence, so both copies end up stamped.
        let html = r#"<script src="app.js"></script><script src="app.js"></script>"#;
        let out = stamp(html, &TagRule::new("script[src]", "src"), dir.path());

        let token = fingerprint(JS.as_bytes());
        assert_eq!(
            out.matches(&format!(r#"src="app.js?v={token}""#)).count(),
            2
        );
    }

    #[test]
    fn test_malformed_selector_is_error() {
        let dir = TempDir::new().unwrap();
        let html = "<p></p>";
        let doc = Html::parse_document(html);
        let rule = TagRule::new("script[", "src");

        let err =
            rewrite_tag(html.to_string(), &doc, &rule, dir.path(), &mut |_| {}).unwrap_err();
        assert!(matches!(err, StampError::Selector { .. }));
    }

    #[test]
    fn test_reference_in_subdirectory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("js")).unwrap();
        fs::write(dir.path().join("js/app.js"), JS).unwrap();

        let html = r#"<script src="js/app.js"></script>"#;
        let out = stamp(html, &TagRule::new("script[src]", "src"), dir.path());
        assert!(out.contains(&format!(r#"src="js/app.js?v={}""#, fingerprint(JS.as_bytes()))));
    }
}
