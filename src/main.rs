//! hashstamp - stamp asset references in an HTML file.

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use hashstamp::cli::Cli;
use hashstamp::{Options, RulesFile, TagRule, debug, log, logger, run};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let rules = load_rules(&cli)?;
    debug!("stamp"; "{} rule(s) against {}", rules.len(), cli.html_file.display());

    let options = Options::new(&cli.html_file)
        .write(cli.write)
        .rules(rules)
        .on_missing(|path| log!("missing"; "{}", path.display()));

    let content = run(options)
        .with_context(|| format!("failed to stamp `{}`", cli.html_file.display()))?;

    if cli.write {
        log!("stamp"; "updated {}", cli.html_file.display());
    } else {
        print!("{content}");
    }

    Ok(())
}

/// Resolve the rule set: the TOML rules file when given, otherwise the
/// defaults with `--integrity` applied to the script rule.
fn load_rules(cli: &Cli) -> Result<Vec<TagRule>> {
    match &cli.config {
        Some(path) => {
            let rules = RulesFile::load(path)
                .with_context(|| format!("failed to load rules from `{}`", path.display()))?;
            Ok(rules.tags)
        }
        None => Ok(vec![
            TagRule::new("script[src]", "src").integrity(cli.integrity),
            TagRule::new(r#"link[rel="stylesheet"][href]"#, "href"),
        ]),
    }
}
