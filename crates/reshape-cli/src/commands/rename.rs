use super::load_document;
use miette::{IntoDiagnostic, Result};
use reshape_core::Config;
use std::path::Path;
use tracing::info_span;

/// Run the rename command: rename the document and print it to stdout.
pub fn run(config: &Config, document: &Path) -> Result<()> {
    let span = info_span!("rename", cmd = "rename", file = %document.display());
    let _guard = span.enter();

    let mut doc = load_document(&config.cwd, document)?;
    doc.rename(config).into_diagnostic()?;
    println!("{}", doc.to_json().into_diagnostic()?);
    Ok(())
}
