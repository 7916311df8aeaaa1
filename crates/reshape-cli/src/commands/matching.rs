use super::{load_document, resolve};
use miette::{IntoDiagnostic, Result};
use reshape_ast::{matches, NodeId};
use reshape_core::Config;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Match result for JSON output.
#[derive(Serialize)]
struct MatchResult {
    matches: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    node: Option<u32>,
}

/// Run the match command.
///
/// Without `--node` the candidate file is compared as raw JSON. With it, the
/// candidate file is read as a document and the given node is converted to
/// its plain mapping form first. Exits with status 1 when there is no match.
pub fn run(config: &Config, pattern: &Path, candidate: &Path, node: Option<u32>, json: bool) -> Result<()> {
    let pattern = read_json(&resolve(&config.cwd, pattern))?;

    let candidate = match node {
        Some(id) => {
            let doc = load_document(&config.cwd, candidate)?;
            let id = NodeId::new(id);
            if doc.tree.get(id).is_none() {
                return Err(miette::miette!("node {} is not in the document", id));
            }
            doc.tree.to_value(id)
        }
        None => read_json(&resolve(&config.cwd, candidate))?,
    };

    let matched = matches(Some(&pattern), &candidate);
    debug!(matched, "compared pattern");

    if json {
        let result = MatchResult { matches: matched, node };
        println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
    } else {
        println!("{matched}");
    }

    if !matched {
        std::process::exit(1);
    }
    Ok(())
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| miette::miette!("Failed to parse {}: {}", path.display(), e))
}
