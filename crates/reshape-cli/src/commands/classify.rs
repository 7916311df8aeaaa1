use super::load_document;
use miette::{IntoDiagnostic, Result};
use reshape_ast::{inner_body, is_literal, root_identifier, NodeId};
use reshape_core::Config;
use serde::Serialize;
use std::path::Path;

/// Classification report for one node.
#[derive(Serialize)]
struct Classification {
    node: u32,
    #[serde(rename = "type")]
    type_name: &'static str,
    literal: bool,
    statement: bool,
    member_expression: bool,
    member_assignment: bool,
    has_statements: bool,
    inner_body: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    root_identifier: Option<u32>,
}

pub fn run(config: &Config, document: &Path, node: u32) -> Result<()> {
    let doc = load_document(&config.cwd, document)?;
    let id = NodeId::new(node);
    let Some(target) = doc.tree.get(id) else {
        return Err(miette::miette!("node {} is not in the document", id));
    };

    let root = if target.is_member_expression() || target.is_member_assignment() {
        Some(root_identifier(&doc.tree, id).into_diagnostic()?)
    } else {
        None
    };

    let report = Classification {
        node,
        type_name: target.type_name(),
        literal: is_literal(&doc.tree, id),
        statement: target.is_statement(),
        member_expression: target.is_member_expression(),
        member_assignment: target.is_member_assignment(),
        has_statements: target.has_statements(),
        inner_body: inner_body(&doc.tree, id).unwrap_or(id).index() as u32,
        root_identifier: root.map(|r| r.index() as u32),
    };
    println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
    Ok(())
}
