//! Rendering / exploration helpers.
//!
//! This module intentionally lives in the CLI crate: it is presentation
//! tooling, and the projection engine should stay free of cosmetic concerns.
//! The engine exposes `kind` on every node; the color/shape maps here are the
//! renderer's own configuration.
//!
//! Output formats:
//! - Graphviz DOT (best-in-class layout, external tooling)
//! - Self-contained HTML explorer (graph JSON embedded in a template)
//! - JSON (for custom frontends)

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::collections::HashSet;

use storygraph_model::EntityKind;
use storygraph_projection::{Graph, GraphNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Dot,
    Html,
    Json,
}

impl RenderFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dot" => Ok(Self::Dot),
            "html" | "htm" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(anyhow!(
                "unknown render format `{other}` (expected dot|html|json)"
            )),
        }
    }
}

/// Fill color per entity kind.
pub fn kind_color(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Person => "#FFD700",
        EntityKind::Event => "#87CEEB",
        EntityKind::Era => "#FFB6C1",
        EntityKind::Location => "#90EE90",
        EntityKind::Object => "#FFA07A",
    }
}

/// Node shape per entity kind (vis-network vocabulary; DOT maps it).
pub fn kind_shape(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Person => "dot",
        EntityKind::Event => "diamond",
        EntityKind::Era => "box",
        EntityKind::Location => "triangle",
        EntityKind::Object => "ellipse",
    }
}

/// Type-checkbox filtering: keep only nodes of the given kinds, dropping
/// edges that lose an endpoint. Applied after projection, before rendering.
pub fn retain_kinds(graph: Graph, keep: &HashSet<EntityKind>) -> Graph {
    let nodes: Vec<GraphNode> = graph
        .nodes
        .into_iter()
        .filter(|n| keep.contains(&n.kind))
        .collect();
    let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let edges = graph
        .edges
        .into_iter()
        .filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
        .collect();
    Graph { nodes, edges }
}

// ============================================================================
// DOT
// ============================================================================

pub fn render_dot(graph: &Graph) -> String {
    fn dot_escape(s: &str) -> String {
        s.replace('\\', "\\\\").replace('"', "\\\"")
    }

    fn dot_shape(kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::Person => "circle",
            EntityKind::Event => "diamond",
            EntityKind::Era => "box",
            EntityKind::Location => "triangle",
            EntityKind::Object => "ellipse",
        }
    }

    let mut out = String::new();
    out.push_str("digraph storygraph {\n");
    out.push_str("  rankdir=LR;\n");
    out.push_str("  node [style=filled, fontname=\"Helvetica\"];\n");
    out.push_str("  edge [fontname=\"Helvetica\"];\n\n");

    for n in &graph.nodes {
        let mut attrs: Vec<String> = Vec::new();
        attrs.push(format!("label=\"{}\"", dot_escape(&n.label)));
        attrs.push(format!("tooltip=\"{}\"", dot_escape(&n.tooltip)));
        attrs.push(format!("shape={}", dot_shape(n.kind)));
        attrs.push(format!("fillcolor=\"{}\"", kind_color(n.kind)));
        if let Some(link) = &n.link {
            attrs.push(format!("URL=\"{}\"", dot_escape(link)));
        }
        out.push_str(&format!("  \"{}\" [{}];\n", dot_escape(&n.id), attrs.join(", ")));
    }

    out.push('\n');
    for e in &graph.edges {
        let mut attrs: Vec<String> = Vec::new();
        attrs.push(format!("label=\"{}\"", dot_escape(&e.label)));
        if !e.directed {
            attrs.push("dir=none".to_string());
        }
        out.push_str(&format!(
            "  \"{}\" -> \"{}\" [{}];\n",
            dot_escape(&e.source),
            dot_escape(&e.target),
            attrs.join(", ")
        ));
    }

    out.push_str("}\n");
    out
}

// ============================================================================
// JSON
// ============================================================================

pub fn render_json(graph: &Graph) -> Result<String> {
    Ok(serde_json::to_string_pretty(graph)?)
}

// ============================================================================
// HTML
// ============================================================================

#[derive(Serialize)]
struct VisNode<'a> {
    id: &'a str,
    label: &'a str,
    title: &'a str,
    group: &'a str,
    color: &'static str,
    shape: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

#[derive(Serialize)]
struct VisEdge<'a> {
    from: &'a str,
    to: &'a str,
    label: &'a str,
    arrows: &'static str,
}

/// Self-contained explorer page: node/edge JSON embedded in the template.
///
/// `</` is escaped in the embedded JSON to avoid accidentally closing the
/// `<script>` tag if graph data contains `</script>`.
pub fn render_html(graph: &Graph) -> Result<String> {
    let nodes: Vec<VisNode<'_>> = graph
        .nodes
        .iter()
        .map(|n| VisNode {
            id: &n.id,
            label: &n.label,
            title: &n.tooltip,
            group: n.kind.tag(),
            color: kind_color(n.kind),
            shape: kind_shape(n.kind),
            url: n.link.as_deref(),
        })
        .collect();
    let edges: Vec<VisEdge<'_>> = graph
        .edges
        .iter()
        .map(|e| VisEdge {
            from: &e.source,
            to: &e.target,
            label: &e.label,
            arrows: if e.directed { "to" } else { "" },
        })
        .collect();

    let nodes_json = serde_json::to_string(&nodes)?.replace("</", "<\\/");
    let edges_json = serde_json::to_string(&edges)?.replace("</", "<\\/");

    let template = include_str!("../templates/graph_explorer.html");
    let mut html = template.to_string();
    html = html.replace("{{NODES_JSON}}", &nodes_json);
    html = html.replace("{{EDGES_JSON}}", &edges_json);
    html = html.replace("{{NODES_COUNT}}", &graph.nodes.len().to_string());
    html = html.replace("{{EDGES_COUNT}}", &graph.edges.len().to_string());
    Ok(html)
}

// ============================================================================
// Tests
// ============================================================================
