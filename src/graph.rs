//! Link graph: the category hierarchy plus `[[backlink]]` edges between notes
//!
//! Nodes are emitted in corpus traversal order (sorted category, subcategory,
//! note), hierarchy edges alongside them, then backlink edges in note order.
//! Identical corpora therefore produce identical graphs.

use std::collections::HashMap;
use std::io;

use serde::Serialize;

use crate::constants as C;
use crate::frontmatter;
use crate::links;
use crate::store::Corpus;

pub fn category_id(category: &str) -> String {
    format!("{}{}", C::CATEGORY_ID_PREFIX, category)
}

pub fn subcategory_id(category: &str, subcategory: &str) -> String {
    format!("{}{}/{}", C::SUBCATEGORY_ID_PREFIX, category, subcategory)
}

pub fn note_id(category: &str, subcategory: &str, title: &str) -> String {
    format!("{}{}/{}/{}", C::NOTE_ID_PREFIX, category, subcategory, title)
}

/// A graph node. Serialized with a `type` tag of `category`, `subcategory` or `note`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GraphNode {
    Category {
        id: String,
        label: String,
    },
    SubCategory {
        id: String,
        label: String,
        #[serde(rename = "parentId")]
        parent_id: String,
    },
    Note {
        id: String,
        label: String,
        category: String,
        subcategory: String,
        title: String,
        /// Link titles as written in the note, not yet resolved
        #[serde(rename = "backlinkTitles")]
        backlink_titles: Vec<String>,
    },
}

impl GraphNode {
    pub fn id(&self) -> &str {
        match self {
            GraphNode::Category { id, .. } | GraphNode::SubCategory { id, .. } | GraphNode::Note { id, .. } => id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GraphNode::Category { label, .. }
            | GraphNode::SubCategory { label, .. }
            | GraphNode::Note { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Hierarchy,
    Backlink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

impl GraphEdge {
    fn new(source: impl Into<String>, target: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
        }
    }
}

/// Node and edge counts, per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphCounts {
    pub categories: usize,
    pub subcategories: usize,
    pub notes: usize,
    pub hierarchy_edges: usize,
    pub backlink_edges: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Notes that `id` links to
    pub fn backlinks_from(&self, id: &str) -> Vec<&GraphNode> {
        self.backlink_edges()
            .filter(|e| e.source == id)
            .filter_map(|e| self.node(&e.target))
            .collect()
    }

    /// Notes that link to `id`
    pub fn backlinks_to(&self, id: &str) -> Vec<&GraphNode> {
        self.backlink_edges()
            .filter(|e| e.target == id)
            .filter_map(|e| self.node(&e.source))
            .collect()
    }

    pub fn counts(&self) -> GraphCounts {
        let mut counts = GraphCounts::default();
        for node in &self.nodes {
            match node {
                GraphNode::Category { .. } => counts.categories += 1,
                GraphNode::SubCategory { .. } => counts.subcategories += 1,
                GraphNode::Note { .. } => counts.notes += 1,
            }
        }
        for edge in &self.edges {
            match edge.kind {
                EdgeKind::Hierarchy => counts.hierarchy_edges += 1,
                EdgeKind::Backlink => counts.backlink_edges += 1,
            }
        }
        counts
    }

    fn backlink_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(|e| e.kind == EdgeKind::Backlink)
    }
}

/// Build the graph for the whole corpus.
///
/// Links resolve by case-insensitive title across the entire corpus. When
/// several notes share a title, the one visited last in traversal order wins.
/// Self-links and unresolved titles produce no edge. A note that cannot be
/// read contributes no links; only listing failures abort the build.
pub fn build_graph<S: Corpus + ?Sized>(store: &S) -> io::Result<Graph> {
    let mut graph = Graph::default();
    // Index into graph.nodes of every note, in traversal order
    let mut note_nodes = Vec::new();

    for category in store.list_categories()? {
        let cat_id = category_id(&category);
        graph.nodes.push(GraphNode::Category {
            id: cat_id.clone(),
            label: category.clone(),
        });

        for subcategory in store.list_subcategories(&category)? {
            let sub_id = subcategory_id(&category, &subcategory);
            graph.nodes.push(GraphNode::SubCategory {
                id: sub_id.clone(),
                label: subcategory.clone(),
                parent_id: cat_id.clone(),
            });
            graph.edges.push(GraphEdge::new(cat_id.as_str(), sub_id.as_str(), EdgeKind::Hierarchy));

            for title in store.list_notes(&category, &subcategory)? {
                let id = note_id(&category, &subcategory, &title);
                let backlink_titles = read_links(store, &category, &subcategory, &title);

                note_nodes.push(graph.nodes.len());
                graph.nodes.push(GraphNode::Note {
                    id: id.clone(),
                    label: title.clone(),
                    category: category.clone(),
                    subcategory: subcategory.clone(),
                    title,
                    backlink_titles,
                });
                graph.edges.push(GraphEdge::new(sub_id.as_str(), id, EdgeKind::Hierarchy));
            }
        }
    }

    // Last write wins: later notes in traversal order replace earlier ones
    let mut by_title: HashMap<String, &str> = HashMap::new();
    for &idx in &note_nodes {
        if let GraphNode::Note { id, title, .. } = &graph.nodes[idx] {
            by_title.insert(title.to_lowercase(), id.as_str());
        }
    }

    let mut backlinks = Vec::new();
    for &idx in &note_nodes {
        if let GraphNode::Note { id, backlink_titles, .. } = &graph.nodes[idx] {
            for link in backlink_titles {
                match by_title.get(&link.to_lowercase()) {
                    Some(&target) if target != id.as_str() => {
                        backlinks.push(GraphEdge::new(id.as_str(), target, EdgeKind::Backlink));
                    }
                    Some(_) => {}
                    None => log::debug!("unresolved link [[{}]] in {}", link, id),
                }
            }
        }
    }

    graph.edges.extend(backlinks);

    log::debug!(
        "built graph with {} nodes and {} edges",
        graph.nodes.len(),
        graph.edges.len()
    );
    Ok(graph)
}

fn read_links<S: Corpus + ?Sized>(store: &S, category: &str, subcategory: &str, title: &str) -> Vec<String> {
    match store.read_note(category, subcategory, title) {
        Ok(Some(content)) => links::extract_links(frontmatter::strip_frontmatter(&content)),
        Ok(None) => {
            log::warn!("note {}/{}/{} vanished during graph build", category, subcategory, title);
            Vec::new()
        }
        Err(e) => {
            log::warn!("skipping links of {}/{}/{}: {}", category, subcategory, title, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NoteStore;
    use tempfile::TempDir;

    fn store(temp_dir: &TempDir) -> NoteStore {
        NoteStore::new(temp_dir.path().join("notes"))
    }

    fn backlinks(graph: &Graph) -> Vec<(&str, &str)> {
        graph
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Backlink)
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect()
    }

    #[test]
    fn test_empty_corpus() {
        let temp_dir = TempDir::new().unwrap();
        let graph = build_graph(&store(&temp_dir)).unwrap();
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_self_link_suppressed() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.write_note("Math", "Algebra", "Vectors", "I link to [[Vectors]] myself").unwrap();

        let graph = build_graph(&store).unwrap();

        assert!(backlinks(&graph).is_empty());
        assert_eq!(
            graph.edges,
            vec![
                GraphEdge::new("category:Math", "subcategory:Math/Algebra", EdgeKind::Hierarchy),
                GraphEdge::new("subcategory:Math/Algebra", "note:Math/Algebra/Vectors", EdgeKind::Hierarchy),
            ]
        );
        assert_eq!(
            graph.nodes[2],
            GraphNode::Note {
                id: "note:Math/Algebra/Vectors".to_string(),
                label: "Vectors".to_string(),
                category: "Math".to_string(),
                subcategory: "Algebra".to_string(),
                title: "Vectors".to_string(),
                backlink_titles: vec!["Vectors".to_string()],
            }
        );
    }

    #[test]
    fn test_backlink_resolves_case_insensitively() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.write_note("X", "Y", "A", "see [[b]]").unwrap();
        store.write_note("X", "Y", "B", "target").unwrap();

        let graph = build_graph(&store).unwrap();
        assert_eq!(backlinks(&graph), vec![("note:X/Y/A", "note:X/Y/B")]);
    }

    #[test]
    fn test_unresolved_link_dropped() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.write_note("X", "Y", "A", "see [[B]]").unwrap();

        let graph = build_graph(&store).unwrap();
        assert!(backlinks(&graph).is_empty());
        assert_eq!(graph.counts().notes, 1);
    }

    #[test]
    fn test_duplicate_titles_last_in_traversal_wins() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.write_note("Math", "Analysis", "Calc", "one").unwrap();
        store.write_note("Math", "Calculus", "Calc", "two").unwrap();
        store.write_note("Art", "Notes", "Ref", "see [[Calc]]").unwrap();

        let graph = build_graph(&store).unwrap();
        assert_eq!(backlinks(&graph), vec![("note:Art/Notes/Ref", "note:Math/Calculus/Calc")]);
    }

    #[test]
    fn test_duplicate_titles_across_categories() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.write_note("Zoology", "Misc", "calc", "lower").unwrap();
        store.write_note("Algebra", "Misc", "Calc", "upper").unwrap();
        store.write_note("Algebra", "Misc", "Index", "[[CALC]]").unwrap();

        let graph = build_graph(&store).unwrap();
        assert_eq!(backlinks(&graph), vec![("note:Algebra/Misc/Index", "note:Zoology/Misc/calc")]);
    }

    #[test]
    fn test_links_inside_header_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.write_note("X", "Y", "A", "---\ntitle: '[[B]]'\n---\n\nno links").unwrap();
        store.write_note("X", "Y", "B", "").unwrap();

        let graph = build_graph(&store).unwrap();
        assert!(backlinks(&graph).is_empty());
    }

    #[test]
    fn test_unreadable_note_does_not_abort() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.write_note("X", "Y", "A", "see [[B]]").unwrap();
        store.write_note("X", "Y", "B", "see [[A]]").unwrap();
        // Invalid UTF-8 fails to read as text
        std::fs::write(store.note_path("X", "Y", "B"), [0xff, 0xfe, 0x00]).unwrap();

        let graph = build_graph(&store).unwrap();
        assert_eq!(graph.counts().notes, 2);
        assert_eq!(backlinks(&graph), vec![("note:X/Y/A", "note:X/Y/B")]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.write_note("B", "S", "One", "[[Two]] [[Three]]").unwrap();
        store.write_note("A", "S", "Two", "[[One]]").unwrap();
        store.write_note("A", "T", "Three", "[[one]] [[Two]]").unwrap();

        let first = build_graph(&store).unwrap();
        let second = build_graph(&store).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_queries() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.write_note("X", "Y", "A", "[[B]] [[C]]").unwrap();
        store.write_note("X", "Y", "B", "[[C]]").unwrap();
        store.write_note("X", "Z", "C", "").unwrap();

        let graph = build_graph(&store).unwrap();
        let c = note_id("X", "Z", "C");
        let into_c: Vec<&str> = graph.backlinks_to(&c).iter().map(|n| n.label()).collect();
        assert_eq!(into_c, vec!["A", "B"]);

        let from_a: Vec<&str> = graph.backlinks_from(&note_id("X", "Y", "A")).iter().map(|n| n.label()).collect();
        assert_eq!(from_a, vec!["B", "C"]);

        assert_eq!(
            graph.counts(),
            GraphCounts {
                categories: 1,
                subcategories: 2,
                notes: 3,
                hierarchy_edges: 5,
                backlink_edges: 3,
            }
        );
    }

    #[test]
    fn test_json_shape() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.write_note("X", "Y", "A", "[[B]]").unwrap();
        store.write_note("X", "Y", "B", "").unwrap();

        let json = serde_json::to_value(build_graph(&store).unwrap()).unwrap();
        assert_eq!(json["nodes"][0], serde_json::json!({"id": "category:X", "label": "X", "type": "category"}));
        assert_eq!(json["nodes"][1]["type"], "subcategory");
        assert_eq!(json["nodes"][1]["parentId"], "category:X");
        assert_eq!(json["nodes"][2]["type"], "note");
        assert_eq!(json["nodes"][2]["backlinkTitles"], serde_json::json!(["B"]));
        assert_eq!(
            json["edges"].as_array().unwrap().last().unwrap(),
            &serde_json::json!({"source": "note:X/Y/A", "target": "note:X/Y/B", "type": "backlink"})
        );
    }

    /// Lists "Gone" next to "Here", but "Gone" has vanished by the time it is read
    struct VanishingCorpus;

    impl Corpus for VanishingCorpus {
        fn list_categories(&self) -> io::Result<Vec<String>> {
            Ok(vec!["C".to_string()])
        }

        fn list_subcategories(&self, _category: &str) -> io::Result<Vec<String>> {
            Ok(vec!["S".to_string()])
        }

        fn list_notes(&self, _category: &str, _subcategory: &str) -> io::Result<Vec<String>> {
            Ok(vec!["Gone".to_string(), "Here".to_string()])
        }

        fn read_note(&self, _category: &str, _subcategory: &str, title: &str) -> io::Result<Option<String>> {
            Ok((title == "Here").then(|| "gone is mentioned: [[Gone]]".to_string()))
        }
    }

    #[test]
    fn test_note_vanishing_mid_build() {
        let graph = build_graph(&VanishingCorpus).unwrap();

        assert_eq!(graph.counts().notes, 2);
        match graph.node("note:C/S/Gone") {
            Some(GraphNode::Note { backlink_titles, .. }) => assert!(backlink_titles.is_empty()),
            other => panic!("unexpected node: {:?}", other),
        }
        assert_eq!(backlinks(&graph), vec![("note:C/S/Here", "note:C/S/Gone")]);
    }
}
