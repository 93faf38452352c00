//! Graph command module

use std::io;

use wasibase::graph::note_id;
use wasibase::{build_graph, Context, EdgeKind, GraphNode, NoteRef};

pub fn run(ctx: &Context, note: Option<&str>) -> io::Result<()> {
    let graph = build_graph(&ctx.store())?;

    if let Some(reference) = note {
        let note = NoteRef::parse(reference).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Expected CATEGORY/SUBCATEGORY/TITLE, got '{}'", reference),
            )
        })?;
        let id = note_id(&note.category, &note.subcategory, &note.title);
        if graph.node(&id).is_none() {
            return Err(io::Error::new(io::ErrorKind::NotFound, format!("Note '{}' not found", note)));
        }

        let outgoing = graph.backlinks_from(&id);
        let incoming = graph.backlinks_to(&id);

        if ctx.json {
            let value = serde_json::json!({ "id": id, "linksTo": outgoing, "linkedFrom": incoming });
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(());
        }

        println!("{}", note);
        println!("  links to:");
        print_notes(&outgoing);
        println!("  linked from:");
        print_notes(&incoming);
        return Ok(());
    }

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&graph)?);
        return Ok(());
    }

    let counts = graph.counts();
    println!(
        "{} categories, {} subcategories, {} notes, {} links",
        counts.categories, counts.subcategories, counts.notes, counts.backlink_edges
    );

    for edge in graph.edges.iter().filter(|e| e.kind == EdgeKind::Backlink) {
        println!("  {} -> {}", display_id(&edge.source), display_id(&edge.target));
    }

    Ok(())
}

fn print_notes(nodes: &[&GraphNode]) {
    if nodes.is_empty() {
        println!("    (none)");
    }
    for node in nodes {
        println!("    {}", display_id(node.id()));
    }
}

fn display_id(id: &str) -> &str {
    id.split_once(':').map(|(_, path)| path).unwrap_or(id)
}
