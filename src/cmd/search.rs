//! Search command module

use std::io;

use wasibase::search::{preview_html, preview_plain};
use wasibase::{util, Context};

pub fn run(ctx: &Context, query: &str, html: bool) -> io::Result<()> {
    let results = wasibase::search(&ctx.store(), query)?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if html {
        println!("<ul class=\"results\">");
        for r in &results {
            println!(
                "  <li><div class=\"path\">{} / {}</div><div class=\"title\">{}</div><div class=\"preview\">{}</div></li>",
                util::escape_html(&r.category),
                util::escape_html(&r.subcategory),
                util::escape_html(&r.title),
                preview_html(&r.preview)
            );
        }
        println!("</ul>");
        return Ok(());
    }

    if results.is_empty() {
        println!("No results for '{}'", query.trim());
        return Ok(());
    }

    println!("{} result(s) for '{}':", results.len(), query.trim());
    for r in &results {
        println!();
        println!("{} / {} / {}", r.category, r.subcategory, r.title);
        if !r.preview.is_empty() {
            println!("  {}", preview_plain(&r.preview));
        }
    }

    Ok(())
}
