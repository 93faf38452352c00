//! Stats command module

use std::io;

use wasibase::{Context, Corpus};

pub fn run(ctx: &Context) -> io::Result<()> {
    let stats = ctx.store().stats()?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{} notes in {} categories ({} subcategories)", stats.notes, stats.categories, stats.subcategories);
    }

    Ok(())
}
