//! Subcategory command module

use std::io;

use wasibase::{Context, Corpus, SubCommand};

pub fn run(ctx: &Context, cmd: SubCommand) -> io::Result<()> {
    let store = ctx.store();

    match cmd {
        SubCommand::List { category } => {
            let subs = store.list_subcategories(&category)?;
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&subs)?);
            } else if subs.is_empty() {
                println!("(no subcategories in '{}')", category);
            } else {
                for name in subs {
                    let notes = store.list_notes(&category, &name)?.len();
                    println!("{} ({} notes)", name, notes);
                }
            }
        }
        SubCommand::Create { category, name } => {
            store.create_subcategory(&category, &name)?;
            println!("Created subcategory: {}/{}", category, name);
        }
        SubCommand::Delete { category, name, yes } => {
            super::confirm::require(yes, &format!("delete subcategory '{}/{}' and all its notes", category, name))?;
            if store.delete_subcategory(&category, &name)? {
                println!("Deleted subcategory: {}/{}", category, name);
            } else {
                println!("Subcategory '{}/{}' does not exist", category, name);
            }
        }
    }

    Ok(())
}
