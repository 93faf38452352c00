//! Category command module

use std::io;

use wasibase::{CategoryCommand, Context, Corpus};

pub fn run(ctx: &Context, cmd: CategoryCommand) -> io::Result<()> {
    let store = ctx.store();

    match cmd {
        CategoryCommand::List => {
            let categories = store.list_categories()?;
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else if categories.is_empty() {
                println!("(no categories yet)");
            } else {
                for name in categories {
                    let subs = store.list_subcategories(&name)?.len();
                    println!("{} ({} subcategories)", name, subs);
                }
            }
        }
        CategoryCommand::Create { name } => {
            store.create_category(&name)?;
            println!("Created category: {}", name);
        }
        CategoryCommand::Delete { name, yes } => {
            super::confirm::require(yes, &format!("delete category '{}' and all its notes", name))?;
            if store.delete_category(&name)? {
                println!("Deleted category: {}", name);
            } else {
                println!("Category '{}' does not exist", name);
            }
        }
    }

    Ok(())
}
