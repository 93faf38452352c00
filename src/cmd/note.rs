//! Note command module

use std::io::{self, Read};

use serde::Serialize;
use wasibase::constants as C;
use wasibase::frontmatter;
use wasibase::{markdown, util, Context, Corpus, NoteCommand};

#[derive(Serialize)]
struct ListedNote {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<String>,
}

pub fn run(ctx: &Context, cmd: NoteCommand) -> io::Result<()> {
    match cmd {
        NoteCommand::List { category, subcategory, preview } => list(ctx, &category, &subcategory, preview),
        NoteCommand::Show { category, subcategory, title, html } => show(ctx, &category, &subcategory, &title, html),
        NoteCommand::Save { category, subcategory, title, content } => {
            save(ctx, &category, &subcategory, &title, content)
        }
        NoteCommand::Delete { category, subcategory, title, yes } => {
            super::confirm::require(yes, &format!("delete note '{}/{}/{}'", category, subcategory, title))?;
            if ctx.store().delete_note(&category, &subcategory, &title)? {
                println!("Deleted note: {}/{}/{}", category, subcategory, title);
            } else {
                println!("Note '{}/{}/{}' does not exist", category, subcategory, title);
            }
            Ok(())
        }
    }
}

fn list(ctx: &Context, category: &str, subcategory: &str, with_preview: bool) -> io::Result<()> {
    let store = ctx.store();
    let mut notes = Vec::new();

    for title in store.list_notes(category, subcategory)? {
        let preview = if with_preview {
            Some(markdown::note_preview(&store, category, subcategory, &title, C::LIST_PREVIEW_CHARS))
        } else {
            None
        };
        notes.push(ListedNote { title, preview });
    }

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("(no notes in '{}/{}')", category, subcategory);
    } else {
        for note in notes {
            match note.preview {
                Some(p) if !p.is_empty() => println!("{}  -  {}", note.title, p),
                _ => println!("{}", note.title),
            }
        }
    }

    Ok(())
}

fn show(ctx: &Context, category: &str, subcategory: &str, title: &str, html: bool) -> io::Result<()> {
    let content = ctx.store().read_note(category, subcategory, title)?.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("Note '{}/{}/{}' not found", category, subcategory, title),
        )
    })?;

    if html {
        print!("{}", markdown::render_html(frontmatter::strip_frontmatter(&content)));
    } else {
        print!("{}", content);
        if !content.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}

fn save(ctx: &Context, category: &str, subcategory: &str, title: &str, content: Option<String>) -> io::Result<()> {
    let input = read_content(content)?;
    let path = ctx.store().save_note(category, subcategory, title.trim(), &input)?;

    // Output full path for shell pipeline compatibility
    println!("{}", util::display_path(&path));

    Ok(())
}

/// Read content from argument or stdin.
/// - Some("-") -> read from stdin
/// - Some(text) -> use the text directly
/// - None -> read from stdin (empty string if no data)
fn read_content(content: Option<String>) -> io::Result<String> {
    match content {
        Some(arg) if arg == "-" => read_from_stdin(),
        Some(text) => Ok(text),
        None => match read_from_stdin() {
            Ok(s) => Ok(s),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(String::new()),
            Err(e) => Err(e),
        },
    }
}

fn read_from_stdin() -> io::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
