use clap::{Parser, Subcommand};

/// wasibase - personal notes in categories, with search and a link graph
///
/// ## Layout
///
/// Notes live under `<home>/notes/<category>/<subcategory>/<title>.md`.
/// Link notes to each other with `[[Title]]`.
///
/// ```bash
/// wasibase category create Math
/// wasibase note save Math Algebra Vectors --content "See [[Matrices]]"
/// wasibase note save Math Algebra Matrices <<EOF
/// # Matrices
/// Rectangular arrays of numbers.
/// EOF
/// wasibase search "matri"
/// wasibase graph --note Math/Algebra/Matrices
/// ```
///
/// ## Backup & Sync
///
/// ```bash
/// wasibase backup create                 # ~/.wasibase/backups/wasibase-backup-<time>.json
/// wasibase backup restore FILE --yes
/// wasibase sync set ~/Dropbox/Wasibase   # remember a sync folder
/// wasibase sync run                      # write wasibase-backup.json there
/// ```
///
/// ## Environment Variables
///
/// - `WASIBASE_HOME`: Base directory (default: ~/.wasibase)
/// - `RUST_LOG`: Log verbosity (default: warn)
#[derive(Parser, Debug)]
#[command(name = "wasibase")]
#[command(version = "0.1.0")]
#[command(about = "Personal notes in categories, with search and a link graph")]
pub struct Cli {
    /// Base directory (default: ~/.wasibase or $WASIBASE_HOME)
    #[arg(long, value_name = "PATH", global = true)]
    pub home: Option<String>,

    /// Output in JSON format (for scripting)
    #[arg(short = 'j', long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage top-level categories
    #[command(subcommand, alias = "cat")]
    Category(CategoryCommand),

    /// Manage subcategories
    #[command(subcommand, alias = "subcategory")]
    Sub(SubCommand),

    /// Create, show and delete notes
    #[command(subcommand, alias = "n")]
    Note(NoteCommand),

    /// Search note titles and contents
    #[command(alias = "s")]
    Search {
        /// Text to look for (case-insensitive)
        query: String,

        /// Print results as an HTML fragment
        #[arg(long)]
        html: bool,
    },

    /// Show the link graph
    #[command(alias = "g")]
    Graph {
        /// Show the links of one note (CATEGORY/SUBCATEGORY/TITLE)
        #[arg(long, value_name = "NOTE")]
        note: Option<String>,
    },

    /// Count categories, subcategories and notes
    Stats,

    /// Create, list and restore backups
    #[command(subcommand)]
    Backup(BackupCommand),

    /// Mirror a backup into a cloud folder
    #[command(subcommand)]
    Sync(SyncCommand),
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// List all categories
    #[command(alias = "ls")]
    List,

    /// Create a category
    Create {
        name: String,
    },

    /// Delete a category and every note in it
    #[command(alias = "rm")]
    Delete {
        name: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// List the subcategories of a category
    #[command(alias = "ls")]
    List {
        category: String,
    },

    /// Create a subcategory (and its category if needed)
    Create {
        category: String,
        name: String,
    },

    /// Delete a subcategory and every note in it
    #[command(alias = "rm")]
    Delete {
        category: String,
        name: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// List the notes of a subcategory
    #[command(alias = "ls")]
    List {
        category: String,
        subcategory: String,

        /// Show a short text preview next to each title
        #[arg(short, long)]
        preview: bool,
    },

    /// Print a note
    #[command(alias = "p")]
    Show {
        category: String,
        subcategory: String,
        title: String,

        /// Render the body as HTML
        #[arg(long)]
        html: bool,
    },

    /// Create or overwrite a note (body from --content or stdin)
    Save {
        category: String,
        subcategory: String,
        title: String,

        /// Note body ("-" reads stdin)
        #[arg(short, long)]
        content: Option<String>,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        category: String,
        subcategory: String,
        title: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum BackupCommand {
    /// Write a backup of all notes
    Create {
        /// Target file or directory (default: <home>/backups/)
        path: Option<String>,
    },

    /// Restore notes from a backup file (overwrites notes with the same title)
    Restore {
        path: String,

        /// Confirm the restore
        #[arg(long)]
        yes: bool,
    },

    /// List backups in <home>/backups/
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand, Debug)]
pub enum SyncCommand {
    /// Set the sync folder (created if missing)
    Set {
        path: String,
    },

    /// Write the backup into the sync folder now
    Run,

    /// Show the sync folder and its last backup
    Status,

    /// Forget the sync folder
    Disable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_save() {
        let cli = Cli::try_parse_from([
            "wasibase", "--home", "/tmp/wb", "note", "save", "Math", "Algebra", "Vectors", "-c", "body",
        ])
        .unwrap();
        assert_eq!(cli.home.as_deref(), Some("/tmp/wb"));
        match cli.command {
            Command::Note(NoteCommand::Save { category, subcategory, title, content }) => {
                assert_eq!((category.as_str(), subcategory.as_str(), title.as_str()), ("Math", "Algebra", "Vectors"));
                assert_eq!(content.as_deref(), Some("body"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_json_after_subcommand() {
        let cli = Cli::try_parse_from(["wasibase", "graph", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Graph { note: None }));
    }

    #[test]
    fn test_delete_requires_name() {
        assert!(Cli::try_parse_from(["wasibase", "category", "delete"]).is_err());
        let cli = Cli::try_parse_from(["wasibase", "cat", "rm", "Math", "--yes"]).unwrap();
        assert!(matches!(cli.command, Command::Category(CategoryCommand::Delete { yes: true, .. })));
    }
}
