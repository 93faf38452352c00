pub mod backup;
pub mod cli;
pub mod config;
pub mod constants;
pub mod frontmatter;
pub mod graph;
pub mod links;
pub mod markdown;
pub mod search;
pub mod store;
pub mod util;

pub use cli::{BackupCommand, CategoryCommand, Cli, Command, NoteCommand, SubCommand, SyncCommand};
pub use config::{base_path, Config, Context, Paths};
pub use graph::{build_graph, EdgeKind, Graph, GraphEdge, GraphNode};
pub use links::extract_links;
pub use search::{search, SearchResult};
pub use store::{Corpus, NoteRef, NoteStore, Stats};
