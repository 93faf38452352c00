use clap::Parser;
use wasibase::{Cli, Command, Context};

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let ctx = Context::new(cli.home.as_deref(), cli.json);

    match cli.command {
        Command::Category(cmd) => cmd::category::run(&ctx, cmd),
        Command::Sub(cmd) => cmd::sub::run(&ctx, cmd),
        Command::Note(cmd) => cmd::note::run(&ctx, cmd),
        Command::Search { query, html } => cmd::search::run(&ctx, &query, html),
        Command::Graph { note } => cmd::graph::run(&ctx, note.as_deref()),
        Command::Stats => cmd::stats::run(&ctx),
        Command::Backup(cmd) => cmd::backup::run(&ctx, cmd),
        Command::Sync(cmd) => cmd::sync::run(&ctx, cmd),
    }
}

mod cmd {
    pub mod backup;
    pub mod category;
    pub mod confirm;
    pub mod graph;
    pub mod note;
    pub mod search;
    pub mod stats;
    pub mod sub;
    pub mod sync;
}
