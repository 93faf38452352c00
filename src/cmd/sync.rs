//! Sync folder command module

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use wasibase::backup;
use wasibase::{util, Context, SyncCommand};

pub fn run(ctx: &Context, cmd: SyncCommand) -> io::Result<()> {
    match cmd {
        SyncCommand::Set { path } => set(ctx, &path),
        SyncCommand::Run => sync_now(ctx),
        SyncCommand::Status => status(ctx),
        SyncCommand::Disable => {
            let mut config = ctx.load_config();
            config.sync_path = None;
            ctx.save_config(&config)?;
            println!("Sync disabled");
            Ok(())
        }
    }
}

fn set(ctx: &Context, path: &str) -> io::Result<()> {
    let dir = expand_home(path);
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .map_err(|e| util::with_context(e, format!("Failed to create sync folder '{}'", util::display_path(&dir))))?;
        println!("Created folder: {}", util::display_path(&dir));
    }
    let dir = dunce::canonicalize(&dir)?;

    let mut config = ctx.load_config();
    config.sync_path = Some(dir.clone());
    ctx.save_config(&config)?;

    log::info!("sync folder set to {}", util::display_path(&dir));
    println!("Sync folder: {}", util::display_path(&dir));
    Ok(())
}

fn sync_now(ctx: &Context) -> io::Result<()> {
    let dir = configured_dir(ctx)?;
    if !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Sync folder not found: {}", util::display_path(&dir)),
        ));
    }

    let count = backup::sync_to_path(&ctx.store(), &dir)?;
    let file = backup::sync_file(&dir);
    let size = fs::metadata(&file)?.len();

    println!("Synced {} note(s) to {}", count, util::display_path(&file));
    println!("  Size: {}", util::format_bytes(size));
    Ok(())
}

fn status(ctx: &Context) -> io::Result<()> {
    let Some(dir) = ctx.load_config().sync_path else {
        println!("No sync folder configured (use: wasibase sync set <PATH>)");
        return Ok(());
    };

    println!("Sync folder: {}", util::display_path(&dir));
    if !dir.is_dir() {
        println!("  Folder not found");
        return Ok(());
    }

    let file = backup::sync_file(&dir);
    match fs::metadata(&file) {
        Ok(meta) => {
            let modified = meta
                .modified()
                .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|_| "unknown".to_string());
            println!("  Last sync: {} ({})", modified, util::format_bytes(meta.len()));
        }
        Err(_) => println!("  Not synced yet"),
    }
    Ok(())
}

fn configured_dir(ctx: &Context) -> io::Result<PathBuf> {
    ctx.load_config().sync_path.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "No sync folder configured (use: wasibase sync set <PATH>)",
        )
    })
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches(['/', '\\']));
        }
    }
    Path::new(path).to_path_buf()
}
