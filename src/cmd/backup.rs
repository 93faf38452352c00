//! Backup command module

use std::fs;
use std::io;
use std::path::PathBuf;

use wasibase::backup;
use wasibase::constants as C;
use wasibase::{util, BackupCommand, Context};

pub fn run(ctx: &Context, cmd: BackupCommand) -> io::Result<()> {
    match cmd {
        BackupCommand::Create { path } => create(ctx, path),
        BackupCommand::Restore { path, yes } => restore(ctx, &path, yes),
        BackupCommand::List => list(ctx),
    }
}

fn create(ctx: &Context, path: Option<String>) -> io::Result<()> {
    let file = match path {
        Some(p) => {
            let p = PathBuf::from(p);
            if p.extension().map(|ext| ext == C::BACKUP_EXTENSION).unwrap_or(false) {
                p
            } else {
                backup::default_backup_file(&p)
            }
        }
        None => backup::default_backup_file(&ctx.paths.backups),
    };

    let count = backup::save_backup_to_file(&ctx.store(), &file)?;
    let size = fs::metadata(&file)?.len();

    println!("Backup created: {}", util::display_path(&file));
    println!("  Notes: {}", count);
    println!("  Size: {}", util::format_bytes(size));
    Ok(())
}

fn restore(ctx: &Context, path: &str, yes: bool) -> io::Result<()> {
    let file = PathBuf::from(path);
    if !file.is_file() {
        return Err(io::Error::new(io::ErrorKind::NotFound, format!("Backup file not found: {}", path)));
    }

    let data = backup::load_backup_from_file(&file)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid backup file: {}", path)))?;

    println!("Backup created: {}", if data.created.is_empty() { "unknown" } else { data.created.as_str() });
    println!("  Notes: {}", data.notes.len());

    super::confirm::require(yes, "restore (notes with the same title are overwritten)")?;

    let restored = backup::restore_backup(&ctx.store(), &data)?;
    println!("Restored {} note(s)", restored);
    Ok(())
}

fn list(ctx: &Context) -> io::Result<()> {
    let files = backup::list_backups(&ctx.paths.backups)?;

    if ctx.json {
        let names: Vec<String> = files.iter().map(|p| util::display_path(p)).collect();
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    if files.is_empty() {
        println!("No backups in {}", util::display_path(&ctx.paths.backups));
        return Ok(());
    }

    for file in files {
        let size = fs::metadata(&file).map(|m| m.len()).unwrap_or(0);
        let name = file.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        println!("{}  ({})", name, util::format_bytes(size));
    }
    Ok(())
}
