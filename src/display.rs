use crate::games::Entry;
use crate::utils::{format_bytes, format_unix_timestamp, path_to_string};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Print the scan summary and the numbered game list to stdout.
pub fn display_games(output_file: &Path, games: &[Entry], detailed: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_games(&mut out, output_file, games, detailed)?;
    out.flush()
}

pub fn write_games<W: Write>(
    out: &mut W,
    output_file: &Path,
    games: &[Entry],
    detailed: bool,
) -> io::Result<()> {
    writeln!(out, "File '{}' Created.", output_file.display())?;
    writeln!(out, "{} Games found!", games.len())?;
    writeln!(out)?;

    for (i, game) in games.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, game.name)?;
        if detailed {
            writeln!(out, "     App ID:       {}", game.steam_id)?;
            writeln!(out, "     Install Path: {}", path_to_string(&game.install_path))?;
            if let Some(size) = game.size_on_disk_bytes() {
                writeln!(out, "     Size:         {}", format_bytes(size))?;
            }
            if let Some(updated) = game.last_updated.as_deref().and_then(format_unix_timestamp) {
                writeln!(out, "     Last Updated: {}", updated)?;
            }
        }
    }
    Ok(())
}

/// Print discovered library folders to stdout.
pub fn display_libraries(libraries: &[PathBuf]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_libraries(&mut out, libraries)?;
    out.flush()
}

pub fn write_libraries<W: Write>(out: &mut W, libraries: &[PathBuf]) -> io::Result<()> {
    writeln!(out, "{} Steam library folder(s):", libraries.len())?;
    for (i, lib) in libraries.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, path_to_string(lib))?;
    }
    Ok(())
}
