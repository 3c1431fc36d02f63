//! The `backup` command: copy every tracked dotfile into the destination.
//!
//! Failure policy, in manifest order: a manifest that cannot be loaded or a
//! destination that does not resolve aborts the run before any entry is
//! touched. Per entry, a missing source or a non-dotfile name is a recorded
//! skip and the run continues; a failure while copying a validated entry
//! aborts the whole run unless `--keep-going` demotes it to a recorded
//! failure (the run then still exits non-zero).

use anyhow::Result;

use crate::cli::{BackupOpts, GlobalOpts};
use crate::copy;
use crate::error::PathError;
use crate::logging::{EntryStatus, Logger};
use crate::manifest;
use crate::paths::{HomeDir, Resolver};

/// Run the backup command.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined, the manifest
/// cannot be loaded, the destination does not exist, or a copy fails.
pub fn run(global: &GlobalOpts, opts: &BackupOpts, log: &Logger) -> Result<()> {
    let home = HomeDir::detect()?;
    run_with(&home, global, opts, log)
}

/// Backup against an explicit home directory (injected for tests).
pub fn run_with(
    home: &HomeDir,
    global: &GlobalOpts,
    opts: &BackupOpts,
    log: &Logger,
) -> Result<()> {
    let resolver = Resolver::new(home);
    let location = super::manifest_location(global, home);

    log.stage("Loading manifest");
    log.debug(&format!("manifest: {location}"));
    let manifest = manifest::load(&resolver, &location)?;
    log.info(&format!("{} entries tracked", manifest.entries.len()));

    log.stage("Validating destination");
    let dest = resolver.resolve(&manifest.destination)?;
    log.info(&format!("destination: {}", dest.display()));

    log.stage("Copying dotfiles");
    for entry in &manifest.entries {
        let path = match resolver.resolve(entry) {
            Ok(path) => path,
            Err(PathError::NotFound(_)) => {
                log.info(&format!("{entry} does not exist, skipping"));
                log.record_entry(entry, EntryStatus::Missing);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if !copy::is_dotfile(&path) {
            log.info(&format!("{entry} is not a dotfile, skipping"));
            log.record_entry(entry, EntryStatus::NotDotfile);
            continue;
        }

        log.info(&format!("copying {}", path.display()));
        match copy::copy_file(&path, &dest) {
            Ok(bytes) => {
                log.info(&format!("copied {bytes} bytes"));
                log.record_entry(entry, EntryStatus::Copied(bytes));
            }
            Err(e) if opts.keep_going => {
                log.warn(&e.to_string());
                log.record_entry(entry, EntryStatus::Failed);
            }
            Err(e) => return Err(e.into()),
        }
    }

    log.print_summary();

    if log.has_failures() {
        anyhow::bail!("one or more copies failed");
    }
    Ok(())
}
