//! The `add` command: register a new path in the manifest.
//!
//! The candidate is checked **as given** — no home expansion before the
//! existence probe — and persisted verbatim, so a `~`-prefixed argument is
//! stored with its `~` intact and expands at backup time. A candidate that
//! does not exist is reported as a warning but is still registered (it may
//! appear later; backup skips it until then). No duplicate detection.

use std::path::Path;

use anyhow::Result;

use crate::cli::{AddOpts, GlobalOpts};
use crate::error::PathError;
use crate::logging::Logger;
use crate::manifest;
use crate::paths::{self, HomeDir, Resolver};

/// Run the add command.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined, the
/// candidate cannot be probed (other than not existing), or the manifest
/// cannot be read, patched, or written back.
pub fn run(global: &GlobalOpts, opts: &AddOpts, log: &Logger) -> Result<()> {
    let home = HomeDir::detect()?;
    run_with(&home, global, &opts.path, log)
}

/// Register against an explicit home directory (injected for tests).
pub fn run_with(home: &HomeDir, global: &GlobalOpts, candidate: &str, log: &Logger) -> Result<()> {
    match paths::probe(Path::new(candidate)) {
        Ok(()) => {}
        Err(PathError::NotFound(_)) => {
            log.warn(&format!("{candidate} does not exist"));
        }
        Err(e) => return Err(e.into()),
    }

    let resolver = Resolver::new(home);
    let location = super::manifest_location(global, home);
    manifest::append_entry(&resolver, &location, candidate)?;
    log.info(&format!("added {candidate}"));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    fn write_manifest(home: &Path, content: &str) -> String {
        let dir = home.join(".config/dotty");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn entries(resolver: &Resolver<'_>, location: &str) -> Vec<String> {
        manifest::load(resolver, location).unwrap().entries
    }

    #[test]
    fn add_existing_path_appends_it_verbatim() {
        let home_dir = tempfile::tempdir().unwrap();
        let file = home_dir.path().join(".bashrc");
        fs::write(&file, b"x").unwrap();
        let config = write_manifest(
            home_dir.path(),
            r#"{ "dotfiles": [], "destination-path": "/d" }"#,
        );

        let home = HomeDir::new(home_dir.path());
        let log = Logger::new("test");
        let global = GlobalOpts {
            config: Some(config.clone()),
        };
        run_with(&home, &global, file.to_str().unwrap(), &log).unwrap();

        let resolver = Resolver::new(&home);
        assert_eq!(
            entries(&resolver, &config),
            vec![file.to_string_lossy().into_owned()]
        );
    }

    #[test]
    fn add_literal_tilde_path_is_stored_with_tilde() {
        let home_dir = tempfile::tempdir().unwrap();
        fs::write(home_dir.path().join(".vimrc"), b"x").unwrap();
        let config = write_manifest(
            home_dir.path(),
            r#"{ "dotfiles": ["~/.bashrc"], "destination-path": "/d" }"#,
        );

        let home = HomeDir::new(home_dir.path());
        let log = Logger::new("test");
        let global = GlobalOpts {
            config: Some(config.clone()),
        };
        // "~/.vimrc" does not exist as a literal relative path, so this
        // takes the warn-and-register branch; the string must survive
        // unexpanded.
        run_with(&home, &global, "~/.vimrc", &log).unwrap();

        let resolver = Resolver::new(&home);
        assert_eq!(entries(&resolver, &config), vec!["~/.bashrc", "~/.vimrc"]);
    }

    #[test]
    fn add_missing_candidate_still_registers() {
        let home_dir = tempfile::tempdir().unwrap();
        let config = write_manifest(
            home_dir.path(),
            r#"{ "dotfiles": [], "destination-path": "/d" }"#,
        );

        let home = HomeDir::new(home_dir.path());
        let log = Logger::new("test");
        let global = GlobalOpts {
            config: Some(config.clone()),
        };
        run_with(&home, &global, "/no/such/.file", &log).unwrap();

        let resolver = Resolver::new(&home);
        assert_eq!(entries(&resolver, &config), vec!["/no/such/.file"]);
    }

    #[test]
    fn add_twice_appends_twice() {
        let home_dir = tempfile::tempdir().unwrap();
        let config = write_manifest(
            home_dir.path(),
            r#"{ "dotfiles": [], "destination-path": "/d" }"#,
        );

        let home = HomeDir::new(home_dir.path());
        let log = Logger::new("test");
        let global = GlobalOpts {
            config: Some(config.clone()),
        };
        run_with(&home, &global, "~/.zshrc", &log).unwrap();
        run_with(&home, &global, "~/.zshrc", &log).unwrap();

        let resolver = Resolver::new(&home);
        assert_eq!(entries(&resolver, &config), vec!["~/.zshrc", "~/.zshrc"]);
    }

    #[test]
    fn add_fails_when_manifest_is_missing() {
        let home_dir = tempfile::tempdir().unwrap();
        let home = HomeDir::new(home_dir.path());
        let log = Logger::new("test");
        let global = GlobalOpts {
            config: Some(
                home_dir
                    .path()
                    .join("absent.json")
                    .to_string_lossy()
                    .into_owned(),
            ),
        };

        let result = run_with(&home, &global, "~/.zshrc", &log);
        assert!(result.is_err());
    }

    #[test]
    fn add_fails_on_malformed_manifest() {
        let home_dir = tempfile::tempdir().unwrap();
        let config = write_manifest(home_dir.path(), "{ broken");

        let home = HomeDir::new(home_dir.path());
        let log = Logger::new("test");
        let global = GlobalOpts {
            config: Some(config),
        };

        let err = run_with(&home, &global, "~/.zshrc", &log).unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }
}
