//! Manifest-driven dotfile backup engine.
//!
//! Copies a user-declared set of dotfiles into a single backup directory,
//! driven by a small JSON manifest at `~/.config/dotty/config.json`:
//!
//! ```json
//! { "dotfiles": ["~/.bashrc", "~/.vimrc"], "destination-path": "~/backup" }
//! ```
//!
//! The public API is organised into four layers:
//!
//! - **[`paths`]** — home-folder expansion, lexical cleaning, existence probes
//! - **[`manifest`]** — load the manifest and append entries to it in place
//! - **[`copy`]** — the dotfile-name predicate and the single-file copy primitive
//! - **[`commands`]** — top-level subcommand orchestration (`backup`, `add`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod copy;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod paths;
