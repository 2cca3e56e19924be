//! # booklog-sync
//!
//! Syncs a [Booklog](https://booklog.jp) CSV export into an Obsidian
//! vault: one Markdown note per book, with a YAML frontmatter header
//! owned by this tool and a body owned entirely by the user.
//!
//! ## The reconciliation pipeline
//!
//! ```text
//! CSV row ──▶ booklog::normalize_row ──▶ BookRecord
//!                                          │
//!             index::build_note_index ─────┤  (item_id lookup)
//!                                          ▼
//!                               writer::save_book
//!                    ┌──────────────┼──────────────┐
//!                    ▼              ▼              ▼
//!                created        updated        unchanged
//!             (new file,    (diff merged     (no write at
//!              named via     into header,     all, mtime
//!              filename::)   body kept)       untouched)
//! ```
//!
//! The orchestrator ([`sync::run_sync`]) builds the index once per run,
//! then streams rows through the pipeline and aggregates the outcomes.
//!
//! ## Ownership rule
//!
//! A note is `frontmatter + body`. The frontmatter's managed keys
//! ([`model::MANAGED_KEYS`]) belong to the sync tool; every other header
//! key, and the entire body, belong to the user and survive any update
//! untouched. Nothing in this crate ever interprets the body.
//!
//! ## Failure posture
//!
//! Malformed note headers, missing directories, and odd CSV cells are
//! recovered locally (see [`frontmatter::NoteContent`] and the rating
//! rule in [`booklog`]). Filesystem write failures are fatal for the
//! run: remaining rows are aborted, already-written notes stay.
//!
//! ## Module overview
//!
//! - [`booklog`]: CSV schema, cp932 decoding, row normalization
//! - [`model`]: `BookRecord`, `SyncOutcome`, managed key list
//! - [`index`]: per-run identifier → note path map
//! - [`frontmatter`]: note splitting, header parse/serialize
//! - [`diff`]: absence-aware field comparison
//! - [`filename`]: display-name template, byte budget, sanitization
//! - [`writer`]: create / merge-update / no-op, atomic writes
//! - [`sync`]: the per-run orchestrator
//! - [`config`]: YAML config with fail-fast validation
//! - [`watch`]: debounced re-run on CSV changes
//! - [`error`]: error types

pub mod booklog;
pub mod config;
pub mod diff;
pub mod error;
pub mod filename;
pub mod frontmatter;
pub mod index;
pub mod model;
pub mod sync;
pub mod watch;
pub mod writer;
