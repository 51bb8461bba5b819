//! # Asset Optimizer
//!
//! Two small maintenance tools for the raster images checked into a web
//! project. Both enumerate the same glob patterns under a project root and
//! work through the matches one file at a time.
//!
//! ```text
//! optimize-images      public/hero.jpg  →  public/hero.webp + public/hero.avif   (original kept)
//! overwrite-originals  public/hero.jpg  →  public/hero.jpg                        (recompressed in place)
//! ```
//!
//! A failure on one file never stops the batch. Every enumerated file ends up
//! as one line in the closing summary: converted with sizes, skipped with a
//! reason, or an error message.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Glob patterns → ordered, deduplicated relative paths |
//! | [`derive`] | WebP + AVIF sibling generation (`optimize-images`) |
//! | [`overwrite`] | Same-format recompression via temp file + rename (`overwrite-originals`) |
//! | [`imaging`] | Codec layer: `ImageBackend` trait, encode parameters, dimension math |
//! | [`results`] | Per-file records shared by both pipelines |
//! | [`config`] | Stock defaults and the optional `image-optimizer.toml` overlay |
//! | [`output`] | Console progress lines, summaries, closing notes |
//! | [`cli`] | Shared `clap` flags and the end-to-end driver |
//! | [`logging`] | `tracing` subscriber for stderr diagnostics |
//!
//! # Design Decisions
//!
//! ## Backend Trait
//!
//! Pipelines never call an encoder directly. They compute [`imaging::EncodeParams`]
//! and hand them to an [`imaging::ImageBackend`]. Production uses
//! [`imaging::RustBackend`]; unit tests use a recording mock, so skip rules,
//! resize decisions and failure isolation are tested without encoding pixels.
//!
//! ## Sequential Processing
//!
//! Files are processed strictly in order on one thread. Progress is reported
//! through a callback as each file finishes, so output order always matches
//! enumeration order.
//!
//! ## Atomic Replacement
//!
//! The in-place optimizer never writes into an original. It encodes to
//! `<path>.opt.tmp` and renames that over the original, so an interrupted run
//! leaves either the old file or the new one, never a partial write.

pub mod cli;
pub mod config;
pub mod derive;
pub mod imaging;
pub mod logging;
pub mod output;
pub mod overwrite;
pub mod results;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
