//! # iconsync
//!
//! Icon inventory extraction and SVG canonicalization for icon code generation.
//!
//! The library has two halves that share one set of naming heuristics:
//!
//! src/icons
//!   ├── classify     Pattern tables deciding "is this an icon" and "is this outlined"
//!   ├── naming       Variant splitting and canonical (PascalCase) word form
//!   ├── metadata     Design-tool metadata parsing (structured tree or tag scan)
//!   ├── query        Search / section filtering over extracted records
//!   ├── normalize    Ordered, idempotent rewrites of an SVG document
//!   └── processor    One raw SVG + source name -> normalized SVG + output file name
//!
//! Everything touching the filesystem, configuration files or presentation lives
//! in `files`, `config` and `formats`; the modules above are pure and hold no
//! global mutable state.

pub mod icons;
