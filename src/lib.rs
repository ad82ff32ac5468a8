//! Phylogenetic tree layout engine with metadata overlays.
//!
//! The core (`tree`, `scale`) is pure and total: parsing, two-pass
//! layout, identity tagging, scale ticks and spatial selection never
//! fail and never touch I/O. The surrounding modules (`io`, `metadata`,
//! `export`, `demo`, `app`) wire files, tables and SVG output around it.

pub mod app;
pub mod demo;
pub mod export;
pub mod io;
pub mod metadata;
pub mod scale;
pub mod tree;
pub mod ui;
