//! DLM map format decoding and encoding.
//!
//! Sections run in a fixed order, each reading the map version from the
//! `MapReader`/`MapWriter` context rather than from a parent object:
//! header -> (decrypt) -> topology -> presentation -> audio -> fixtures ->
//! layer tree -> cell grid. Writing mirrors the same sequence and both
//! directions consult the gate table in `layout`.
//!
//! Module roles:
//! - `layout`: wire constants and the version-gate table (source of truth)
//! - `reader` / `writer`: cursor plus version context and shared conventions
//! - `header`, `scene`, `fixture`, `layer`, `element`, `grid`: one section each
//! - `parser`: whole-document sequencing
//! - `error`: explicit, actionable errors

pub mod element;
pub mod error;
pub mod fixture;
pub mod grid;
pub mod header;
pub mod layer;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod scene;
pub mod writer;

pub use error::DlmError;
pub use parser::{decode_map, encode_map};
