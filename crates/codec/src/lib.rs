//! BeastBldr codec - moving creature records in and out of text
//!
//! Two formats: the fenced `{{monster,frame,wide ... }}` statblock
//! markdown (generated exactly, parsed best-effort) and plain JSON
//! (serde shape, name-only validation on import).

pub mod error;
pub mod json;
pub mod markdown;

pub use error::CodecError;
pub use json::{from_json, to_json};
pub use markdown::{generate, parse};
