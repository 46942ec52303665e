//! # Sigpad I/O
//!
//! Readers and writers around the renderer: the signature JSON line format
//! captured by signature pads, and JSON render settings files.

pub mod signature;
pub mod settings;

pub use signature::{encode_signature, parse_signature, strip_slashes, SegmentRecord, SignatureError};
pub use settings::{RenderSettings, SettingsError};
