//! # streamtap-core
//!
//! Core library for the streamtap in-process stream interceptor.
//!
//! This crate provides:
//! - Byte-signature scanning over a loaded module's memory
//! - Hook bindings for the host's in-memory stream read/write routines
//! - Capture formatting: hex dumps plus length-driven data hints
//!
//! The live hook layer targets 32-bit Windows (the hooked routines are
//! `thiscall`); everything else is portable and carries the unit tests.

pub mod config;
pub mod dump;
pub mod error;
pub mod hint;
pub mod module;
pub mod scan;
pub mod signature;
pub mod tap;

pub use config::TapConfig;
pub use dump::hex_dump;
pub use error::{Error, Result};
pub use hint::{binary_repr, data_hint};
pub use module::ModuleMemory;
#[cfg(target_os = "windows")]
pub use module::ProcessModule;
pub use scan::{find_all_patterns, find_pattern, scan_module};
pub use signature::{
    StreamSignatureSet, builtin_signatures, format_pattern, load_signatures, parse_pattern,
    save_signatures,
};
pub use tap::{
    HookBinding, HookState, ResolvedStreams, StreamDetour, StreamTap, captured_len, read_log_line,
    resolve_streams, write_log_line,
};
#[cfg(all(target_os = "windows", target_arch = "x86"))]
pub use tap::RawStreamFn;
