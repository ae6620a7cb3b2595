//! Stream interception: signature resolution, hook bindings and the
//! caller-owned tap context.

mod binding;
mod capture;
#[cfg(all(target_os = "windows", target_arch = "x86"))]
mod live;

pub use binding::{HookBinding, HookState, StreamDetour};
pub use capture::{captured_len, read_log_line, write_log_line};
#[cfg(all(target_os = "windows", target_arch = "x86"))]
pub use live::RawStreamFn;

use tracing::{debug, warn};

use crate::config::TapConfig;
use crate::error::Result;
use crate::module::ModuleMemory;
use crate::scan::scan_module;
use crate::signature::StreamSignatureSet;

/// Diagnostic names of the two hooked routines.
pub const READ_HOOK_NAME: &str = "MemStream::Read";
pub const WRITE_HOOK_NAME: &str = "MemStream::Write";

/// Resolved addresses of the stream routines. `None` means the signature
/// did not match anywhere in the module.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolvedStreams {
    pub read: Option<u64>,
    pub write: Option<u64>,
}

impl ResolvedStreams {
    pub fn is_complete(&self) -> bool {
        self.read.is_some() && self.write.is_some()
    }
}

/// Scan the module for both stream routines and log where they landed
/// relative to the module base. Missing signatures are logged, not fatal.
pub fn resolve_streams<M: ModuleMemory>(
    module: &M,
    signatures: &StreamSignatureSet,
) -> Result<ResolvedStreams> {
    debug!("resolving stream routines...");

    let read = scan_module(module, &signatures.read_bytes()?);
    let write = scan_module(module, &signatures.write_bytes()?);
    let resolved = ResolvedStreams { read, write };

    let base = module.base();
    match (read, write) {
        (Some(read), Some(write)) => {
            debug!(
                "stream routines: read at base+0x{:X}, write at base+0x{:X}",
                read - base,
                write - base
            );
        }
        _ => {
            warn!(
                "stream signature match failed (read: {}, write: {})",
                found_or_missing(read),
                found_or_missing(write)
            );
        }
    }

    Ok(resolved)
}

fn found_or_missing(addr: Option<u64>) -> &'static str {
    if addr.is_some() { "found" } else { "missing" }
}

/// Caller-owned interception context: one binding per hooked routine.
///
/// Constructed by the host controller (via `install` on the live target, or
/// from bindings directly in tests) and toggled through `enable`/`disable`.
/// Bindings whose signature never resolved are skipped by both toggles.
pub struct StreamTap {
    read: HookBinding,
    write: HookBinding,
    config: TapConfig,
}

impl StreamTap {
    pub(crate) fn from_bindings(read: HookBinding, write: HookBinding, config: TapConfig) -> Self {
        Self {
            read,
            write,
            config,
        }
    }

    /// Install the redirects on every resolved binding.
    pub fn enable(&mut self) -> Result<()> {
        self.read.apply()?;
        self.write.apply()?;
        Ok(())
    }

    /// Restore the original entry points on every resolved binding.
    pub fn disable(&mut self) -> Result<()> {
        self.read.remove()?;
        self.write.remove()?;
        Ok(())
    }

    pub fn read_state(&self) -> HookState {
        self.read.state()
    }

    pub fn write_state(&self) -> HookState {
        self.write.state()
    }

    pub fn config(&self) -> &TapConfig {
        &self.config
    }
}
