//! Live hook layer for the 32-bit Windows target.
//!
//! The replacement functions must be plain `extern "thiscall"` items, so the
//! detours themselves live in a process-wide cell; everything the caller
//! interacts with still goes through the owned [`StreamTap`]. The cell also
//! serves as the one-time install guard: no matter how many threads race
//! into `install`, scanning and detour creation happen at most once.

use std::ffi::c_void;
use std::slice;
use std::sync::OnceLock;

use retour::GenericDetour;
use tracing::{debug, info};

use super::binding::{HookBinding, StreamDetour};
use super::capture::{captured_len, read_log_line, write_log_line};
use super::{READ_HOOK_NAME, StreamTap, WRITE_HOOK_NAME, resolve_streams};
use crate::config::TapConfig;
use crate::error::{Error, Result};
use crate::module::ModuleMemory;
use crate::signature::StreamSignatureSet;

/// The hooked routines are `thiscall`: stream object first, then the
/// caller's buffer and a signed byte count. The return value is the number
/// of bytes actually moved.
pub type RawStreamFn = unsafe extern "thiscall" fn(*mut c_void, *mut u8, i32) -> i32;

struct LiveHooks {
    read: GenericDetour<RawStreamFn>,
    write: GenericDetour<RawStreamFn>,
    read_addr: u64,
    write_addr: u64,
    config: TapConfig,
}

static LIVE: OnceLock<LiveHooks> = OnceLock::new();

impl StreamTap {
    /// Resolve the stream routines in `module` and install both detours.
    ///
    /// Signature misses are non-fatal: the returned tap has unresolved
    /// bindings and `enable`/`disable` become no-ops. A second call, from
    /// any thread, reuses the hooks created by the first.
    pub fn install<M: ModuleMemory>(
        module: &M,
        signatures: &StreamSignatureSet,
        config: TapConfig,
    ) -> Result<Self> {
        let (read_addr, write_addr) = match LIVE.get() {
            Some(live) => (live.read_addr, live.write_addr),
            None => {
                let resolved = resolve_streams(module, signatures)?;
                let (Some(read_addr), Some(write_addr)) = (resolved.read, resolved.write) else {
                    return Ok(Self::from_bindings(
                        HookBinding::unresolved(READ_HOOK_NAME),
                        HookBinding::unresolved(WRITE_HOOK_NAME),
                        config,
                    ));
                };

                let hooks = unsafe { create_hooks(read_addr, write_addr, config.clone()) }?;
                if LIVE.set(hooks).is_ok() {
                    info!("stream hooks installed");
                } else {
                    // A racing install won; it scanned the same module, so
                    // its hooks are equivalent and ours are dropped before
                    // ever being enabled.
                    debug!("stream hooks already installed by another thread");
                }
                (read_addr, write_addr)
            }
        };

        Ok(Self::from_bindings(
            HookBinding::installed(
                READ_HOOK_NAME,
                read_addr,
                Box::new(LiveDetour {
                    name: READ_HOOK_NAME,
                    select: |hooks| &hooks.read,
                }),
            ),
            HookBinding::installed(
                WRITE_HOOK_NAME,
                write_addr,
                Box::new(LiveDetour {
                    name: WRITE_HOOK_NAME,
                    select: |hooks| &hooks.write,
                }),
            ),
            config,
        ))
    }
}

unsafe fn create_hooks(read_addr: u64, write_addr: u64, config: TapConfig) -> Result<LiveHooks> {
    let read_target: RawStreamFn = unsafe { std::mem::transmute(read_addr as usize) };
    let write_target: RawStreamFn = unsafe { std::mem::transmute(write_addr as usize) };

    let read = unsafe { GenericDetour::new(read_target, read_entry as RawStreamFn) }
        .map_err(|e| Error::hook(READ_HOOK_NAME, e))?;
    let write = unsafe { GenericDetour::new(write_target, write_entry as RawStreamFn) }
        .map_err(|e| Error::hook(WRITE_HOOK_NAME, e))?;

    Ok(LiveHooks {
        read,
        write,
        read_addr,
        write_addr,
        config,
    })
}

/// Detour handle backed by the process-wide cell.
struct LiveDetour {
    name: &'static str,
    select: fn(&LiveHooks) -> &GenericDetour<RawStreamFn>,
}

impl StreamDetour for LiveDetour {
    fn name(&self) -> &str {
        self.name
    }

    fn apply(&self) -> Result<()> {
        let Some(live) = LIVE.get() else {
            return Ok(());
        };
        unsafe { (self.select)(live).enable() }.map_err(|e| Error::hook(self.name, e))
    }

    fn remove(&self) -> Result<()> {
        let Some(live) = LIVE.get() else {
            return Ok(());
        };
        unsafe { (self.select)(live).disable() }.map_err(|e| Error::hook(self.name, e))
    }

    fn is_applied(&self) -> bool {
        LIVE.get()
            .is_some_and(|live| (self.select)(live).is_enabled())
    }
}

/// Copy out the bytes the call-through reported as moved.
unsafe fn capture(buffer: *mut u8, size: i32, ret: i32) -> Vec<u8> {
    let len = captured_len(size, ret);
    if len == 0 || buffer.is_null() {
        return Vec::new();
    }
    unsafe { slice::from_raw_parts(buffer, len) }.to_vec()
}

unsafe extern "thiscall" fn read_entry(stream: *mut c_void, buffer: *mut u8, size: i32) -> i32 {
    // The detour only exists once LIVE is set, so get() cannot miss here.
    let Some(live) = LIVE.get() else { return 0 };

    let ret = unsafe { live.read.call(stream, buffer, size) };
    if live.config.log_reads {
        let data = unsafe { capture(buffer, size, ret) };
        debug!("{}", read_log_line(size, ret, &data));
    }
    ret
}

unsafe extern "thiscall" fn write_entry(stream: *mut c_void, buffer: *mut u8, size: i32) -> i32 {
    let Some(live) = LIVE.get() else { return 0 };

    let ret = unsafe { live.write.call(stream, buffer, size) };
    if live.config.log_writes {
        let data = unsafe { capture(buffer, size, ret) };
        debug!("{}", write_log_line(size, ret, &data));
    }
    ret
}
