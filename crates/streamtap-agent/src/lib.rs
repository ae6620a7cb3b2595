//! In-process agent payload.
//!
//! Built as a `cdylib` the injector loads into the game process. On attach
//! it initializes logging, resolves and installs the stream hooks, and
//! exports a small C ABI so the external controller can toggle them later.
//! The hooked routines are 32-bit `thiscall`, so the payload only does
//! anything on the x86 Windows target.

#[cfg(all(target_os = "windows", target_arch = "x86"))]
mod payload {
    use std::ffi::c_void;
    use std::sync::Mutex;
    use std::thread;

    use anyhow::Result;
    use streamtap_core::{ModuleMemory, ProcessModule, StreamTap, TapConfig, builtin_signatures};
    use tracing::{error, info};
    use tracing_subscriber::EnvFilter;

    use windows::Win32::Foundation::{BOOL, HINSTANCE};
    use windows::Win32::System::SystemServices::DLL_PROCESS_ATTACH;

    /// Module carrying the stream routines, overridable via STREAMTAP_MODULE.
    const DEFAULT_TARGET_MODULE: &str = "blue.dll";

    static TAP: Mutex<Option<StreamTap>> = Mutex::new(None);

    #[unsafe(no_mangle)]
    extern "system" fn DllMain(_module: HINSTANCE, reason: u32, _reserved: *mut c_void) -> BOOL {
        if reason == DLL_PROCESS_ATTACH {
            thread::spawn(attach);
        }
        BOOL::from(true)
    }

    fn attach() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("streamtap=debug")),
            )
            .try_init();

        if let Err(e) = install() {
            error!("stream tap install failed: {}", e);
        }
    }

    fn install() -> Result<()> {
        let module_name = std::env::var("STREAMTAP_MODULE")
            .unwrap_or_else(|_| DEFAULT_TARGET_MODULE.to_string());
        let module = ProcessModule::open(&module_name)?;
        info!("target module {} at {:#x}", module_name, module.base());

        let mut tap = StreamTap::install(&module, &builtin_signatures(), TapConfig::default())?;
        tap.enable()?;
        info!("stream tap enabled");

        let mut guard = TAP.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(tap);
        Ok(())
    }

    /// Re-apply the hooks. Returns 0 on success, -1 when the tap was never
    /// installed or the toggle failed.
    #[unsafe(no_mangle)]
    pub extern "system" fn streamtap_enable() -> i32 {
        toggle(true)
    }

    /// Remove the hooks, restoring the original routines. Same status codes
    /// as `streamtap_enable`.
    #[unsafe(no_mangle)]
    pub extern "system" fn streamtap_disable() -> i32 {
        toggle(false)
    }

    fn toggle(enable: bool) -> i32 {
        let mut guard = TAP.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let Some(tap) = guard.as_mut() else {
            return -1;
        };

        let result = if enable { tap.enable() } else { tap.disable() };
        match result {
            Ok(()) => 0,
            Err(e) => {
                error!("hook toggle failed: {}", e);
                -1
            }
        }
    }
}
