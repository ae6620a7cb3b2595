use tracing::debug;

use crate::error::Result;

/// Contract of the detour primitive behind one hooked routine: install or
/// remove the redirect, and report whether it is currently in place.
pub trait StreamDetour: Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self) -> Result<()>;
    fn remove(&self) -> Result<()>;
    fn is_applied(&self) -> bool;
}

/// Lifecycle of a single hooked routine.
///
/// `Unresolved` is terminal: when the signature never matched there is no
/// address to hook and the binding stays inert for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookState {
    Unresolved,
    Disabled,
    Enabled,
}

/// One intercepted function: its diagnostic name, resolved address and the
/// detour handle, when resolution succeeded.
pub struct HookBinding {
    name: &'static str,
    offset: u64,
    detour: Option<Box<dyn StreamDetour>>,
}

impl HookBinding {
    pub fn unresolved(name: &'static str) -> Self {
        Self {
            name,
            offset: 0,
            detour: None,
        }
    }

    pub fn installed(name: &'static str, offset: u64, detour: Box<dyn StreamDetour>) -> Self {
        Self {
            name,
            offset,
            detour: Some(detour),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resolved address, zero when the signature never matched.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn state(&self) -> HookState {
        match &self.detour {
            None => HookState::Unresolved,
            Some(detour) if detour.is_applied() => HookState::Enabled,
            Some(_) => HookState::Disabled,
        }
    }

    /// Install the redirect. No-op when unresolved or already applied.
    pub fn apply(&self) -> Result<()> {
        let Some(detour) = &self.detour else {
            debug!("{}: not installed, skipping enable", self.name);
            return Ok(());
        };
        if detour.is_applied() {
            return Ok(());
        }
        detour.apply()?;
        debug!("{} hook enabled", self.name);
        Ok(())
    }

    /// Restore the original entry. No-op when unresolved or not applied.
    pub fn remove(&self) -> Result<()> {
        let Some(detour) = &self.detour else {
            debug!("{}: not installed, skipping disable", self.name);
            return Ok(());
        };
        if !detour.is_applied() {
            return Ok(());
        }
        detour.remove()?;
        debug!("{} hook disabled", self.name);
        Ok(())
    }
}
