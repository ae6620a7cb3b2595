#[cfg(target_os = "windows")]
mod process;
mod view;

#[cfg(test)]
pub mod mock;

pub use view::ModuleMemory;

#[cfg(target_os = "windows")]
pub use process::ProcessModule;

#[cfg(test)]
pub use mock::MockModule;
