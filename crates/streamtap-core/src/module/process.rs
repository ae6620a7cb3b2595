use std::ffi::CString;
use std::slice;

use windows::Win32::System::LibraryLoader::GetModuleHandleA;
use windows::Win32::System::ProcessStatus::{GetModuleInformation, MODULEINFO};
use windows::Win32::System::Threading::GetCurrentProcess;
use windows::core::PCSTR;

use super::ModuleMemory;
use crate::error::{Error, Result};

/// A module loaded in the current process, resolved by name.
pub struct ProcessModule {
    name: String,
    base: u64,
    size: usize,
}

impl ProcessModule {
    pub fn open(name: &str) -> Result<Self> {
        let c_name =
            CString::new(name).map_err(|_| Error::ModuleNotFound(name.to_string()))?;

        let handle = unsafe { GetModuleHandleA(PCSTR(c_name.as_ptr() as *const u8)) }
            .map_err(|_| Error::ModuleNotFound(name.to_string()))?;

        let mut info = MODULEINFO::default();
        unsafe {
            GetModuleInformation(
                GetCurrentProcess(),
                handle,
                &mut info,
                std::mem::size_of::<MODULEINFO>() as u32,
            )
        }
        .map_err(|e| Error::ModuleNotFound(format!("{}: {}", name, e)))?;

        Ok(Self {
            name: name.to_string(),
            base: info.lpBaseOfDll as u64,
            size: info.SizeOfImage as usize,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ModuleMemory for ProcessModule {
    fn base(&self) -> u64 {
        self.base
    }

    fn view(&self) -> &[u8] {
        // The image stays mapped for the module's lifetime inside this
        // process; the slice covers exactly SizeOfImage bytes.
        unsafe { slice::from_raw_parts(self.base as *const u8, self.size) }
    }
}
