//! OS-backed module loading using libloading.

use std::ffi::c_void;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};

use super::{ExportPointer, Module, ModuleLoadError, ModuleLoader};

/// Capacity, in UTF-16 units, of the buffer string resources are read into.
#[cfg(windows)]
const STRING_BUFFER_LEN: usize = 1024;

/// Loads plugin files with the platform's dynamic loader.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeLoader;

/// A module loaded by [`NativeLoader`]. Unloaded on drop.
pub struct NativeModule {
    library: Library,
    #[cfg(windows)]
    handle: windows_sys::Win32::Foundation::HMODULE,
}

impl std::fmt::Debug for NativeModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeModule").field("library", &self.library).finish()
    }
}

// SAFETY: loading a plugin runs its initialisation code and trusts its
// exports to follow the host application's ABI. Reading that metadata is the
// purpose of this loader, and callers opt in by choosing it.
unsafe impl ModuleLoader for NativeLoader {
    type Module = NativeModule;

    #[cfg(not(windows))]
    fn open(&self, path: &Path) -> Result<NativeModule, ModuleLoadError> {
        let resolved = resolve(path)?;
        // SAFETY: see the impl-level comment.
        let library = unsafe { Library::new(&resolved) }.map_err(|e| load_error(path, e))?;
        Ok(NativeModule { library })
    }

    #[cfg(windows)]
    fn open(&self, path: &Path) -> Result<NativeModule, ModuleLoadError> {
        use libloading::os::windows;

        let resolved = resolve(path)?;
        // SAFETY: see the impl-level comment.
        let library =
            unsafe { windows::Library::new(&resolved) }.map_err(|e| load_error(path, e))?;

        // Keep a copy of the raw handle for resource lookups; ownership
        // goes straight back into the wrapper, which frees it on drop.
        let raw = library.into_raw();
        // SAFETY: `raw` was produced by `into_raw` just above.
        let library = unsafe { windows::Library::from_raw(raw) };

        Ok(NativeModule { library: library.into(), handle: raw as _ })
    }
}

/// Anchor `path` to the working directory. A bare file name handed to the
/// dynamic loader would otherwise be looked up on the library search path.
fn resolve(path: &Path) -> Result<PathBuf, ModuleLoadError> {
    std::path::absolute(path)
        .map_err(|e| ModuleLoadError { path: path.to_path_buf(), reason: e.to_string() })
}

fn load_error(path: &Path, err: libloading::Error) -> ModuleLoadError {
    ModuleLoadError { path: path.to_path_buf(), reason: err.to_string() }
}

impl Module for NativeModule {
    fn resolve_export(&self, name: &str) -> Option<ExportPointer> {
        // SAFETY: the symbol is only read as an address here; it is never
        // called through this type.
        let symbol: Symbol<'_, *mut c_void> = unsafe { self.library.get(name.as_bytes()) }.ok()?;
        let ptr = ExportPointer::new(*symbol);
        tracing::trace!(export = name, found = ptr.is_some(), "resolved export");
        ptr
    }

    #[cfg(windows)]
    fn load_string(&self, id: u32) -> Option<Vec<u16>> {
        use windows_sys::Win32::UI::WindowsAndMessaging::LoadStringW;

        let mut buf = vec![0u16; STRING_BUFFER_LEN];
        // SAFETY: `handle` stays loaded while `self` lives and the buffer is
        // writable for the length passed.
        let len =
            unsafe { LoadStringW(self.handle as _, id, buf.as_mut_ptr(), STRING_BUFFER_LEN as i32) };
        if len <= 0 {
            return None;
        }
        buf.truncate(len as usize);
        Some(buf)
    }

    #[cfg(not(windows))]
    fn load_string(&self, _id: u32) -> Option<Vec<u16>> {
        None
    }
}
