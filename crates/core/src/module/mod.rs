//! Scoped loading of plugin modules and export lookup.
//!
//! A plugin is opened through a [`ModuleLoader`], used only inside
//! [`with_module`], and released when the module value is dropped. The
//! table walker never sees the OS handle, only [`ExportPointer`]s.

pub mod native;

use std::ffi::c_void;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use thiserror::Error;

pub use native::{NativeLoader, NativeModule};

/// The file could not be loaded as an executable module.
#[derive(Debug, Error)]
#[error("failed to load module {}: {reason}", path.display())]
pub struct ModuleLoadError {
    pub path: PathBuf,
    pub reason: String,
}

/// Address of a resolved export. Never null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportPointer(NonNull<c_void>);

impl ExportPointer {
    /// Wrap a raw export address; `None` for null.
    pub fn new(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// A loaded module. Dropping it releases the module.
pub trait Module {
    /// Look up a named export. Absence is an expected outcome.
    fn resolve_export(&self, name: &str) -> Option<ExportPointer>;

    /// Read a string-table resource as UTF-16 code units.
    /// Returns `None` when the resource is absent or empty.
    fn load_string(&self, id: u32) -> Option<Vec<u16>>;
}

/// Opens files as [`Module`]s.
///
/// # Safety
///
/// Every export an implementation resolves under one of the accessor names in
/// [`crate::plugin::ExportNames`] must be a callable `extern "system"`
/// function with the signature the host application defines for that name,
/// and every pointer such a function returns must stay valid until the module
/// is dropped.
pub unsafe trait ModuleLoader {
    type Module: Module;

    fn open(&self, path: &Path) -> Result<Self::Module, ModuleLoadError>;
}

/// Load `path`, run `body` against it, then release it.
///
/// The module is owned by this frame, so it is released exactly once whether
/// `body` returns normally, returns an error value, or unwinds.
pub fn with_module<L, T, F>(loader: &L, path: &Path, body: F) -> Result<T, ModuleLoadError>
where
    L: ModuleLoader,
    F: FnOnce(&L::Module) -> T,
{
    let module = loader.open(path)?;
    tracing::debug!(path = %path.display(), "module loaded");

    let out = body(&module);

    drop(module);
    tracing::debug!(path = %path.display(), "module released");
    Ok(out)
}
