//! Plugin table records and the walker that reads them.
//!
//! Table plugins expose their metadata through one of two accessor exports:
//! `Get<X>Table` returns a single record pointer, `Get<X>TableList` returns a
//! null-terminated array of record pointers. The record structs below mirror
//! the host's C layout up to and including the `information` field; nothing
//! past it is ever read.

use std::ffi::{c_char, c_int, c_void};

use thiserror::Error;

use crate::encoding::legacy_char_boundary;
use crate::module::Module;
use crate::plugin::ExportNames;

/// Longest table list the walker will follow before giving up.
pub const MAX_TABLE_LIST_LEN: usize = 1024;

/// Longest string, in bytes, read from a record field. Longer strings are
/// cut back to the last whole character within this limit.
pub const MAX_TEXT_LEN: usize = 4096;

/// `Get<X>Table` signature.
pub type GetTableFn = unsafe extern "system" fn() -> *const c_void;

/// `Get<X>TableList` signature.
pub type GetTableListFn = unsafe extern "system" fn() -> *const *const c_void;

/// A host record type with a name and an information string.
pub trait TableRecord {
    /// Pointer to the NUL-terminated plugin name, or null.
    fn name(&self) -> *const c_char;
    /// Pointer to the NUL-terminated information string, or null.
    fn information(&self) -> *const c_char;
}

/// Leading fields of the host's `FILTER_DLL`.
#[repr(C)]
pub struct FilterTable {
    pub flag: c_int,
    pub x: c_int,
    pub y: c_int,
    pub name: *const c_char,
    pub track_n: c_int,
    pub track_name: *const *const c_char,
    pub track_default: *const c_int,
    pub track_s: *const c_int,
    pub track_e: *const c_int,
    pub check_n: c_int,
    pub check_name: *const *const c_char,
    pub check_default: *const c_int,
    pub func_proc: *const c_void,
    pub func_init: *const c_void,
    pub func_exit: *const c_void,
    pub func_update: *const c_void,
    pub func_wndproc: *const c_void,
    pub track: *const c_int,
    pub check: *const c_int,
    pub ex_data_ptr: *const c_void,
    pub ex_data_size: c_int,
    pub information: *const c_char,
}

/// Leading fields of the host's `INPUT_PLUGIN_TABLE`.
#[repr(C)]
pub struct InputTable {
    pub flag: c_int,
    pub name: *const c_char,
    pub filefilter: *const c_char,
    pub information: *const c_char,
}

/// Leading fields of the host's `OUTPUT_PLUGIN_TABLE`.
#[repr(C)]
pub struct OutputTable {
    pub flag: c_int,
    pub name: *const c_char,
    pub filefilter: *const c_char,
    pub information: *const c_char,
}

/// Leading fields of the host's `COLOR_PLUGIN_TABLE`.
#[repr(C)]
pub struct ColorTable {
    pub flag: c_int,
    pub name: *const c_char,
    pub information: *const c_char,
}

// SAFETY: the records only hold addresses of static data inside a loaded
// module; this crate never writes through them.
unsafe impl Sync for FilterTable {}
unsafe impl Sync for InputTable {}
unsafe impl Sync for OutputTable {}
unsafe impl Sync for ColorTable {}

macro_rules! table_record {
    ($($ty:ty),+) => {
        $(
            impl TableRecord for $ty {
                fn name(&self) -> *const c_char {
                    self.name
                }

                fn information(&self) -> *const c_char {
                    self.information
                }
            }
        )+
    };
}

table_record!(FilterTable, InputTable, OutputTable, ColorTable);

/// The export convention a module follows, resolved once per file.
#[derive(Debug, Clone, Copy)]
pub enum Accessor {
    Single(GetTableFn),
    List(GetTableListFn),
}

impl Accessor {
    /// Resolve the accessor for a category. The single-table export wins
    /// when both are present. `None` means the module exports neither.
    pub fn resolve<M: Module + ?Sized>(module: &M, names: &ExportNames) -> Option<Self> {
        if let Some(ptr) = module.resolve_export(names.table) {
            // SAFETY: the loader contract guarantees exports under these
            // names have the accessor signature.
            let f = unsafe { std::mem::transmute::<*mut c_void, GetTableFn>(ptr.as_ptr()) };
            return Some(Self::Single(f));
        }
        if let Some(ptr) = module.resolve_export(names.table_list) {
            // SAFETY: as above.
            let f = unsafe { std::mem::transmute::<*mut c_void, GetTableListFn>(ptr.as_ptr()) };
            return Some(Self::List(f));
        }
        None
    }
}

/// Record text copied out of a module, still in the legacy encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub name: Vec<u8>,
    pub information: Vec<u8>,
    /// Set when either field hit [`MAX_TEXT_LEN`] before its NUL.
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    #[error("table list pointer {0:#x} is misaligned")]
    MisalignedList(usize),

    #[error("table record pointer {address:#x} at index {index} is misaligned")]
    MisalignedRecord { index: usize, address: usize },

    #[error("table list has no terminator within {0} entries")]
    Unterminated(usize),
}

/// Call the accessor and copy out every record it exposes.
///
/// A single accessor yields at most one entry. A list is read from index 0
/// and ends at the first null element.
///
/// # Safety
///
/// `accessor` must come from a module that is still loaded, and the records
/// it returns must have layout `T`.
pub unsafe fn walk<T: TableRecord>(accessor: Accessor) -> Result<Vec<RawEntry>, WalkError> {
    match accessor {
        Accessor::Single(get_table) => {
            // SAFETY: caller guarantees the accessor is live and well-typed.
            let record = unsafe { get_table() }.cast::<T>();
            if record.is_null() {
                return Ok(Vec::new());
            }
            // SAFETY: non-null record of layout `T`, checked for alignment.
            let entry = unsafe { read_record(record, 0)? };
            Ok(vec![entry])
        }
        Accessor::List(get_table_list) => {
            // SAFETY: caller guarantees the accessor is live and well-typed.
            let list = unsafe { get_table_list() };
            if list.is_null() {
                return Ok(Vec::new());
            }
            if !list.is_aligned() {
                return Err(WalkError::MisalignedList(list as usize));
            }

            let mut entries = Vec::new();
            for index in 0..MAX_TABLE_LIST_LEN {
                // SAFETY: every slot before the terminator is readable.
                let record = unsafe { *list.add(index) }.cast::<T>();
                if record.is_null() {
                    return Ok(entries);
                }
                // SAFETY: non-null record of layout `T`.
                entries.push(unsafe { read_record(record, index)? });
            }
            Err(WalkError::Unterminated(MAX_TABLE_LIST_LEN))
        }
    }
}

unsafe fn read_record<T: TableRecord>(record: *const T, index: usize) -> Result<RawEntry, WalkError> {
    if !record.is_aligned() {
        return Err(WalkError::MisalignedRecord { index, address: record as usize });
    }
    // SAFETY: caller passes a non-null pointer to a live `T`; alignment
    // checked above.
    let record = unsafe { &*record };
    // SAFETY: the record's string fields are null or NUL-terminated.
    let (name, information) = unsafe { (read_text(record.name()), read_text(record.information())) };
    Ok(RawEntry {
        truncated: name.truncated || information.truncated,
        name: name.bytes,
        information: information.bytes,
    })
}

struct Text {
    bytes: Vec<u8>,
    truncated: bool,
}

/// Copy a NUL-terminated string, reading at most [`MAX_TEXT_LEN`] bytes.
/// Null reads as empty.
unsafe fn read_text(ptr: *const c_char) -> Text {
    if ptr.is_null() {
        return Text { bytes: Vec::new(), truncated: false };
    }
    let ptr = ptr.cast::<u8>();
    let mut len = 0;
    // SAFETY: caller guarantees the string is readable up to its NUL.
    while len < MAX_TEXT_LEN && unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }
    // SAFETY: the `len` bytes just scanned are readable.
    let bytes = unsafe { std::slice::from_raw_parts(ptr, len) };
    // SAFETY: a string of at least `len` bytes is readable one byte further,
    // either its NUL or more text.
    let truncated = len == MAX_TEXT_LEN && unsafe { *ptr.add(len) } != 0;
    let bytes = if truncated { &bytes[..legacy_char_boundary(bytes)] } else { bytes };
    Text { bytes: bytes.to_vec(), truncated }
}
