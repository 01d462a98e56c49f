//! Minimal table plugin compiled as a shared library by the native tests.
//!
//! Exports:
//! - `GetColorPluginTable`: one record, `Sample` / `Desc`.
//! - `GetFilterTableList`: two records then a null, the first with a
//!   Shift_JIS name.
//! - `GetOutputPluginTable` and `GetOutputPluginTableList`: both present,
//!   with different records.
//! - No input accessor.

use std::ffi::{c_char, c_int, c_void};
use std::ptr;

#[repr(C)]
pub struct ColorTable {
    flag: c_int,
    name: *const c_char,
    information: *const c_char,
}

#[repr(C)]
pub struct OutputTable {
    flag: c_int,
    name: *const c_char,
    filefilter: *const c_char,
    information: *const c_char,
}

#[repr(C)]
pub struct FilterTable {
    flag: c_int,
    x: c_int,
    y: c_int,
    name: *const c_char,
    track_n: c_int,
    track_name: *const *const c_char,
    track_default: *const c_int,
    track_s: *const c_int,
    track_e: *const c_int,
    check_n: c_int,
    check_name: *const *const c_char,
    check_default: *const c_int,
    func_proc: *const c_void,
    func_init: *const c_void,
    func_exit: *const c_void,
    func_update: *const c_void,
    func_wndproc: *const c_void,
    track: *const c_int,
    check: *const c_int,
    ex_data_ptr: *const c_void,
    ex_data_size: c_int,
    information: *const c_char,
}

#[repr(transparent)]
pub struct Shared<T>(T);
unsafe impl<T> Sync for Shared<T> {}

const fn text(bytes: &'static [u8]) -> *const c_char {
    bytes.as_ptr().cast()
}

static COLOR: Shared<ColorTable> = Shared(ColorTable {
    flag: 0,
    name: text(b"Sample\0"),
    information: text(b"Desc\0"),
});

static FIRST_FILTER: Shared<FilterTable> = Shared(FilterTable {
    name: text(b"\x83\x54\x83\x93\x83\x76\x83\x8b\0"),
    information: text(b"First v1.0\0"),
    ..unsafe { std::mem::zeroed() }
});

static SECOND_FILTER: Shared<FilterTable> = Shared(FilterTable {
    name: text(b"Second\0"),
    information: ptr::null(),
    ..unsafe { std::mem::zeroed() }
});

static FILTERS: Shared<[*const FilterTable; 3]> =
    Shared([&FIRST_FILTER.0 as *const _, &SECOND_FILTER.0 as *const _, ptr::null()]);

static OUTPUT_SINGLE: Shared<OutputTable> = Shared(OutputTable {
    flag: 0,
    name: text(b"Single\0"),
    filefilter: ptr::null(),
    information: text(b"from GetOutputPluginTable\0"),
});

static OUTPUT_LISTED: Shared<OutputTable> = Shared(OutputTable {
    flag: 0,
    name: text(b"Listed\0"),
    filefilter: ptr::null(),
    information: text(b"from GetOutputPluginTableList\0"),
});

static OUTPUTS: Shared<[*const OutputTable; 2]> =
    Shared([&OUTPUT_LISTED.0 as *const _, ptr::null()]);

#[no_mangle]
pub extern "system" fn GetColorPluginTable() -> *const c_void {
    (&COLOR.0 as *const ColorTable).cast()
}

#[no_mangle]
pub extern "system" fn GetFilterTableList() -> *const *const c_void {
    FILTERS.0.as_ptr().cast()
}

#[no_mangle]
pub extern "system" fn GetOutputPluginTable() -> *const c_void {
    (&OUTPUT_SINGLE.0 as *const OutputTable).cast()
}

#[no_mangle]
pub extern "system" fn GetOutputPluginTableList() -> *const *const c_void {
    OUTPUTS.0.as_ptr().cast()
}
