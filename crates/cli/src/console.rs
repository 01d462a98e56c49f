//! Scoped switch of the Windows console output code page to UTF-8.

/// Restores the previous console output code page when dropped.
#[derive(Debug)]
pub struct Utf8Console {
    #[cfg(windows)]
    previous: u32,
}

#[cfg(windows)]
const CP_UTF8: u32 = 65001;

impl Utf8Console {
    #[cfg(windows)]
    pub fn enable() -> Self {
        use windows_sys::Win32::System::Console::{GetConsoleOutputCP, SetConsoleOutputCP};

        // SAFETY: plain Win32 calls without pointer arguments.
        let previous = unsafe { GetConsoleOutputCP() };
        if previous != 0 && previous != CP_UTF8 {
            // SAFETY: as above.
            unsafe { SetConsoleOutputCP(CP_UTF8) };
            tracing::debug!(previous, "console output code page set to UTF-8");
        }
        Self { previous }
    }

    #[cfg(not(windows))]
    pub fn enable() -> Self {
        Self {}
    }
}

#[cfg(windows)]
impl Drop for Utf8Console {
    fn drop(&mut self) {
        use windows_sys::Win32::System::Console::SetConsoleOutputCP;

        // 0 means there was no console to begin with.
        if self.previous != 0 && self.previous != CP_UTF8 {
            // SAFETY: plain Win32 call without pointer arguments.
            unsafe { SetConsoleOutputCP(self.previous) };
        }
    }
}
