use std::ffi::c_void;
use std::fmt;

use windows::Win32::Foundation::{HANDLE, HWND};
use windows::Win32::System::DataExchange::{
    CloseClipboard, EmptyClipboard, OpenClipboard, SetClipboardData,
};
use windows::Win32::System::Memory::{GMEM_MOVEABLE, GlobalAlloc, GlobalLock, GlobalUnlock};

#[derive(Debug, Clone)]
pub enum ClipboardError {
    OpenClipboardFailed,
    EmptyClipboardFailed,
    AllocateGlobalMemoryFailed,
    LockGlobalMemoryFailed,
    SetClipboardDataFailed,
    CloseClipboardFailed,
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::OpenClipboardFailed => write!(f, "Failed to open clipboard"),
            ClipboardError::EmptyClipboardFailed => write!(f, "Failed to empty clipboard"),
            ClipboardError::AllocateGlobalMemoryFailed => {
                write!(f, "Failed to allocate global memory")
            }
            ClipboardError::LockGlobalMemoryFailed => write!(f, "Failed to lock global memory"),
            ClipboardError::SetClipboardDataFailed => write!(f, "Failed to set clipboard data"),
            ClipboardError::CloseClipboardFailed => write!(f, "Failed to close clipboard"),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Copy text to the clipboard as CF_UNICODETEXT.
pub fn copy_text_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    unsafe {
        if OpenClipboard(Some(HWND(std::ptr::null_mut()))).is_err() {
            return Err(ClipboardError::OpenClipboardFailed);
        }

        if EmptyClipboard().is_err() {
            let _ = CloseClipboard();
            return Err(ClipboardError::EmptyClipboardFailed);
        }

        // NUL-terminated UTF-16, as the clipboard expects.
        let mut wide_text: Vec<u16> = text.encode_utf16().collect();
        wide_text.push(0);
        let data_size = wide_text.len() * std::mem::size_of::<u16>();

        let h_mem = match GlobalAlloc(GMEM_MOVEABLE, data_size) {
            Ok(mem) => mem,
            Err(_) => {
                let _ = CloseClipboard();
                return Err(ClipboardError::AllocateGlobalMemoryFailed);
            }
        };

        let mem_ptr = GlobalLock(h_mem);
        if mem_ptr.is_null() {
            let _ = CloseClipboard();
            return Err(ClipboardError::LockGlobalMemoryFailed);
        }

        std::ptr::copy_nonoverlapping(wide_text.as_ptr() as *const c_void, mem_ptr, data_size);

        let _ = GlobalUnlock(h_mem);

        // CF_UNICODETEXT = 13
        if SetClipboardData(13u32, Some(HANDLE(h_mem.0))).is_err() {
            let _ = CloseClipboard();
            return Err(ClipboardError::SetClipboardDataFailed);
        }

        if CloseClipboard().is_err() {
            return Err(ClipboardError::CloseClipboardFailed);
        }

        Ok(())
    }
}
