//! C-compatible FFI API for cross-language bindings.
//!
//! # ABI Contract
//!
//! All exported functions use `extern "C"` calling convention and `#[no_mangle]`
//! to ensure stable symbol names.
//!
//! ## Memory management
//! - Strings returned through `out_*` parameters are allocated on the Rust heap.
//! - Callers **must** free them with `docforge_free_string`.
//! - Passing a null pointer to `docforge_free_string` is a no-op.
//!
//! ## Error handling
//! Functions that can fail return a `c_int`:
//!
//! | code | meaning                              |
//! |------|--------------------------------------|
//! | 0    | success                              |
//! | 1    | null pointer argument                |
//! | 2    | invalid UTF-8 (or interior NUL)      |
//! | 3    | unknown document kind                |
//! | 4    | document data did not deserialize    |
//!
//! Error details can be retrieved via `docforge_last_error`.
//!
//! ## Thread safety
//! - `docforge_last_error` reads a thread-local, so it is safe to call from
//!   multiple threads.
//!
//! ## Usage from Go (cgo)
//! ```go
//! // #cgo LDFLAGS: -ldocforge
//! // #include <stdint.h>
//! // extern int docforge_render(const char* kind, const uint8_t* json,
//! //                            uint32_t json_len, char** out_html);
//! // extern const char* docforge_last_error();
//! // extern void docforge_free_string(char* s);
//! import "C"
//! ```

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::slice;

use crate::error::ForgeError;
use crate::format::{escape_html, format_currency};
use crate::pipeline::{render_json, DocumentKind, RenderConfig};
use crate::theme::Theme;

pub const DOCFORGE_OK: c_int = 0;
pub const DOCFORGE_ERR_NULL: c_int = 1;
pub const DOCFORGE_ERR_UTF8: c_int = 2;
pub const DOCFORGE_ERR_KIND: c_int = 3;
pub const DOCFORGE_ERR_DATA: c_int = 4;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn fail(err: ForgeError) -> c_int {
    let code = match err {
        ForgeError::UnknownKind(_) => DOCFORGE_ERR_KIND,
        ForgeError::InvalidData(_) => DOCFORGE_ERR_DATA,
        ForgeError::InvalidUtf8(_) | ForgeError::NulByte(_) => DOCFORGE_ERR_UTF8,
        ForgeError::Io(_) | ForgeError::InvalidFilename(_) | ForgeError::UnknownObjectUrl => {
            DOCFORGE_ERR_DATA
        }
    };
    set_last_error(&err.to_string());
    code
}

/// Borrow a null-terminated UTF-8 string.
///
/// # Safety
/// `ptr` must be non-null and point to a valid null-terminated string.
unsafe fn c_str<'a>(ptr: *const c_char) -> Result<&'a str, ForgeError> {
    Ok(CStr::from_ptr(ptr).to_str()?)
}

/// Hand a Rust string to the caller as a heap-allocated C string.
fn into_c_string(s: String) -> Result<*mut c_char, ForgeError> {
    Ok(CString::new(s)?.into_raw())
}

// ---------------------------------------------------------------------------
// Core API
// ---------------------------------------------------------------------------

/// Render a document from JSON data with the built-in styles.
///
/// # Parameters
/// - `kind`: null-terminated kind name (`invoice`, `quote`, `bill`,
///   `credit-note`, `statement`, `payslip`)
/// - `json_ptr`: pointer to UTF-8 JSON bytes (not necessarily null-terminated)
/// - `json_len`: length of the JSON data in bytes
/// - `out_html`: on success, receives a pointer to the null-terminated HTML
///
/// # Returns
/// `0` on success, non-zero on error. On error, call `docforge_last_error`.
///
/// # Safety
/// - `kind` must be a valid null-terminated string.
/// - `json_ptr` must point to `json_len` valid bytes.
/// - `out_html` must be a valid pointer.
/// - The caller must free `*out_html` by calling `docforge_free_string`.
#[no_mangle]
pub unsafe extern "C" fn docforge_render(
    kind: *const c_char,
    json_ptr: *const u8,
    json_len: u32,
    out_html: *mut *mut c_char,
) -> c_int {
    docforge_render_ex(
        kind,
        json_ptr,
        json_len,
        std::ptr::null(),
        out_html,
        std::ptr::null_mut(),
    )
}

/// Render a document with an optional custom style sheet, optionally also
/// returning its title.
///
/// # Parameters
/// - `kind`, `json_ptr`, `json_len`, `out_html`: as for `docforge_render`
/// - `css`: null-terminated style sheet, or `NULL` for the built-in styles
/// - `out_title`: receives the null-terminated document title, or `NULL` to
///   skip it
///
/// # Safety
/// Same as `docforge_render`. Additionally, `css` must be `NULL` or a valid
/// null-terminated string, and a non-null `*out_title` must be freed with
/// `docforge_free_string`.
#[no_mangle]
pub unsafe extern "C" fn docforge_render_ex(
    kind: *const c_char,
    json_ptr: *const u8,
    json_len: u32,
    css: *const c_char,
    out_html: *mut *mut c_char,
    out_title: *mut *mut c_char,
) -> c_int {
    if kind.is_null() || json_ptr.is_null() || out_html.is_null() {
        set_last_error("Null pointer argument");
        return DOCFORGE_ERR_NULL;
    }

    let kind = match c_str(kind).and_then(|k| k.parse::<DocumentKind>()) {
        Ok(k) => k,
        Err(e) => return fail(e),
    };

    let json_bytes = slice::from_raw_parts(json_ptr, json_len as usize);
    let json = match std::str::from_utf8(json_bytes) {
        Ok(s) => s,
        Err(e) => return fail(e.into()),
    };

    let config = if css.is_null() {
        RenderConfig::default()
    } else {
        match c_str(css) {
            Ok(css) => RenderConfig::with_theme(Theme::new("custom", css)),
            Err(e) => return fail(e),
        }
    };

    let doc = match render_json(kind, json, &config) {
        Ok(doc) => doc,
        Err(e) => return fail(e),
    };

    let html = match into_c_string(doc.html) {
        Ok(p) => p,
        Err(e) => return fail(e),
    };

    if !out_title.is_null() {
        match into_c_string(doc.title) {
            Ok(p) => *out_title = p,
            Err(e) => {
                drop(CString::from_raw(html));
                return fail(e);
            }
        }
    }
    *out_html = html;
    DOCFORGE_OK
}

/// Escape text for safe inclusion in HTML.
///
/// Returns a heap-allocated string (free with `docforge_free_string`), or
/// `NULL` on error.
///
/// # Safety
/// `text` must be `NULL` or a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn docforge_escape_html(text: *const c_char) -> *mut c_char {
    if text.is_null() {
        set_last_error("Null pointer argument");
        return std::ptr::null_mut();
    }
    match c_str(text).map(escape_html).and_then(into_c_string) {
        Ok(p) => p,
        Err(e) => {
            fail(e);
            std::ptr::null_mut()
        }
    }
}

/// Format an amount with thousands separators and two decimals.
///
/// Returns a heap-allocated string; free with `docforge_free_string`.
#[no_mangle]
pub extern "C" fn docforge_format_currency(amount: f64) -> *mut c_char {
    match into_c_string(format_currency(amount)) {
        Ok(p) => p,
        Err(e) => {
            fail(e);
            std::ptr::null_mut()
        }
    }
}

// ---------------------------------------------------------------------------
// Memory & diagnostics
// ---------------------------------------------------------------------------

/// Free a string previously returned by a `docforge_*` function.
///
/// # Safety
/// `s` must be a pointer returned by this library, or null.
#[no_mangle]
pub unsafe extern "C" fn docforge_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Return the last error message for the current thread, or `NULL`.
///
/// The pointer is valid until the next failing `docforge_*` call on this
/// thread. Do **not** free it.
#[no_mangle]
pub extern "C" fn docforge_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match e.borrow().as_ref() {
        Some(s) => s.as_ptr(),
        None => std::ptr::null(),
    })
}

/// Return the library version as a static null-terminated string.
#[no_mangle]
pub extern "C" fn docforge_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;
    use std::ptr;

    fn cs(s: &str) -> CString {
        CString::new(s).unwrap()
    }

    fn last_error() -> String {
        let p = docforge_last_error();
        assert!(!p.is_null());
        unsafe { CStr::from_ptr(p) }.to_str().unwrap().to_string()
    }

    fn take(p: *mut c_char) -> String {
        assert!(!p.is_null());
        let s = unsafe { CStr::from_ptr(p) }.to_str().unwrap().to_string();
        unsafe { docforge_free_string(p) };
        s
    }

    #[test]
    fn ffi_render_invoice() {
        let json = serde_json::to_vec(&samples::invoice()).unwrap();
        let mut out_html: *mut c_char = ptr::null_mut();

        let rc = unsafe {
            docforge_render(
                cs("invoice").as_ptr(),
                json.as_ptr(),
                json.len() as u32,
                &mut out_html,
            )
        };

        assert_eq!(rc, DOCFORGE_OK);
        let html = take(out_html);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("INV-0042"));
        assert!(html.contains("2,875.00"));
    }

    #[test]
    fn ffi_render_ex_custom_css_and_title() {
        let json = serde_json::to_vec(&samples::payslip()).unwrap();
        let mut out_html: *mut c_char = ptr::null_mut();
        let mut out_title: *mut c_char = ptr::null_mut();

        let rc = unsafe {
            docforge_render_ex(
                cs("payslip").as_ptr(),
                json.as_ptr(),
                json.len() as u32,
                cs("td { color: navy; }").as_ptr(),
                &mut out_html,
                &mut out_title,
            )
        };

        assert_eq!(rc, DOCFORGE_OK);
        assert!(take(out_html).contains("td { color: navy; }"));
        assert_eq!(take(out_title), "Payslip - Jane Doe - 2026-02-01 to 2026-02-14");
    }

    #[test]
    fn ffi_null_input() {
        let mut out_html: *mut c_char = ptr::null_mut();
        let rc = unsafe { docforge_render(cs("invoice").as_ptr(), ptr::null(), 0, &mut out_html) };
        assert_eq!(rc, DOCFORGE_ERR_NULL);
        assert!(out_html.is_null());
        assert_eq!(last_error(), "Null pointer argument");
    }

    #[test]
    fn ffi_unknown_kind() {
        let json = b"{}";
        let mut out_html: *mut c_char = ptr::null_mut();
        let rc = unsafe {
            docforge_render(cs("receipt").as_ptr(), json.as_ptr(), json.len() as u32, &mut out_html)
        };
        assert_eq!(rc, DOCFORGE_ERR_KIND);
        assert!(last_error().contains("receipt"));
    }

    #[test]
    fn ffi_invalid_utf8_and_data() {
        let mut out_html: *mut c_char = ptr::null_mut();

        let bad = [0x7b, 0xff, 0x7d];
        let rc = unsafe {
            docforge_render(cs("quote").as_ptr(), bad.as_ptr(), bad.len() as u32, &mut out_html)
        };
        assert_eq!(rc, DOCFORGE_ERR_UTF8);

        let json = br#"{"number": 1}"#;
        let rc = unsafe {
            docforge_render(cs("quote").as_ptr(), json.as_ptr(), json.len() as u32, &mut out_html)
        };
        assert_eq!(rc, DOCFORGE_ERR_DATA);
        assert!(last_error().starts_with("invalid document data"));
        assert!(out_html.is_null());
    }

    #[test]
    fn ffi_helpers() {
        assert_eq!(take(docforge_format_currency(2500.0)), "2,500.00");
        let escaped = unsafe { docforge_escape_html(cs("<b>A & B</b>").as_ptr()) };
        assert_eq!(take(escaped), "&lt;b&gt;A &amp; B&lt;/b&gt;");
        assert!(unsafe { docforge_escape_html(ptr::null()) }.is_null());
    }

    #[test]
    fn ffi_version() {
        let v = docforge_version();
        let version = unsafe { CStr::from_ptr(v) }.to_str().unwrap();
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn ffi_free_null_is_noop() {
        unsafe { docforge_free_string(ptr::null_mut()) };
    }
}
