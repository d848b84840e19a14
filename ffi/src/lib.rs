//! C-ABI wrapper around `catalog-core` for the mobile host.
//!
//! # Overview
//! The host app owns networking. It asks for the catalog request, runs it
//! with its platform HTTP stack, and hands the response back. Everything
//! else (decoding, the held catalog, favorites, display settings) stays in
//! Rust behind opaque handles.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Fallible calls return one `FfiCatalogResult` envelope; `data_tag` says
//!   what `data` points to.
//! - The C caller owns all returned pointers and must release them with the
//!   matching `catalog_*_free` / `catalog_free_*` function.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use catalog_core::{CatalogError, CatalogSession, ClientConfig, DisplaySettings, HttpResponse};

use types::*;

/// Borrow a C string as `&str`; invalid UTF-8 reads as empty.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string that outlives
/// the returned borrow.
unsafe fn borrow_str<'a>(ptr: *const c_char) -> &'a str {
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap_or("")
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// Create a session bound to `base_url`, or to the public API if `base_url`
/// is null.
///
/// Returns null if an internal panic occurs.
/// The caller must free the returned pointer with `catalog_session_free`.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_session_new(base_url: *const c_char) -> *mut FfiCatalogSession {
    catch_unwind(|| {
        let config = if base_url.is_null() {
            ClientConfig::default()
        } else {
            ClientConfig::with_base_url(unsafe { borrow_str(base_url) })
        };
        let session = CatalogSession::detached(config);
        Box::into_raw(Box::new(FfiCatalogSession { inner: session }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a session created by `catalog_session_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_session_free(session: *mut FfiCatalogSession) {
    if !session.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(session) });
        }));
    }
}

/// Whether the session has applied a successful response yet.
/// A null session reports `Empty`.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_session_state(session: *const FfiCatalogSession) -> FfiSessionState {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return FfiSessionState::Empty;
        }
        let session = unsafe { &*session };
        session.inner.state().into()
    }))
    .unwrap_or(FfiSessionState::Empty)
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Build the catalog fetch request for the host to execute.
///
/// Returns null if `session` is null.
/// The caller must free the returned pointer with `catalog_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_build_fetch_request(
    session: *const FfiCatalogSession,
) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        let session = unsafe { &*session };
        FfiHttpRequest::from_core(session.inner.build_fetch_request())
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Apply the host's response to the fetch request.
///
/// On success the session holds the new catalog and the result carries it
/// (`data_tag = FilmList`). On failure the previous catalog is kept.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_session_apply_response(
    session: *const FfiCatalogSession,
    response: *const FfiHttpResponse,
) -> *mut FfiCatalogResult {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return FfiCatalogResult::null_arg("session");
        }
        if response.is_null() {
            return FfiCatalogResult::null_arg("response");
        }
        let session = unsafe { &*session };
        let resp = unsafe { &*response };
        let body = if resp.body.is_null() {
            String::new()
        } else {
            match unsafe { CStr::from_ptr(resp.body) }.to_str() {
                Ok(body) => body.to_string(),
                Err(e) => {
                    return FfiCatalogResult::from_error(CatalogError::Decode {
                        reason: format!("response body is not valid UTF-8: {e}"),
                    })
                }
            }
        };
        match session.inner.apply_response(HttpResponse::new(resp.status, body)) {
            Ok(_) => FfiCatalogResult::ok_film_list(session.inner.films()),
            Err(e) => FfiCatalogResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiCatalogResult::panic("panic in catalog_session_apply_response"))
}

// ---------------------------------------------------------------------------
// Catalog and favorites
// ---------------------------------------------------------------------------

/// The held catalog (`data_tag = FilmList`), empty before the first load.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_session_films(session: *const FfiCatalogSession) -> *mut FfiCatalogResult {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return FfiCatalogResult::null_arg("session");
        }
        let session = unsafe { &*session };
        FfiCatalogResult::ok_film_list(session.inner.films())
    }))
    .unwrap_or_else(|_| FfiCatalogResult::panic("panic in catalog_session_films"))
}

/// Favorite films in catalog order (`data_tag = FilmList`).
#[unsafe(no_mangle)]
pub extern "C" fn catalog_session_favorites(
    session: *const FfiCatalogSession,
) -> *mut FfiCatalogResult {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return FfiCatalogResult::null_arg("session");
        }
        let session = unsafe { &*session };
        FfiCatalogResult::ok_film_list(session.inner.favorites())
    }))
    .unwrap_or_else(|_| FfiCatalogResult::panic("panic in catalog_session_favorites"))
}

/// Toggle `id` in the favorites set. On success `data_tag = Flag` and
/// `flag` is the new membership.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_session_toggle_favorite(
    session: *const FfiCatalogSession,
    id: *const c_char,
) -> *mut FfiCatalogResult {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return FfiCatalogResult::null_arg("session");
        }
        if id.is_null() {
            return FfiCatalogResult::null_arg("id");
        }
        let session = unsafe { &*session };
        let id = unsafe { borrow_str(id) };
        match session.inner.toggle_favorite(id) {
            Ok(flag) => FfiCatalogResult::ok_flag(flag),
            Err(e) => FfiCatalogResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiCatalogResult::panic("panic in catalog_session_toggle_favorite"))
}

/// Returns false if either argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_session_is_favorite(
    session: *const FfiCatalogSession,
    id: *const c_char,
) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() || id.is_null() {
            return false;
        }
        let session = unsafe { &*session };
        session.inner.is_favorite(unsafe { borrow_str(id) })
    }))
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Display settings
// ---------------------------------------------------------------------------

/// Create display settings with first-launch defaults.
/// The caller must free the returned pointer with `catalog_settings_free`.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_settings_new() -> *mut FfiDisplaySettings {
    catch_unwind(|| {
        Box::into_raw(Box::new(FfiDisplaySettings {
            inner: DisplaySettings::default(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free settings created by `catalog_settings_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_settings_free(settings: *mut FfiDisplaySettings) {
    if !settings.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(settings) });
        }));
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn catalog_settings_light_mode(settings: *const FfiDisplaySettings) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if settings.is_null() {
            return false;
        }
        unsafe { &*settings }.inner.is_light_mode()
    }))
    .unwrap_or(false)
}

#[unsafe(no_mangle)]
pub extern "C" fn catalog_settings_set_light_mode(settings: *mut FfiDisplaySettings, light: bool) {
    if !settings.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            unsafe { &mut *settings }.inner.set_light_mode(light);
        }));
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn catalog_settings_language(settings: *const FfiDisplaySettings) -> FfiLanguage {
    catch_unwind(AssertUnwindSafe(|| {
        if settings.is_null() {
            return FfiLanguage::English;
        }
        unsafe { &*settings }.inner.language().into()
    }))
    .unwrap_or(FfiLanguage::English)
}

#[unsafe(no_mangle)]
pub extern "C" fn catalog_settings_set_language(
    settings: *mut FfiDisplaySettings,
    language: FfiLanguage,
) {
    if !settings.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            unsafe { &mut *settings }.inner.set_language(language.into());
        }));
    }
}

/// Current font size in points; 0 for a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_settings_font_size(settings: *const FfiDisplaySettings) -> f64 {
    catch_unwind(AssertUnwindSafe(|| {
        if settings.is_null() {
            return 0.0;
        }
        unsafe { &*settings }.inner.font_size()
    }))
    .unwrap_or(0.0)
}

/// Store `size` rounded and clamped to 12..=30; returns the stored value,
/// or 0 for a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_settings_set_font_size(
    settings: *mut FfiDisplaySettings,
    size: f64,
) -> f64 {
    catch_unwind(AssertUnwindSafe(|| {
        if settings.is_null() {
            return 0.0;
        }
        unsafe { &mut *settings }.inner.set_font_size(size)
    }))
    .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `catalog_build_fetch_request`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    }));
}

/// Free an `FfiCatalogResult`. Safe to call with null. Uses `data_tag` to
/// determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_free_result(result: *mut FfiCatalogResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if !result.data.is_null() {
            match result.data_tag {
                FfiDataTag::FilmList => {
                    let list = unsafe { Box::from_raw(result.data as *mut FfiFilmList) };
                    if !list.items.is_null() && list.len > 0 {
                        let items = unsafe {
                            Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                                list.items,
                                list.len as usize,
                            ))
                        };
                        for item in items.iter() {
                            free_ffi_film_fields(item);
                        }
                    }
                }
                FfiDataTag::None | FfiDataTag::Flag => {}
            }
        }
    }));
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Free the C-string fields of an `FfiFilm` (but not the struct itself).
fn free_ffi_film_fields(film: &FfiFilm) {
    for field in [
        film.id,
        film.title,
        film.description,
        film.director,
        film.producer,
        film.running_time,
        film.release_date,
        film.image,
    ] {
        free_c_string(field);
    }
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| free_c_string(s)));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
