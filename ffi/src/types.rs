//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use catalog_core::{CatalogError, CatalogSession, DisplaySettings, Film, HttpMethod, Language, SessionState};

/// Opaque handle to a host-driven `CatalogSession`.
pub struct FfiCatalogSession {
    pub(crate) inner: CatalogSession,
}

/// Opaque handle to `DisplaySettings`.
pub struct FfiDisplaySettings {
    pub(crate) inner: DisplaySettings,
}

/// Heap-allocate `s` as a C string. Interior NUL bytes yield an empty string.
pub(crate) fn c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// The catalog request, for the host to execute with its own HTTP stack.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: catalog_core::HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Vec<FfiHeader> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            // `into_boxed_slice` makes capacity == len for the matching free.
            Box::into_raw(ffi_headers.into_boxed_slice()) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: c_string(req.url),
            headers,
            headers_len,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// The host's HTTP response. Read, never freed, by this library.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiCatalogResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Network = 1,
    Status = 2,
    Timeout = 3,
    Cancelled = 4,
    Decode = 5,
    UnknownFilm = 6,
    Panic = 7,
    NullArg = 8,
}

/// Tag that tells `catalog_free_result` what `FfiCatalogResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    FilmList = 1,
    /// No allocation; the answer is in `FfiCatalogResult::flag`.
    Flag = 2,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiSessionState {
    Empty = 0,
    Loaded = 1,
}

impl From<SessionState> for FfiSessionState {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Empty => FfiSessionState::Empty,
            SessionState::Loaded => FfiSessionState::Loaded,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiLanguage {
    English = 0,
    Arabic = 1,
}

impl From<Language> for FfiLanguage {
    fn from(language: Language) -> Self {
        match language {
            Language::English => FfiLanguage::English,
            Language::Arabic => FfiLanguage::Arabic,
        }
    }
}

impl From<FfiLanguage> for Language {
    fn from(language: FfiLanguage) -> Self {
        match language {
            FfiLanguage::English => Language::English,
            FfiLanguage::Arabic => Language::Arabic,
        }
    }
}

/// A single film exposed to C. `image` is the cover-art reference as sent.
#[repr(C)]
pub struct FfiFilm {
    pub id: *mut c_char,
    pub title: *mut c_char,
    pub description: *mut c_char,
    pub director: *mut c_char,
    pub producer: *mut c_char,
    pub running_time: *mut c_char,
    pub release_date: *mut c_char,
    pub image: *mut c_char,
}

impl From<Film> for FfiFilm {
    fn from(film: Film) -> Self {
        FfiFilm {
            id: c_string(film.id),
            title: c_string(film.title),
            description: c_string(film.description),
            director: c_string(film.director),
            producer: c_string(film.producer),
            running_time: c_string(film.running_time),
            release_date: c_string(film.release_date),
            image: c_string(film.image),
        }
    }
}

#[repr(C)]
pub struct FfiFilmList {
    pub items: *mut FfiFilm,
    pub len: u32,
}

/// Result envelope for every fallible call.
///
/// On success `error_code` is `Ok` and `error_message` is null. `data_tag`
/// says whether `data` holds an `FfiFilmList` or whether the answer is in
/// `flag`. On failure `error_code` names the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiCatalogResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
    pub flag: bool,
}

impl FfiCatalogResult {
    fn boxed(self) -> *mut Self {
        Box::into_raw(Box::new(self))
    }

    fn ok(data_tag: FfiDataTag, data: *mut c_void, flag: bool) -> *mut Self {
        FfiCatalogResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
            flag,
        }
        .boxed()
    }

    fn err(error_code: FfiErrorCode, http_status: u16, msg: &str) -> *mut Self {
        FfiCatalogResult {
            error_code,
            error_message: c_string(msg),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
            flag: false,
        }
        .boxed()
    }

    /// Build a success result carrying an `FfiFilmList`.
    pub(crate) fn ok_film_list(films: Vec<Film>) -> *mut Self {
        let len = films.len() as u32;
        let items = if films.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_films: Vec<FfiFilm> = films.into_iter().map(FfiFilm::from).collect();
            Box::into_raw(ffi_films.into_boxed_slice()) as *mut FfiFilm
        };
        let list = Box::into_raw(Box::new(FfiFilmList { items, len }));
        Self::ok(FfiDataTag::FilmList, list as *mut c_void, false)
    }

    pub(crate) fn ok_flag(flag: bool) -> *mut Self {
        Self::ok(FfiDataTag::Flag, std::ptr::null_mut(), flag)
    }

    /// Build an error result from a `CatalogError`.
    pub(crate) fn from_error(err: CatalogError) -> *mut Self {
        let (code, status) = match &err {
            CatalogError::Network { .. } => (FfiErrorCode::Network, 0),
            CatalogError::Status { status, .. } => (FfiErrorCode::Status, *status),
            CatalogError::Timeout { .. } => (FfiErrorCode::Timeout, 0),
            CatalogError::Cancelled => (FfiErrorCode::Cancelled, 0),
            CatalogError::Decode { .. } => (FfiErrorCode::Decode, 0),
            CatalogError::UnknownFilm { .. } => (FfiErrorCode::UnknownFilm, 0),
        };
        Self::err(code, status, &err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, 0, &format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::err(FfiErrorCode::Panic, 0, msg)
    }
}
