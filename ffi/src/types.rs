//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, boxed slices handed out as pointer +
//! length, and tagged enums with explicit discriminants. Conversion and
//! release helpers live here to keep `lib.rs` focused on the `extern "C"`
//! surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use tasklist_core::{ApiError, HttpMethod, HttpRequest, Outbound, TodoItem, TodoScreen};

/// Opaque handle to a `TodoScreen`. C callers receive a pointer to this and
/// pass it back into every `tasklist_screen_*` function.
pub struct FfiScreen {
    pub(crate) inner: TodoScreen,
}

/// Copy `s` into a C string owned by the caller. Interior NULs are dropped,
/// so text containing `\0` does not round-trip.
pub(crate) fn c_string(s: &str) -> *mut c_char {
    CString::new(s.replace('\0', ""))
        .unwrap_or_default()
        .into_raw()
}

/// Release a C string produced by `c_string`. Null is ignored.
pub(crate) unsafe fn drop_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Length of a slice as C sees it. `None` when it does not fit in `u32`.
fn c_len(len: usize) -> Option<u32> {
    u32::try_from(len).ok()
}

/// Convert `src` and hand it to C as pointer + length; empty input becomes
/// null. Nothing is converted when the length does not fit in `u32`.
fn into_raw_slice<S, T>(src: &[S], convert: impl FnMut(&S) -> T) -> Option<(*mut T, u32)> {
    let len = c_len(src.len())?;
    if len == 0 {
        return Some((std::ptr::null_mut(), 0));
    }
    let items: Box<[T]> = src.iter().map(convert).collect();
    Some((Box::into_raw(items) as *mut T, len))
}

/// Reclaim a slice produced by `into_raw_slice`.
unsafe fn from_raw_slice<T>(ptr: *mut T, len: u32) -> Option<Box<[T]>> {
    if ptr.is_null() || len == 0 {
        return None;
    }
    Some(Box::from_raw(std::ptr::slice_from_raw_parts_mut(
        ptr,
        len as usize,
    )))
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    /// Null when the request has no body.
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    fn from_core(req: HttpRequest) -> Option<Self> {
        let (headers, headers_len) = into_raw_slice(&req.headers, |(k, v)| FfiHeader {
            key: c_string(k),
            value: c_string(v),
        })?;
        Some(FfiHttpRequest {
            method: req.method.into(),
            path: c_string(&req.path),
            headers,
            headers_len,
            body: req.body.as_deref().map_or(std::ptr::null_mut(), c_string),
        })
    }

    unsafe fn free_fields(&self) {
        drop_c_string(self.path);
        drop_c_string(self.body);
        if let Some(headers) = from_raw_slice(self.headers, self.headers_len) {
            for h in headers.iter() {
                drop_c_string(h.key);
                drop_c_string(h.value);
            }
        }
    }
}

/// A request the host must execute, reported back under `ticket`.
#[repr(C)]
pub struct FfiOutbound {
    pub ticket: u64,
    pub request: FfiHttpRequest,
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a request and
/// passes a pointer to `tasklist_screen_complete`. The FFI layer reads but
/// does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    /// May be null for an empty body.
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Validation = 1,
    Network = 2,
    NotFound = 3,
    Server = 4,
    Deserialization = 5,
    Serialization = 6,
    Panic = 7,
    NullArg = 8,
    TooLong = 9,
}

/// Tag that tells `tasklist_free_result` what `FfiResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Outbound = 1,
    TodoList = 2,
}

/// A single todo item exposed to C.
#[repr(C)]
pub struct FfiTodo {
    pub id: *mut c_char,
    /// Interior NUL characters of the server's title are dropped.
    pub title: *mut c_char,
    pub completed: bool,
}

/// A list of todo items exposed to C.
#[repr(C)]
pub struct FfiTodoList {
    pub items: *mut FfiTodo,
    pub len: u32,
}

/// Result envelope for screen operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the payload tagged by `data_tag` (or is null for `None`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        http_status: u16,
        data_tag: FfiDataTag,
        data: *mut c_void,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code,
            error_message,
            http_status,
            data_tag,
            data,
        }))
    }

    /// Success carrying a request for the host to execute.
    pub(crate) fn ok_outbound(outbound: Outbound) -> *mut Self {
        let Some(request) = FfiHttpRequest::from_core(outbound.request) else {
            return Self::too_long("request headers");
        };
        let ffi = Box::new(FfiOutbound {
            ticket: outbound.ticket.get(),
            request,
        });
        Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            0,
            FfiDataTag::Outbound,
            Box::into_raw(ffi) as *mut c_void,
        )
    }

    /// Success carrying an optional follow-up request.
    pub(crate) fn ok_follow_up(follow_up: Option<Outbound>) -> *mut Self {
        match follow_up {
            Some(outbound) => Self::ok_outbound(outbound),
            None => Self::ok_empty(),
        }
    }

    /// Success carrying a snapshot of the list.
    pub(crate) fn ok_todo_list(todos: &[TodoItem]) -> *mut Self {
        let Some((items, len)) = into_raw_slice(todos, |t| FfiTodo {
            id: c_string(t.id.as_str()),
            title: c_string(&t.title),
            completed: t.completed,
        }) else {
            return Self::too_long("todo list");
        };
        let list = Box::new(FfiTodoList { items, len });
        Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            0,
            FfiDataTag::TodoList,
            Box::into_raw(list) as *mut c_void,
        )
    }

    pub(crate) fn ok_empty() -> *mut Self {
        Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let error_code = match &err {
            ApiError::Validation(_) => FfiErrorCode::Validation,
            ApiError::Network(_) => FfiErrorCode::Network,
            ApiError::NotFound => FfiErrorCode::NotFound,
            ApiError::Server { .. } => FfiErrorCode::Server,
            ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
            ApiError::Serialization(_) => FfiErrorCode::Serialization,
        };
        Self::boxed(
            error_code,
            c_string(&err.to_string()),
            err.http_status().unwrap_or(0),
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    pub(crate) fn from_outcome(outcome: Result<Option<Outbound>, ApiError>) -> *mut Self {
        match outcome {
            Ok(follow_up) => Self::ok_follow_up(follow_up),
            Err(e) => Self::from_error(e),
        }
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::NullArg,
            c_string(&format!("null argument: {name}")),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    pub(crate) fn too_long(what: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::TooLong,
            c_string(&format!("{what} exceeds u32::MAX entries")),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::Panic,
            c_string(msg),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Release everything `self` owns, except the envelope itself.
    pub(crate) unsafe fn free_fields(&self) {
        drop_c_string(self.error_message);
        if self.data.is_null() {
            return;
        }
        match self.data_tag {
            FfiDataTag::Outbound => {
                let outbound = Box::from_raw(self.data as *mut FfiOutbound);
                outbound.request.free_fields();
            }
            FfiDataTag::TodoList => {
                let list = Box::from_raw(self.data as *mut FfiTodoList);
                if let Some(items) = from_raw_slice(list.items, list.len) {
                    for item in items.iter() {
                        drop_c_string(item.id);
                        drop_c_string(item.title);
                    }
                }
            }
            FfiDataTag::None => {}
        }
    }
}
