//! C-ABI wrapper around the `tasklist-core` screen controller.
//!
//! # Overview
//! A mobile shell owns the platform HTTP client and the rendering; this
//! library owns the screen state. Every action returns an `FfiOutbound`
//! request for the host to execute, and the host reports the outcome back
//! with `tasklist_screen_complete` (any HTTP response) or
//! `tasklist_screen_fail` (no response at all). A completion may hand back a
//! follow-up request that the host executes the same way.
//!
//! # Design
//! - Every `extern "C"` function catches panics so they never cross the
//!   FFI boundary.
//! - A single `FfiResult` envelope with `FfiDataTag` + `void* data` conveys
//!   success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must release them with the
//!   matching `tasklist_free_*` function.
//! - A screen handle must only be used from one thread at a time.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tasklist_core::{
    ClientConfig, Direction, HttpResponse, ResyncMode, Ticket, TodoId, TodoScreen,
};

use types::*;

/// Read a caller-owned C string. Invalid UTF-8 is replaced, null is `None`.
fn read_c_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

/// Run `f` against the screen behind `screen`, turning null handles and
/// panics into error results.
fn with_screen(
    screen: *mut FfiScreen,
    op: &str,
    f: impl FnOnce(&mut TodoScreen) -> *mut FfiResult,
) -> *mut FfiResult {
    if screen.is_null() {
        return FfiResult::null_arg("screen");
    }
    catch_unwind(AssertUnwindSafe(|| {
        let screen = unsafe { &mut *screen };
        f(&mut screen.inner)
    }))
    .unwrap_or_else(|_| {
        log::error!("panic in {op}");
        FfiResult::panic(&format!("panic in {op}"))
    })
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

/// Route core log output to stderr, filtered by `RUST_LOG` (default `warn`).
/// Later calls are no-ops.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_init_logging() {
    let _ = catch_unwind(|| {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .try_init();
    });
}

/// Create a screen bound to `base_url`.
///
/// `merge` selects merge resync (apply returned entities) instead of a full
/// re-fetch after each create/update. Returns null if `base_url` is null.
/// The caller must free the returned pointer with `tasklist_screen_free`.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_new(base_url: *const c_char, merge: bool) -> *mut FfiScreen {
    catch_unwind(|| {
        let Some(base_url) = read_c_str(base_url) else {
            return std::ptr::null_mut();
        };
        let config = ClientConfig {
            base_url,
            resync: if merge {
                ResyncMode::Merge
            } else {
                ResyncMode::Refetch
            },
        };
        let screen = TodoScreen::from_config(&config);
        Box::into_raw(Box::new(FfiScreen { inner: screen }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a screen created by `tasklist_screen_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_free(screen: *mut FfiScreen) {
    if !screen.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(screen) });
        });
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Request the full list. Returns `data_tag = Outbound`.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_refresh(screen: *mut FfiScreen) -> *mut FfiResult {
    with_screen(screen, "tasklist_screen_refresh", |s| {
        FfiResult::ok_outbound(s.refresh())
    })
}

/// Replace the new-item input text. Null clears it.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_set_input(
    screen: *mut FfiScreen,
    text: *const c_char,
) -> *mut FfiResult {
    with_screen(screen, "tasklist_screen_set_input", |s| {
        s.set_input(read_c_str(text).unwrap_or_default());
        FfiResult::ok_empty()
    })
}

/// Create an item from the input text. An empty input yields a
/// `Validation` error and no request.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_add(screen: *mut FfiScreen) -> *mut FfiResult {
    with_screen(screen, "tasklist_screen_add", |s| match s.add() {
        Ok(outbound) => FfiResult::ok_outbound(outbound),
        Err(e) => FfiResult::from_error(e),
    })
}

/// Start editing `id`. Returns false if the handle or id is null, or the
/// item is not in the list.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_begin_edit(screen: *mut FfiScreen, id: *const c_char) -> bool {
    if screen.is_null() {
        return false;
    }
    catch_unwind(AssertUnwindSafe(|| {
        let Some(id) = read_c_str(id) else {
            return false;
        };
        let screen = unsafe { &mut *screen };
        screen.inner.begin_edit(&TodoId::new(id))
    }))
    .unwrap_or(false)
}

/// Replace the edit draft. Returns false when nothing is being edited.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_set_draft(screen: *mut FfiScreen, text: *const c_char) -> bool {
    if screen.is_null() {
        return false;
    }
    catch_unwind(AssertUnwindSafe(|| {
        let screen = unsafe { &mut *screen };
        screen.inner.set_draft(read_c_str(text).unwrap_or_default())
    }))
    .unwrap_or(false)
}

/// Leave editing without saving. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_cancel_edit(screen: *mut FfiScreen) {
    if !screen.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            unsafe { &mut *screen }.inner.cancel_edit();
        }));
    }
}

/// Save the edit draft as the item's title.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_submit_edit(screen: *mut FfiScreen) -> *mut FfiResult {
    with_screen(screen, "tasklist_screen_submit_edit", |s| match s.submit_edit() {
        Ok(outbound) => FfiResult::ok_outbound(outbound),
        Err(e) => FfiResult::from_error(e),
    })
}

/// Flip the completion flag of `id`.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_toggle_complete(
    screen: *mut FfiScreen,
    id: *const c_char,
) -> *mut FfiResult {
    let Some(id) = read_c_str(id) else {
        return FfiResult::null_arg("id");
    };
    with_screen(screen, "tasklist_screen_toggle_complete", |s| {
        match s.toggle_complete(&TodoId::new(id)) {
            Ok(outbound) => FfiResult::ok_outbound(outbound),
            Err(e) => FfiResult::from_error(e),
        }
    })
}

/// Delete `id`. The item leaves the list once the host reports success.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_delete(
    screen: *mut FfiScreen,
    id: *const c_char,
) -> *mut FfiResult {
    let Some(id) = read_c_str(id) else {
        return FfiResult::null_arg("id");
    };
    with_screen(screen, "tasklist_screen_delete", |s| {
        FfiResult::ok_outbound(s.delete(&TodoId::new(id)))
    })
}

/// Move the item at `index` one slot up (`direction < 0`) or down
/// (`direction > 0`). Local only; the next refresh restores server order.
/// Returns false when nothing moved.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_move_item(
    screen: *mut FfiScreen,
    index: u32,
    direction: i32,
) -> bool {
    if screen.is_null() {
        return false;
    }
    let direction = match direction.signum() {
        -1 => Direction::Up,
        1 => Direction::Down,
        _ => return false,
    };
    catch_unwind(AssertUnwindSafe(|| {
        let screen = unsafe { &mut *screen };
        screen.inner.move_item(index as usize, direction)
    }))
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Completions
// ---------------------------------------------------------------------------

/// Deliver the HTTP response for `ticket`.
///
/// Returns `data_tag = Outbound` when a follow-up request must be executed,
/// `None` otherwise, or an error result when the action failed. Failed
/// actions leave the list unchanged.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_complete(
    screen: *mut FfiScreen,
    ticket: u64,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    if response.is_null() {
        return FfiResult::null_arg("response");
    }
    with_screen(screen, "tasklist_screen_complete", |s| {
        let resp = unsafe { &*response };
        let response = HttpResponse::new(resp.status, read_c_str(resp.body).unwrap_or_default());
        FfiResult::from_outcome(s.complete(Ticket::from_raw(ticket), response))
    })
}

/// Report that the request for `ticket` produced no HTTP response.
/// `reason` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_fail(
    screen: *mut FfiScreen,
    ticket: u64,
    reason: *const c_char,
) -> *mut FfiResult {
    with_screen(screen, "tasklist_screen_fail", |s| {
        let reason = read_c_str(reason).unwrap_or_else(|| "transport failure".to_string());
        FfiResult::from_outcome(s.fail(Ticket::from_raw(ticket), reason))
    })
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Copy of the list in display order. Returns `data_tag = TodoList`.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_items(screen: *mut FfiScreen) -> *mut FfiResult {
    with_screen(screen, "tasklist_screen_items", |s| {
        FfiResult::ok_todo_list(s.items())
    })
}

/// Copy of the new-item input. Null if `screen` is null.
/// Free with `tasklist_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_input(screen: *const FfiScreen) -> *mut c_char {
    if screen.is_null() {
        return std::ptr::null_mut();
    }
    catch_unwind(|| c_string(unsafe { &*screen }.inner.input())).unwrap_or(std::ptr::null_mut())
}

/// Id of the item being edited, or null when idle.
/// Free with `tasklist_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_editing_id(screen: *const FfiScreen) -> *mut c_char {
    if screen.is_null() {
        return std::ptr::null_mut();
    }
    catch_unwind(|| {
        let screen = unsafe { &*screen };
        match screen.inner.editing() {
            tasklist_core::EditState::Editing { id, .. } => c_string(id.as_str()),
            tasklist_core::EditState::Idle => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Current edit draft, or null when idle.
/// Free with `tasklist_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_edit_draft(screen: *const FfiScreen) -> *mut c_char {
    if screen.is_null() {
        return std::ptr::null_mut();
    }
    catch_unwind(|| {
        let screen = unsafe { &*screen };
        match screen.inner.editing() {
            tasklist_core::EditState::Editing { draft, .. } => c_string(draft),
            tasklist_core::EditState::Idle => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Number of requests handed out and not yet completed.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_screen_in_flight(screen: *const FfiScreen) -> u32 {
    if screen.is_null() {
        return 0;
    }
    catch_unwind(|| unsafe { &*screen }.inner.in_flight() as u32).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiResult` returned by any `tasklist_screen_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_free_result(result: *mut FfiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        unsafe { result.free_fields() };
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn tasklist_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| unsafe { drop_c_string(s) });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    const LIST_BODY: &str = r#"[
        {"_id":"a1","title":"milk","completed":false},
        {"_id":"b2","title":"bread","completed":true}
    ]"#;

    fn new_screen(merge: bool) -> *mut FfiScreen {
        let url = CString::new("http://localhost:3000").unwrap();
        let screen = tasklist_screen_new(url.as_ptr(), merge);
        assert!(!screen.is_null());
        screen
    }

    fn outbound_of(result: *mut FfiResult) -> &'static FfiOutbound {
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.data_tag, FfiDataTag::Outbound);
        unsafe { &*(r.data as *const FfiOutbound) }
    }

    fn path_of(outbound: &FfiOutbound) -> String {
        unsafe { CStr::from_ptr(outbound.request.path) }
            .to_str()
            .unwrap()
            .to_string()
    }

    fn body_json(outbound: &FfiOutbound) -> serde_json::Value {
        let body = unsafe { CStr::from_ptr(outbound.request.body) }.to_str().unwrap();
        serde_json::from_str(body).unwrap()
    }

    fn respond(screen: *mut FfiScreen, ticket: u64, status: u16, body: &str) -> *mut FfiResult {
        let body = CString::new(body).unwrap();
        let resp = FfiHttpResponse {
            status,
            body: body.as_ptr(),
        };
        tasklist_screen_complete(screen, ticket, &resp)
    }

    fn titles(screen: *mut FfiScreen) -> Vec<String> {
        let result = tasklist_screen_items(screen);
        let r = unsafe { &*result };
        assert_eq!(r.data_tag, FfiDataTag::TodoList);
        let list = unsafe { &*(r.data as *const FfiTodoList) };
        let titles = if list.len == 0 {
            Vec::new()
        } else {
            let items = unsafe { std::slice::from_raw_parts(list.items, list.len as usize) };
            items
                .iter()
                .map(|t| unsafe { CStr::from_ptr(t.title) }.to_str().unwrap().to_string())
                .collect()
        };
        tasklist_free_result(result);
        titles
    }

    /// Load the two-item list into a fresh screen.
    fn loaded_screen(merge: bool) -> *mut FfiScreen {
        let screen = new_screen(merge);
        let result = tasklist_screen_refresh(screen);
        let ticket = outbound_of(result).ticket;
        tasklist_free_result(result);
        let done = respond(screen, ticket, 200, LIST_BODY);
        assert_eq!(unsafe { &*done }.data_tag, FfiDataTag::None);
        tasklist_free_result(done);
        screen
    }

    #[test]
    fn screen_new_and_free() {
        let screen = new_screen(false);
        tasklist_screen_free(screen);
    }

    #[test]
    fn screen_new_null_returns_null() {
        assert!(tasklist_screen_new(std::ptr::null(), false).is_null());
    }

    #[test]
    fn screen_free_null_is_safe() {
        tasklist_screen_free(std::ptr::null_mut());
    }

    #[test]
    fn refresh_builds_list_request() {
        let screen = new_screen(false);
        let result = tasklist_screen_refresh(screen);
        let outbound = outbound_of(result);
        assert_eq!(outbound.request.method, FfiHttpMethod::Get);
        assert_eq!(path_of(outbound), "http://localhost:3000/todos");
        assert!(outbound.request.body.is_null());
        assert_eq!(outbound.request.headers_len, 0);
        assert_eq!(tasklist_screen_in_flight(screen), 1);

        tasklist_free_result(result);
        tasklist_screen_free(screen);
    }

    #[test]
    fn completed_refresh_fills_the_list() {
        let screen = loaded_screen(false);
        assert_eq!(titles(screen), ["milk", "bread"]);
        assert_eq!(tasklist_screen_in_flight(screen), 0);
        tasklist_screen_free(screen);
    }

    #[test]
    fn add_with_empty_input_is_validation_error() {
        let screen = new_screen(false);
        let result = tasklist_screen_add(screen);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Validation);
        assert!(!r.error_message.is_null());
        assert!(r.data.is_null());
        assert_eq!(tasklist_screen_in_flight(screen), 0);

        tasklist_free_result(result);
        tasklist_screen_free(screen);
    }

    #[test]
    fn add_then_complete_requests_a_refresh() {
        let screen = loaded_screen(false);
        let text = CString::new("eggs").unwrap();
        tasklist_free_result(tasklist_screen_set_input(screen, text.as_ptr()));

        let result = tasklist_screen_add(screen);
        let outbound = outbound_of(result);
        assert_eq!(outbound.request.method, FfiHttpMethod::Post);
        assert_eq!(outbound.request.headers_len, 1);
        assert_eq!(body_json(outbound), serde_json::json!({"title": "eggs"}));
        let ticket = outbound.ticket;
        tasklist_free_result(result);

        let follow_up = respond(screen, ticket, 201, r#"{"_id":"c3","title":"eggs"}"#);
        let outbound = outbound_of(follow_up);
        assert_eq!(outbound.request.method, FfiHttpMethod::Get);
        tasklist_free_result(follow_up);

        let input = tasklist_screen_input(screen);
        assert_eq!(unsafe { CStr::from_ptr(input) }.to_str().unwrap(), "");
        tasklist_free_string(input);
        tasklist_screen_free(screen);
    }

    #[test]
    fn merge_mode_applies_created_item_without_follow_up() {
        let screen = loaded_screen(true);
        let text = CString::new("eggs").unwrap();
        tasklist_free_result(tasklist_screen_set_input(screen, text.as_ptr()));
        let result = tasklist_screen_add(screen);
        let ticket = outbound_of(result).ticket;
        tasklist_free_result(result);

        let done = respond(screen, ticket, 201, r#"{"_id":"c3","title":"eggs"}"#);
        assert_eq!(unsafe { &*done }.data_tag, FfiDataTag::None);
        tasklist_free_result(done);
        assert_eq!(titles(screen), ["milk", "bread", "eggs"]);
        tasklist_screen_free(screen);
    }

    #[test]
    fn toggle_sends_negated_completion() {
        let screen = loaded_screen(false);
        let id = CString::new("b2").unwrap();
        let result = tasklist_screen_toggle_complete(screen, id.as_ptr());
        let outbound = outbound_of(result);
        assert_eq!(outbound.request.method, FfiHttpMethod::Put);
        assert_eq!(path_of(outbound), "http://localhost:3000/todos/b2");
        assert_eq!(body_json(outbound), serde_json::json!({"completed": false}));

        tasklist_free_result(result);
        tasklist_screen_free(screen);
    }

    #[test]
    fn toggle_unknown_id_is_not_found() {
        let screen = loaded_screen(false);
        let id = CString::new("zz").unwrap();
        let result = tasklist_screen_toggle_complete(screen, id.as_ptr());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NotFound);
        assert_eq!(r.http_status, 404);

        tasklist_free_result(result);
        tasklist_screen_free(screen);
    }

    #[test]
    fn edit_flow_tracks_selection() {
        let screen = loaded_screen(false);
        assert!(tasklist_screen_editing_id(screen).is_null());

        let id = CString::new("a1").unwrap();
        assert!(tasklist_screen_begin_edit(screen, id.as_ptr()));
        let editing = tasklist_screen_editing_id(screen);
        assert_eq!(unsafe { CStr::from_ptr(editing) }.to_str().unwrap(), "a1");
        tasklist_free_string(editing);
        let draft = tasklist_screen_edit_draft(screen);
        assert_eq!(unsafe { CStr::from_ptr(draft) }.to_str().unwrap(), "milk");
        tasklist_free_string(draft);

        let text = CString::new("oat milk").unwrap();
        assert!(tasklist_screen_set_draft(screen, text.as_ptr()));
        let result = tasklist_screen_submit_edit(screen);
        let outbound = outbound_of(result);
        assert_eq!(body_json(outbound), serde_json::json!({"title": "oat milk"}));
        let ticket = outbound.ticket;
        tasklist_free_result(result);

        let follow_up = respond(screen, ticket, 200, "");
        tasklist_free_result(follow_up);
        assert!(tasklist_screen_editing_id(screen).is_null());
        tasklist_screen_free(screen);
    }

    #[test]
    fn delete_removes_item_on_success_only() {
        let screen = loaded_screen(false);
        let id = CString::new("a1").unwrap();

        let result = tasklist_screen_delete(screen, id.as_ptr());
        let outbound = outbound_of(result);
        assert_eq!(outbound.request.method, FfiHttpMethod::Delete);
        let ticket = outbound.ticket;
        tasklist_free_result(result);
        let failed = tasklist_screen_fail(screen, ticket, std::ptr::null());
        assert_eq!(unsafe { &*failed }.error_code, FfiErrorCode::Network);
        tasklist_free_result(failed);
        assert_eq!(titles(screen), ["milk", "bread"]);

        let result = tasklist_screen_delete(screen, id.as_ptr());
        let ticket = outbound_of(result).ticket;
        tasklist_free_result(result);
        let done = respond(screen, ticket, 204, "");
        assert_eq!(unsafe { &*done }.error_code, FfiErrorCode::Ok);
        tasklist_free_result(done);
        assert_eq!(titles(screen), ["bread"]);
        tasklist_screen_free(screen);
    }

    #[test]
    fn delete_not_found_keeps_list() {
        let screen = loaded_screen(false);
        let id = CString::new("zz").unwrap();
        let result = tasklist_screen_delete(screen, id.as_ptr());
        let ticket = outbound_of(result).ticket;
        tasklist_free_result(result);

        let done = respond(screen, ticket, 404, "");
        let r = unsafe { &*done };
        assert_eq!(r.error_code, FfiErrorCode::NotFound);
        assert!(!r.error_message.is_null());
        tasklist_free_result(done);
        assert_eq!(titles(screen), ["milk", "bread"]);
        tasklist_screen_free(screen);
    }

    #[test]
    fn move_item_swaps_locally() {
        let screen = loaded_screen(false);
        assert!(!tasklist_screen_move_item(screen, 0, -1));
        assert!(!tasklist_screen_move_item(screen, 0, 0));
        assert!(tasklist_screen_move_item(screen, 0, 1));
        assert_eq!(titles(screen), ["bread", "milk"]);
        tasklist_screen_free(screen);
    }

    #[test]
    fn server_error_reports_status() {
        let screen = new_screen(false);
        let result = tasklist_screen_refresh(screen);
        let ticket = outbound_of(result).ticket;
        tasklist_free_result(result);

        let done = respond(screen, ticket, 503, "down");
        let r = unsafe { &*done };
        assert_eq!(r.error_code, FfiErrorCode::Server);
        assert_eq!(r.http_status, 503);
        tasklist_free_result(done);
        tasklist_screen_free(screen);
    }

    #[test]
    fn null_arguments_are_reported() {
        let result = tasklist_screen_refresh(std::ptr::null_mut());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);
        tasklist_free_result(result);

        let screen = new_screen(false);
        let result = tasklist_screen_complete(screen, 1, std::ptr::null());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);
        tasklist_free_result(result);

        let result = tasklist_screen_delete(screen, std::ptr::null());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);
        tasklist_free_result(result);

        assert!(!tasklist_screen_begin_edit(std::ptr::null_mut(), std::ptr::null()));
        assert!(tasklist_screen_input(std::ptr::null()).is_null());
        tasklist_screen_free(screen);
    }

    #[test]
    fn panic_inside_screen_call_becomes_panic_result() {
        let screen = new_screen(false);
        let result = with_screen(screen, "test_op", |_| panic!("boom"));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Panic);
        assert!(r.data.is_null());
        let msg = unsafe { CStr::from_ptr(r.error_message) }.to_str().unwrap();
        assert_eq!(msg, "panic in test_op");
        tasklist_free_result(result);

        // The handle stays usable afterwards.
        let result = tasklist_screen_refresh(screen);
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::Ok);
        tasklist_free_result(result);
        tasklist_screen_free(screen);
    }

    #[test]
    fn interior_nul_in_title_is_dropped_on_the_way_out() {
        let screen = new_screen(false);
        let result = tasklist_screen_refresh(screen);
        let ticket = outbound_of(result).ticket;
        tasklist_free_result(result);
        let done = respond(screen, ticket, 200, r#"[{"_id":"1","title":"mi\u0000lk"}]"#);
        tasklist_free_result(done);
        assert_eq!(titles(screen), ["milk"]);
        tasklist_screen_free(screen);
    }

    #[test]
    fn generated_header_declares_the_entry_points() {
        let Some(path) = option_env!("TASKLIST_HEADER") else {
            return;
        };
        let header = std::fs::read_to_string(path).unwrap();
        assert!(header.contains("TASKLIST_H"));
        assert!(header.contains("tasklist_screen_new"));
        assert!(header.contains("tasklist_free_result"));
        assert!(!std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("include")
            .exists());
    }

    #[test]
    fn free_result_null_is_safe() {
        tasklist_free_result(std::ptr::null_mut());
    }

    #[test]
    fn free_string_null_is_safe() {
        tasklist_free_string(std::ptr::null_mut());
    }
}
