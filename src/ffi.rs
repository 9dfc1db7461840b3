//! C ABI entry points.
//!
//! Requests and responses cross the boundary as NUL-terminated JSON strings:
//! the input is a [`TransportRequest`], the output a [`TransportResponse`].
//! Every string returned here must be released with
//! [`u_transport_string_free`].

use std::ffi::{CStr, CString};

use libc::c_char;

use crate::error::ErrorKind;
use crate::solver::{TransportRequest, TransportResponse};

fn failure(message: String) -> TransportResponse {
    TransportResponse {
        success: false,
        message,
        total_cost: 0.0,
        allocation: Vec::new(),
        routes: Vec::new(),
        is_optimal: false,
        iterations: 0,
        initial_method: None,
        error_kind: Some(ErrorKind::Validation),
    }
}

fn respond(input: &str) -> TransportResponse {
    match serde_json::from_str::<TransportRequest>(input) {
        Ok(request) => request.solve(),
        Err(e) => failure(format!("invalid request: {e}")),
    }
}

fn into_c_string(response: &TransportResponse) -> *mut c_char {
    serde_json::to_string(response)
        .ok()
        .and_then(|json| CString::new(json).ok())
        .map_or(std::ptr::null_mut(), CString::into_raw)
}

/// Solves a JSON-encoded transportation request.
///
/// Always returns a JSON response: malformed input yields
/// `"success": false` with a validation error. Returns null only if the
/// response could not be encoded.
///
/// # Safety
///
/// `request` must be null or point to a valid NUL-terminated string that
/// stays alive for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn u_transport_solve_json(request: *const c_char) -> *mut c_char {
    if request.is_null() {
        return into_c_string(&failure("request is null".to_string()));
    }
    let response = match CStr::from_ptr(request).to_str() {
        Ok(input) => respond(input),
        Err(e) => failure(format!("request is not valid UTF-8: {e}")),
    };
    into_c_string(&response)
}

/// Frees a string returned by [`u_transport_solve_json`].
///
/// # Safety
///
/// `ptr` must be null or a pointer obtained from this library that has not
/// been freed yet.
#[no_mangle]
pub unsafe extern "C" fn u_transport_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(json: &str) -> TransportResponse {
        let input = CString::new(json).expect("no NUL");
        unsafe {
            let out = u_transport_solve_json(input.as_ptr());
            assert!(!out.is_null());
            let text = CStr::from_ptr(out).to_str().expect("utf-8").to_owned();
            u_transport_string_free(out);
            serde_json::from_str(&text).expect("response json")
        }
    }

    #[test]
    fn test_solve_json() {
        let resp = call(r#"{"supply":[500,400],"demand":[300,600],"costs":[[4,6],[5,3]]}"#);
        assert!(resp.success);
        assert_eq!(resp.total_cost, 3600.0);
    }

    #[test]
    fn test_malformed_json() {
        let resp = call("{not json");
        assert!(!resp.success);
        assert_eq!(resp.error_kind, Some(ErrorKind::Validation));
        assert!(resp.message.starts_with("invalid request"));
    }

    #[test]
    fn test_null_input() {
        unsafe {
            let out = u_transport_solve_json(std::ptr::null());
            assert!(!out.is_null());
            u_transport_string_free(out);
            u_transport_string_free(std::ptr::null_mut());
        }
    }
}
