//! C API. Every returned string is owned by the caller and must be released
//! with [`singlish_free_string`]; every engine handle with
//! [`singlish_engine_close`].

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;
use std::sync::Arc;

use singlish_core::rules::RuleTable;
use singlish_core::Engine;
use tracing::warn;

#[cfg(test)]
mod tests;

/// Safely convert a C string pointer to a `&str`.
/// Returns `None` if the pointer is null or contains invalid UTF-8.
unsafe fn cptr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Hand a Rust string to C. Null if it contains an interior NUL.
fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).map_or(ptr::null_mut(), CString::into_raw)
}

#[no_mangle]
pub extern "C" fn singlish_engine_version() -> *const c_char {
    c"0.1.0".as_ptr()
}

/// Convert `text` with the default engine. Null on null or non-UTF-8 input.
#[no_mangle]
pub extern "C" fn singlish_convert(text: *const c_char) -> *mut c_char {
    let Some(text) = (unsafe { cptr_to_str(text) }) else {
        return ptr::null_mut();
    };
    into_c_string(singlish_core::convert(text))
}

/// One-shot conversion with an alternate rule table given as TOML.
/// Null if either argument is unusable or the rules fail to load.
#[no_mangle]
pub extern "C" fn singlish_convert_with_rules(
    rules_toml: *const c_char,
    text: *const c_char,
) -> *mut c_char {
    let engine = singlish_engine_open(rules_toml);
    if engine.is_null() {
        return ptr::null_mut();
    }
    let out = singlish_engine_convert(engine, text);
    singlish_engine_close(engine);
    out
}

/// Build an engine. A null `rules_toml` selects the embedded rule table.
#[no_mangle]
pub extern "C" fn singlish_engine_open(rules_toml: *const c_char) -> *mut Engine {
    let rules = if rules_toml.is_null() {
        RuleTable::default_shared()
    } else {
        let Some(toml) = (unsafe { cptr_to_str(rules_toml) }) else {
            return ptr::null_mut();
        };
        match RuleTable::from_toml(toml) {
            Ok(table) => Arc::new(table),
            Err(e) => {
                warn!(error = %e, "rule table rejected");
                return ptr::null_mut();
            }
        }
    };
    Box::into_raw(Box::new(Engine::new(rules)))
}

#[no_mangle]
pub extern "C" fn singlish_engine_convert(
    engine: *const Engine,
    text: *const c_char,
) -> *mut c_char {
    if engine.is_null() {
        return ptr::null_mut();
    }
    let Some(text) = (unsafe { cptr_to_str(text) }) else {
        return ptr::null_mut();
    };
    let engine = unsafe { &*engine };
    into_c_string(engine.convert(text))
}

#[no_mangle]
pub extern "C" fn singlish_engine_close(engine: *mut Engine) {
    if !engine.is_null() {
        unsafe {
            drop(Box::from_raw(engine));
        }
    }
}

#[no_mangle]
pub extern "C" fn singlish_free_string(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            drop(CString::from_raw(s));
        }
    }
}

/// Route engine traces to `<log_dir>/singlish-trace.jsonl`. No-op unless
/// built with the `trace` feature.
#[no_mangle]
pub extern "C" fn singlish_init_tracing(log_dir: *const c_char) {
    if let Some(dir) = unsafe { cptr_to_str(log_dir) } {
        crate::trace_init::init_tracing(Path::new(dir));
    }
}
