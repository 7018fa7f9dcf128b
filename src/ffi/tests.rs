use super::*;
use std::ffi::{CStr, CString};
use std::ptr;

fn take(s: *mut c_char) -> String {
    assert!(!s.is_null());
    let out = unsafe { CStr::from_ptr(s) }.to_str().unwrap().to_string();
    singlish_free_string(s);
    out
}

#[test]
fn test_ffi_convert() {
    let text = CString::new("api heta gedhara yamu").unwrap();
    assert_eq!(take(singlish_convert(text.as_ptr())), "අපි හෙට ගෙදර යමු");
}

#[test]
fn test_ffi_convert_empty() {
    let text = CString::new("").unwrap();
    assert_eq!(take(singlish_convert(text.as_ptr())), "");
}

#[test]
fn test_ffi_null_safety() {
    assert!(singlish_convert(ptr::null()).is_null());
    assert!(singlish_engine_convert(ptr::null(), ptr::null()).is_null());
    singlish_free_string(ptr::null_mut());
    singlish_engine_close(ptr::null_mut());
    singlish_init_tracing(ptr::null());
}

#[test]
fn test_ffi_invalid_utf8() {
    let bytes = [0x61u8, 0xff, 0x00];
    let text = CStr::from_bytes_with_nul(&bytes).unwrap();
    assert!(singlish_convert(text.as_ptr()).is_null());
}

#[test]
fn test_ffi_engine_handle() {
    let engine = singlish_engine_open(ptr::null());
    assert!(!engine.is_null());
    let text = CString::new("Rs. 2500k vatinavaa").unwrap();
    assert_eq!(
        take(singlish_engine_convert(engine, text.as_ptr())),
        "Rs. 2500ක් වටිනවා"
    );
    singlish_engine_close(engine);
}

#[test]
fn test_ffi_convert_with_rules() {
    let rules = CString::new(
        "version = \"t\"\n[consonants]\nk = \"ක\"\n[vowels]\na = { independent = \"අ\", sign = \"\" }\n",
    )
    .unwrap();
    let text = CString::new("kaka ak").unwrap();
    assert_eq!(
        take(singlish_convert_with_rules(rules.as_ptr(), text.as_ptr())),
        "කක අක්"
    );

    let broken = CString::new("version = \"\"").unwrap();
    assert!(singlish_convert_with_rules(broken.as_ptr(), text.as_ptr()).is_null());
}

#[test]
fn test_ffi_version() {
    let v = unsafe { CStr::from_ptr(singlish_engine_version()) };
    assert_eq!(v.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
}
