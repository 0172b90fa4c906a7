//! WASM bindings for the LIFT UP extraction upload page
//!
//! The page logic lives in `liftup-core`; this crate wires it to the DOM,
//! `fetch` and browser timers.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { LiftUpApp } from './pkg/liftup_wasm.js';
//!
//! await init();
//! const app = new LiftUpApp({ baseUrl: "", locale: "tr" });
//! ```

mod app;
mod backend;
mod dom;
mod logging;
mod timer;
mod ui;

use wasm_bindgen::prelude::*;

pub use app::LiftUpApp;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Human readable size, e.g. `1.5 MB`
#[wasm_bindgen]
pub fn format_file_size(bytes: f64) -> String {
    // File.size is a non-negative integer in a double
    let bytes = if bytes.is_finite() && bytes > 0.0 {
        bytes as u64
    } else {
        0
    };
    liftup_core::format_file_size(bytes)
}

/// Cut `text` to `max_chars` characters, appending "..." when shortened
#[wasm_bindgen]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    liftup_core::truncate_text(text, max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_format_file_size_from_js_number() {
        assert_eq!(format_file_size(0.0), "0 Bytes");
        assert_eq!(format_file_size(1536.0), "1.5 KB");
        assert_eq!(format_file_size(-1.0), "0 Bytes");
        assert_eq!(format_file_size(f64::NAN), "0 Bytes");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 50), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
    }
}
