use wasm_bindgen::prelude::*;

// Binds console.log from JS; the console_log! macro in lib.rs goes through
// this so pure modules never touch the console directly.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);
}
