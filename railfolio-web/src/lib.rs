#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod app;
pub mod components;
pub mod dom;
pub mod host;
pub mod i18n;
pub mod input;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Mirror the default language onto <html lang> before the first render
    crate::i18n::set_lang(crate::i18n::current_lang());
    yew::Renderer::<app::App>::new().render();
}
