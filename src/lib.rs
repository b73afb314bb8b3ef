#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;
pub mod chat;
pub mod device;
pub mod gestures;
pub mod highlight;
pub mod i18n;
pub mod loader;
pub mod notify;
pub mod projects;
pub mod reveal;
pub mod route;
pub mod scrollbar;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("client build {}", env!("BUILD_TIME"));
    leptos::mount::hydrate_body(App);
}
