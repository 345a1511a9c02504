use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

mod dom;
mod storage;
mod transport;
mod view;
mod widget;

pub use storage::LocalStorageStore;
pub use transport::FetchTransport;
pub use view::DomView;
pub use widget::{ChatWidget, CHAT_MESSAGES_ID, COACH_SELECT_ID, MESSAGE_INPUT_ID, SEND_BUTTON_ID};

/// Initialize the WASM module
/// This sets up panic hooks and logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("Coachchat WASM initialized");
}

/// Wire the chat widget into the current page.
///
/// Keep the returned handle alive for as long as the widget should respond;
/// call `unmount()` on it to detach.
#[wasm_bindgen(js_name = initChatWidget)]
pub fn init_chat_widget() -> Result<ChatWidget, JsValue> {
    ChatWidget::mount(&document()?)
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))
}

fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))
}
