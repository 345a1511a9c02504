use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

/// Create element with class
pub fn create_element_with_class(
    document: &Document,
    tag: &str,
    class: &str,
) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    Ok(element)
}

/// Clear element content
pub fn clear_element(element: &Element) {
    element.set_inner_html("");
}

/// Scroll element to bottom
pub fn scroll_to_bottom(element: &Element) {
    if let Ok(html_element) = element.clone().dyn_into::<HtmlElement>() {
        html_element.set_scroll_top(html_element.scroll_height());
    }
}

/// Text entry the user types messages into; pages use either an `<input>`
/// or a `<textarea>`.
#[derive(Clone)]
pub enum MessageInput {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl MessageInput {
    pub fn from_element(element: Element) -> Result<Self, JsValue> {
        let element = match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(textarea) => return Ok(MessageInput::TextArea(textarea)),
            Err(element) => element,
        };
        element
            .dyn_into::<HtmlInputElement>()
            .map(MessageInput::Input)
            .map_err(|_| JsValue::from_str("Message input is neither <input> nor <textarea>"))
    }

    pub fn value(&self) -> String {
        match self {
            MessageInput::Input(input) => input.value(),
            MessageInput::TextArea(textarea) => textarea.value(),
        }
    }

    pub fn set_value(&self, value: &str) {
        match self {
            MessageInput::Input(input) => input.set_value(value),
            MessageInput::TextArea(textarea) => textarea.set_value(value),
        }
    }

    pub fn set_disabled(&self, disabled: bool) {
        match self {
            MessageInput::Input(input) => input.set_disabled(disabled),
            MessageInput::TextArea(textarea) => textarea.set_disabled(disabled),
        }
    }

    pub fn target(&self) -> &EventTarget {
        match self {
            MessageInput::Input(input) => input.as_ref(),
            MessageInput::TextArea(textarea) => textarea.as_ref(),
        }
    }
}

/// Toggle the `disabled` attribute on any element
pub fn set_disabled(element: &Element, disabled: bool) {
    let result = if disabled {
        element.set_attribute("disabled", "")
    } else {
        element.remove_attribute("disabled")
    };
    if let Err(e) = result {
        log::debug!("Failed to toggle disabled: {:?}", e);
    }
}

/// An attached event listener, detached again when dropped
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    pub fn attach<F>(target: &EventTarget, event: &'static str, callback: F) -> Result<Self, JsValue>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(web_sys::Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
