use coachchat_chat::ChatView;
use coachchat_types::USER_SENDER;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::dom::{self, MessageInput};

/// Renders messages into the `chat-messages` container
pub struct DomView {
    document: Document,
    messages: Element,
    input: MessageInput,
    send_button: Element,
}

impl DomView {
    pub fn new(document: Document, messages: Element, input: MessageInput, send_button: Element) -> Self {
        Self {
            document,
            messages,
            input,
            send_button,
        }
    }

    fn append_message(&self, sender: &str, text: &str) -> Result<(), JsValue> {
        let class = if sender == USER_SENDER {
            "message user-message"
        } else {
            "message bot-message"
        };
        let message_div = dom::create_element_with_class(&self.document, "div", class)?;

        let sender_span = dom::create_element_with_class(&self.document, "span", "sender")?;
        sender_span.set_text_content(Some(&format!("{}: ", sender)));

        // Text content only; replies are never interpreted as markup.
        let text_span = self.document.create_element("span")?;
        text_span.set_text_content(Some(text));

        message_div.append_child(&sender_span)?;
        message_div.append_child(&text_span)?;
        self.messages.append_child(&message_div)?;

        dom::scroll_to_bottom(&self.messages);
        Ok(())
    }
}

impl ChatView for DomView {
    fn clear(&mut self) {
        dom::clear_element(&self.messages);
    }

    fn show_message(&mut self, sender: &str, text: &str) {
        if let Err(e) = self.append_message(sender, text) {
            log::error!("Failed to render message: {:?}", e);
        }
    }

    fn set_busy(&mut self, busy: bool) {
        self.input.set_disabled(busy);
        dom::set_disabled(&self.send_button, busy);
    }
}
