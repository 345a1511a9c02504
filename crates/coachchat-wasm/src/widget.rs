use std::cell::RefCell;
use std::rc::{Rc, Weak};

use coachchat_chat::{ChatSession, ChatTransport};
use coachchat_history::HistoryStore;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlSelectElement};

use crate::dom::{Listener, MessageInput};
use crate::storage::LocalStorageStore;
use crate::transport::FetchTransport;
use crate::view::DomView;

pub const MESSAGE_INPUT_ID: &str = "message-input";
pub const SEND_BUTTON_ID: &str = "send-button";
pub const CHAT_MESSAGES_ID: &str = "chat-messages";
pub const COACH_SELECT_ID: &str = "coach-select";

/// Attribute on the messages container naming the chat endpoint
pub const ENDPOINT_ATTRIBUTE: &str = "data-endpoint";
pub const DEFAULT_ENDPOINT: &str = "/";

type Session = ChatSession<LocalStorageStore, DomView>;

/// A mounted chat widget.
///
/// The widget holds the only strong reference to its session; event handlers
/// and in-flight requests hold weak ones, so [`unmount`](ChatWidget::unmount)
/// tears everything down and late replies are dropped.
#[wasm_bindgen]
pub struct ChatWidget {
    session: Rc<RefCell<Session>>,
    _listeners: Vec<Listener>,
}

struct Elements {
    input: MessageInput,
    send_button: Element,
    messages: Element,
    coach_select: HtmlSelectElement,
}

fn find_elements(document: &Document) -> Result<Elements, JsValue> {
    let input = document.get_element_by_id(MESSAGE_INPUT_ID);
    let send_button = document.get_element_by_id(SEND_BUTTON_ID);
    let messages = document.get_element_by_id(CHAT_MESSAGES_ID);
    let coach_select = document.get_element_by_id(COACH_SELECT_ID);

    // Report every missing element before giving up.
    for (id, found) in [
        (MESSAGE_INPUT_ID, input.is_some()),
        (SEND_BUTTON_ID, send_button.is_some()),
        (CHAT_MESSAGES_ID, messages.is_some()),
        (COACH_SELECT_ID, coach_select.is_some()),
    ] {
        if !found {
            log::error!("Element '{}' not found!", id);
        }
    }

    let (Some(input), Some(send_button), Some(messages), Some(coach_select)) =
        (input, send_button, messages, coach_select)
    else {
        return Err(abort("One or more critical chat elements are missing"));
    };

    let input = MessageInput::from_element(input).map_err(|_| {
        log::error!("Element '{}' is neither <input> nor <textarea>", MESSAGE_INPUT_ID);
        abort("Message input has the wrong element type")
    })?;
    let coach_select = coach_select.dyn_into::<HtmlSelectElement>().map_err(|_| {
        log::error!("Element '{}' is not a <select>", COACH_SELECT_ID);
        abort("Coach selector has the wrong element type")
    })?;

    Ok(Elements {
        input,
        send_button,
        messages,
        coach_select,
    })
}

fn abort(reason: &str) -> JsValue {
    log::error!("One or more critical elements missing or invalid, aborting chat setup");
    JsValue::from_str(reason)
}

impl ChatWidget {
    pub fn mount(document: &Document) -> Result<Self, JsValue> {
        let elements = find_elements(document)?;

        let endpoint = elements
            .messages
            .get_attribute(ENDPOINT_ATTRIBUTE)
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        log::info!("Mounting chat widget, endpoint {}", endpoint);

        let view = DomView::new(
            document.clone(),
            elements.messages.clone(),
            elements.input.clone(),
            elements.send_button.clone(),
        );
        let store = HistoryStore::new(LocalStorageStore::from_window());
        let session = Rc::new(RefCell::new(ChatSession::new(store, view)));
        session.borrow_mut().mount();

        let transport = Rc::new(FetchTransport::new(endpoint));
        let sender = Sender {
            session: Rc::downgrade(&session),
            transport,
            input: elements.input.clone(),
            coach_select: elements.coach_select,
        };

        let mut listeners = Vec::with_capacity(2);

        let on_click = sender.clone();
        listeners.push(Listener::attach(
            elements.send_button.unchecked_ref(),
            "click",
            move |_event| on_click.send(),
        )?);

        let on_key = sender;
        listeners.push(Listener::attach(
            elements.input.target(),
            "keydown",
            move |event| {
                let Some(key_event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                    return;
                };
                if key_event.key() == "Enter" && !key_event.shift_key() {
                    event.prevent_default();
                    on_key.send();
                }
            },
        )?);

        Ok(Self {
            session,
            _listeners: listeners,
        })
    }

    pub fn turn_count(&self) -> usize {
        self.session.borrow().history().len()
    }
}

#[wasm_bindgen]
impl ChatWidget {
    /// Detach every handler and drop the session. Replies still in flight
    /// are discarded.
    pub fn unmount(self) {
        log::info!("Unmounting chat widget");
    }

    /// Forget the stored conversation
    #[wasm_bindgen(js_name = clearHistory)]
    pub fn clear_history(&self) {
        self.session.borrow_mut().clear_history();
    }
}

/// Everything a UI event needs to start an exchange
#[derive(Clone)]
struct Sender {
    session: Weak<RefCell<Session>>,
    transport: Rc<FetchTransport>,
    input: MessageInput,
    coach_select: HtmlSelectElement,
}

impl Sender {
    fn send(&self) {
        let Some(session) = self.session.upgrade() else {
            return;
        };

        let message = self.input.value();
        let coach_name = self.coach_select.value();

        let pending = match session.borrow_mut().begin(&message, &coach_name) {
            Ok(pending) => pending,
            Err(reason) => {
                log::debug!("Message not sent: {}", reason);
                return;
            }
        };
        self.input.set_value("");

        let weak = self.session.clone();
        let transport = self.transport.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = transport.send(&pending.request).await;
            match weak.upgrade() {
                Some(session) => {
                    session.borrow_mut().resolve(&pending, result);
                }
                None => log::debug!("Widget unmounted, dropping reply for {}", pending.turn_id),
            }
        });
    }
}
