use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::chat::message::{Message, MessageKind, Participant};
use crate::chat::seed;
use crate::error::{ApiError, ChatError};

pub type CompletionCallback = Box<dyn FnOnce(Result<Option<String>, ApiError>)>;

/// Issues completion requests on behalf of the store. Implementations must invoke
/// `on_done` on the thread that owns the store.
pub trait Completer {
    fn complete(&self, prompt: String, max_tokens: u32, on_done: CompletionCallback);
}

/// Stands in until an API client is configured. Every request fails with
/// `ApiError::MissingCredential`.
pub struct Unconfigured;

impl Completer for Unconfigured {
    fn complete(&self, _prompt: String, _max_tokens: u32, on_done: CompletionCallback) {
        on_done(Err(ApiError::MissingCredential));
    }
}

type Observer = Rc<dyn Fn(&[Message])>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

pub struct ConversationStore {
    messages: RefCell<Vec<Message>>,
    observers: RefCell<Vec<(SubscriptionId, Observer)>>,
    next_subscription: Cell<u64>,
    completer: RefCell<Rc<dyn Completer>>,
    max_tokens: Cell<u32>,
}

impl ConversationStore {
    pub fn new(seed: Vec<Message>, completer: Rc<dyn Completer>, max_tokens: u32) -> Rc<Self> {
        Rc::new(Self {
            messages: RefCell::new(seed),
            observers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
            completer: RefCell::new(completer),
            max_tokens: Cell::new(max_tokens),
        })
    }

    pub fn with_seed(completer: Rc<dyn Completer>, max_tokens: u32) -> Rc<Self> {
        Self::new(seed::transcript(), completer, max_tokens)
    }

    /// Routes later sends through `completer`. The conversation itself is kept.
    pub fn reconfigure(&self, completer: Rc<dyn Completer>, max_tokens: u32) {
        *self.completer.borrow_mut() = completer;
        self.max_tokens.set(max_tokens);
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&[Message]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.observers.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    // Observers get a snapshot so they may call back into the store.
    fn notify(&self) {
        let snapshot = self.messages();
        let observers: Vec<Observer> = self.observers.borrow().iter().map(|(_, o)| o.clone()).collect();
        log::debug!("notifying {} observer(s), {} message(s)", observers.len(), snapshot.len());
        for observer in observers {
            observer(&snapshot);
        }
    }

    fn push(&self, message: Message) {
        self.messages.borrow_mut().push(message);
        self.notify();
    }

    /// Appends `message` and a loading placeholder, then asks the completer for a
    /// reply. The placeholder is swapped for the reply once it arrives.
    ///
    /// Only one send may be in flight: the reply replaces whatever message is last.
    pub fn send_message(self: &Rc<Self>, message: Message) -> Result<(), ChatError> {
        let prompt = match &message.kind {
            MessageKind::Text(text) => text.clone(),
            other => return Err(ChatError::UnsupportedMessageKind(other.label())),
        };

        self.push(message);
        self.push(Message::loading());

        let completer = self.completer.borrow().clone();
        let store = Rc::downgrade(self);
        completer.complete(
            prompt,
            self.max_tokens.get(),
            Box::new(move |result| match store.upgrade() {
                Some(store) => store.finish_send(result),
                None => log::debug!("conversation closed before the reply arrived"),
            }),
        );
        Ok(())
    }

    fn finish_send(&self, result: Result<Option<String>, ApiError>) {
        match result {
            Ok(text) => {
                let text = text.map(|t| t.trim().to_string()).unwrap_or_default();
                self.messages.borrow_mut().pop();
                self.push(Message::text(Participant::Ai, text));
            }
            Err(err) => log::error!("completion request failed: {}", err),
        }
    }
}
