use gtk4::prelude::*;
use gtk4 as gtk;
use std::rc::Rc;

use crate::chat::message::{Message, Participant};
use crate::chat::store::ConversationStore;
use crate::ui::input_bar::InputBar;
use crate::ui::message_row;

pub struct ChatView;

impl ChatView {
    /// Renders `store` and keeps the list in sync with it until the view is destroyed.
    pub fn new(store: Rc<ConversationStore>, toasts: &adw::ToastOverlay) -> gtk::Widget {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 0);

        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .hscrollbar_policy(gtk::PolicyType::Never)
            .build();
        let list = gtk::ListBox::new();
        list.set_selection_mode(gtk::SelectionMode::None);
        list.add_css_class("background");
        scroller.set_child(Some(&list));
        root.append(&scroller);

        render(&list, &store.messages());
        scroll_to_bottom(&scroller);

        let subscription = {
            let list = list.clone();
            let scroller = scroller.clone();
            store.subscribe(move |messages| {
                render(&list, messages);
                scroll_to_bottom(&scroller);
            })
        };

        let input = {
            let store = store.clone();
            let toasts = toasts.clone();
            InputBar::new(move |text| {
                if let Err(err) = store.send_message(Message::text(Participant::Me, text)) {
                    log::warn!("message not sent: {}", err);
                    toasts.add_toast(adw::Toast::new(&err.to_string()));
                }
            })
        };
        root.append(&input.widget());

        // The observer holds widget references; drop it with the view.
        root.connect_destroy(move |_| store.unsubscribe(subscription));

        root.upcast()
    }
}

fn render(list: &gtk::ListBox, messages: &[Message]) {
    while let Some(child) = list.first_child() {
        list.remove(&child);
    }
    for message in messages {
        list.append(&message_row::build(message));
    }
}

// Adjustment bounds only grow after the next layout pass.
fn scroll_to_bottom(scroller: &gtk::ScrolledWindow) {
    let scroller = scroller.downgrade();
    gtk::glib::idle_add_local_once(move || {
        if let Some(scroller) = scroller.upgrade() {
            let adj = scroller.vadjustment();
            adj.set_value(adj.upper() - adj.page_size());
        }
    });
}
