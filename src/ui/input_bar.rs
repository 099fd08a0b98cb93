use gtk4::prelude::*;
use gtk4 as gtk;
use std::rc::Rc;

const BOTTOM_PADDING_EDITING: i32 = 8;
const BOTTOM_PADDING_IDLE: i32 = 20;

pub struct InputBar {
    root: gtk::Box,
}

impl InputBar {
    /// `on_commit` receives the entered text as typed; blank input never reaches it.
    pub fn new<F>(on_commit: F) -> Self
    where
        F: Fn(String) + 'static,
    {
        let root = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        root.add_css_class("input-bar");
        root.set_margin_bottom(BOTTOM_PADDING_IDLE);

        let entry = gtk::Entry::new();
        entry.set_hexpand(true);
        entry.set_placeholder_text(Some("Type something"));
        let send_btn = gtk::Button::from_icon_name("mail-send-symbolic");
        send_btn.set_tooltip_text(Some("Send"));
        send_btn.add_css_class("suggested-action");
        root.append(&entry);
        root.append(&send_btn);

        let send: Rc<dyn Fn()> = {
            let entry = entry.clone();
            Rc::new(move || {
                let Some(text) = committed_text(&entry.text()) else {
                    return;
                };
                entry.set_text("");
                on_commit(text);
            })
        };
        {
            let send = send.clone();
            send_btn.connect_clicked(move |_| (send)());
        }
        {
            let send = send.clone();
            entry.connect_activate(move |_| (send)());
        }

        let focus = gtk::EventControllerFocus::new();
        {
            let root = root.downgrade();
            focus.connect_enter(move |_| {
                if let Some(root) = root.upgrade() {
                    root.set_margin_bottom(BOTTOM_PADDING_EDITING);
                }
            });
        }
        {
            let root = root.downgrade();
            focus.connect_leave(move |_| {
                if let Some(root) = root.upgrade() {
                    root.set_margin_bottom(BOTTOM_PADDING_IDLE);
                }
            });
        }
        entry.add_controller(focus);

        Self { root }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }
}

fn committed_text(raw: &str) -> Option<String> {
    if raw.trim().is_empty() { None } else { Some(raw.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_not_committed() {
        assert_eq!(committed_text(""), None);
        assert_eq!(committed_text(" \n\t"), None);
    }

    #[test]
    fn text_is_committed_as_typed() {
        assert_eq!(committed_text(" ping ").as_deref(), Some(" ping "));
    }
}
