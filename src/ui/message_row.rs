use gtk4::prelude::*;
use gtk4 as gtk;

use crate::chat::message::{Message, MessageKind};
use crate::ui::style::{AVATAR_SIZE, AVATAR_SPACING, CellTheme};

/// One conversation cell: avatar plus bubble, laid out for the message's side.
pub fn build(message: &Message) -> gtk::ListBoxRow {
    let theme = CellTheme::for_sender(message.is_sender());

    let row = gtk::ListBoxRow::new();
    row.set_activatable(false);
    row.set_selectable(false);
    row.set_tooltip_text(Some(&message.date.with_timezone(&chrono::Local).format("%H:%M").to_string()));

    let line = gtk::Box::new(gtk::Orientation::Horizontal, AVATAR_SPACING);
    line.set_halign(theme.halign);
    line.set_margin_start(theme.margin_start);
    line.set_margin_end(theme.margin_end);
    line.set_margin_top(theme.margin_vertical);
    line.set_margin_bottom(theme.margin_vertical);

    let avatar = adw::Avatar::new(AVATAR_SIZE, Some(message.user.name()), true);
    avatar.set_valign(gtk::Align::Start);

    let bubble = gtk::Box::new(gtk::Orientation::Vertical, 0);
    bubble.add_css_class("bubble");
    bubble.add_css_class(theme.css_class);

    match &message.kind {
        MessageKind::Text(text) => {
            let label = gtk::Label::new(Some(text));
            label.set_wrap(true);
            label.set_wrap_mode(gtk::pango::WrapMode::WordChar);
            label.set_xalign(0.0);
            bubble.append(&label);
            attach_copy_menu(&bubble, text);
        }
        MessageKind::Loading => {
            let spinner = gtk::Spinner::new();
            spinner.start();
            bubble.append(&spinner);
        }
    }

    if theme.avatar_trailing {
        line.append(&bubble);
        line.append(&avatar);
    } else {
        line.append(&avatar);
        line.append(&bubble);
    }
    row.set_child(Some(&line));
    row
}

// Secondary click or long press opens a "Copy" popover.
fn attach_copy_menu(bubble: &gtk::Box, text: &str) {
    let popover = gtk::Popover::new();
    popover.set_has_arrow(true);

    let content = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    content.append(&gtk::Label::new(Some("Copy")));
    content.append(&gtk::Image::from_icon_name("edit-copy-symbolic"));
    let copy_btn = gtk::Button::new();
    copy_btn.set_child(Some(&content));
    copy_btn.add_css_class("flat");
    popover.set_child(Some(&copy_btn));
    popover.set_parent(bubble);

    {
        let text = text.to_string();
        let bubble = bubble.downgrade();
        let popover = popover.downgrade();
        copy_btn.connect_clicked(move |_| {
            if let Some(bubble) = bubble.upgrade() {
                bubble.clipboard().set_text(&text);
                log::debug!("copied {} chars to clipboard", text.len());
            }
            if let Some(popover) = popover.upgrade() {
                popover.popdown();
            }
        });
    }

    let click = gtk::GestureClick::new();
    click.set_button(gtk::gdk::BUTTON_SECONDARY);
    {
        let popover = popover.downgrade();
        click.connect_pressed(move |_, _, _, _| {
            if let Some(popover) = popover.upgrade() {
                popover.popup();
            }
        });
    }
    bubble.add_controller(click);

    let long_press = gtk::GestureLongPress::new();
    {
        let popover = popover.downgrade();
        long_press.connect_pressed(move |_, _, _| {
            if let Some(popover) = popover.upgrade() {
                popover.popup();
            }
        });
    }
    bubble.add_controller(long_press);

    bubble.connect_destroy(move |_| popover.unparent());
}
