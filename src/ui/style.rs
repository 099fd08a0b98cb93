use gtk4 as gtk;

pub const AVATAR_SIZE: i32 = 32;
pub const AVATAR_SPACING: i32 = 6;
const CELL_INSET_NEAR: i32 = 4;
const CELL_INSET_FAR: i32 = 50;
const CELL_INSET_VERTICAL: i32 = 2;

const CSS: &str = r#"
.bubble {
    padding: 12px;
    border-radius: 16px;
}
.bubble.outgoing {
    background-color: @accent_bg_color;
    color: @accent_fg_color;
}
.bubble.incoming {
    background-color: alpha(@view_fg_color, 0.08);
    color: @view_fg_color;
}
.bubble label {
    font-weight: normal;
}
.input-bar {
    padding: 8px;
    background-color: @view_bg_color;
}
"#;

/// Visual theme of one side of the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellTheme {
    pub css_class: &'static str,
    pub halign: gtk::Align,
    pub margin_start: i32,
    pub margin_end: i32,
    pub margin_vertical: i32,
    /// Avatar sits after the bubble for outgoing messages.
    pub avatar_trailing: bool,
}

impl CellTheme {
    pub const OUTGOING: CellTheme = CellTheme {
        css_class: "outgoing",
        halign: gtk::Align::End,
        margin_start: CELL_INSET_FAR,
        margin_end: CELL_INSET_NEAR,
        margin_vertical: CELL_INSET_VERTICAL,
        avatar_trailing: true,
    };

    pub const INCOMING: CellTheme = CellTheme {
        css_class: "incoming",
        halign: gtk::Align::Start,
        margin_start: CELL_INSET_NEAR,
        margin_end: CELL_INSET_FAR,
        margin_vertical: CELL_INSET_VERTICAL,
        avatar_trailing: false,
    };

    pub fn for_sender(is_sender: bool) -> CellTheme {
        if is_sender { Self::OUTGOING } else { Self::INCOMING }
    }
}

pub fn load_css() {
    let Some(display) = gtk::gdk::Display::default() else {
        log::warn!("no display available, skipping stylesheet");
        return;
    };
    let provider = gtk::CssProvider::new();
    provider.load_from_data(CSS);
    gtk::style_context_add_provider_for_display(&display, &provider, gtk::STYLE_PROVIDER_PRIORITY_APPLICATION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_mirror_each_other() {
        let out = CellTheme::for_sender(true);
        let inc = CellTheme::for_sender(false);
        assert_eq!(out.margin_start, inc.margin_end);
        assert_eq!(out.margin_end, inc.margin_start);
        assert_eq!(out.halign, gtk::Align::End);
        assert_eq!(inc.halign, gtk::Align::Start);
        assert_ne!(out.css_class, inc.css_class);
        assert!(out.avatar_trailing && !inc.avatar_trailing);
    }
}
