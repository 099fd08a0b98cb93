use adw::prelude::*;
use adw::Application;
use std::rc::Rc;

use crate::api::client::CompletionClient;
use crate::app::AppConfig;
use crate::chat::store::ConversationStore;

pub const APP_TITLE: &str = "OpenAI";

/// Shows the process-wide conversation, sending through a client built from `config`.
pub fn show_main_window(app: &Application, config: AppConfig, store: Rc<ConversationStore>) {
    match CompletionClient::new(&config) {
        Ok(client) => store.reconfigure(Rc::new(client), config.max_tokens),
        Err(err) => {
            log::error!("cannot create completion client: {}", err);
            crate::ui::credentials::show_credentials_window(app, AppConfig::load_file(), store);
            return;
        }
    }

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title(APP_TITLE)
        .default_width(480)
        .default_height(720)
        .build();

    let overlay = adw::ToastOverlay::new();

    log::info!("showing conversation of {} message(s), model {}", store.len(), config.model);
    let chat = crate::ui::chat_view::ChatView::new(store.clone(), &overlay);
    overlay.set_child(Some(&chat));

    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk4::Label::new(Some(APP_TITLE));
    title.add_css_class("title");
    header.set_title_widget(Some(&title));

    let settings_btn = gtk4::Button::from_icon_name("preferences-system-symbolic");
    settings_btn.set_tooltip_text(Some("API settings"));
    header.pack_end(&settings_btn);
    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));
    window.present();

    {
        let app = app.clone();
        let window = window.downgrade();
        settings_btn.connect_clicked(move |_| {
            crate::ui::credentials::show_credentials_window(&app, AppConfig::load_file(), store.clone());
            if let Some(window) = window.upgrade() {
                window.close();
            }
        });
    }
}
