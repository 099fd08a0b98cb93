use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use std::rc::Rc;

use crate::api::client::CompletionClient;
use crate::app::AppConfig;
use crate::chat::store::ConversationStore;
use crate::error::ApiError;

/// Asks for the API endpoint and key, checks them against the server, saves them
/// and opens the chat window.
pub fn show_credentials_window(app: &Application, config: AppConfig, store: Rc<ConversationStore>) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("OpenAI Setup")
        .default_width(420)
        .default_height(280)
        .resizable(false)
        .build();

    let toast_overlay = adw::ToastOverlay::new();

    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_margin_start(24);
    root.set_margin_end(24);

    let title = gtk::Label::new(Some("Connect to a completion API"));
    title.add_css_class("title-2");
    title.set_halign(gtk::Align::Start);
    root.append(&title);

    let server_entry = gtk::Entry::new();
    server_entry.set_placeholder_text(Some("API base URL (e.g. https://api.openai.com/v1)"));
    server_entry.set_text(&config.base_url);
    server_entry.set_hexpand(true);

    let key_entry = gtk::PasswordEntry::new();
    key_entry.set_placeholder_text(Some("API key"));
    key_entry.set_show_peek_icon(true);
    key_entry.set_text(&config.api_key);
    key_entry.set_hexpand(true);

    let form = gtk::Box::new(gtk::Orientation::Vertical, 8);
    form.append(&server_entry);
    form.append(&key_entry);
    root.append(&form);

    let status = gtk::Label::new(None);
    status.add_css_class("dim-label");
    status.set_halign(gtk::Align::Start);
    root.append(&status);

    let connect_btn = gtk::Button::with_label("Connect");
    connect_btn.add_css_class("suggested-action");
    connect_btn.set_halign(gtk::Align::End);
    root.append(&connect_btn);

    toast_overlay.set_child(Some(&root));
    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let header_title = gtk::Label::new(Some(crate::ui::main_window::APP_TITLE));
    header.set_title_widget(Some(&header_title));
    container.append(&header);
    container.append(&toast_overlay);
    window.set_content(Some(&container));

    let on_connect = {
        let app = app.clone();
        let window = window.clone();
        let overlay = toast_overlay.clone();
        let server_entry = server_entry.clone();
        let key_entry = key_entry.clone();
        let connect_btn = connect_btn.clone();
        move || {
            let base_url = crate::utils::normalize_url(&server_entry.text());
            let api_key = key_entry.text().trim().to_string();
            if base_url.is_empty() || api_key.is_empty() {
                overlay.add_toast(adw::Toast::new("Please enter the API URL and key."));
                return;
            }

            status.set_label("Checking key…");
            connect_btn.set_sensitive(false);

            let candidate = AppConfig { base_url, api_key, ..config.clone() };
            let rx: glib::Receiver<Result<(AppConfig, String), ApiError>> =
                crate::utils::run_async_to_main(async move {
                    let client = CompletionClient::new(&candidate)?;
                    let message = verification_message(client.verify().await)?;
                    Ok((candidate, message.to_string()))
                });

            let status_label = status.clone();
            let app = app.clone();
            let window = window.clone();
            let overlay = overlay.clone();
            let connect_btn = connect_btn.clone();
            let store = store.clone();
            rx.attach(None, move |res| {
                connect_btn.set_sensitive(true);
                match res {
                    Ok((config, message)) => {
                        log::info!("credential check for {}: {}", config.base_url, message);
                        status_label.set_label(&message);
                        if let Err(e) = config.save() {
                            overlay.add_toast(adw::Toast::new(&format!("Failed to save settings: {}", e)));
                        }
                        crate::ui::main_window::show_main_window(&app, config, store.clone());
                        window.close();
                    }
                    Err(err) => {
                        log::error!("credential check failed: {}", err);
                        status_label.set_label(&failure_label(&err));
                        overlay.add_toast(adw::Toast::new(&err.to_string()));
                    }
                }
                glib::ControlFlow::Break
            });
        }
    };

    let on_connect: Rc<dyn Fn()> = Rc::new(on_connect);
    {
        let on_connect = on_connect.clone();
        connect_btn.connect_clicked(move |_| (on_connect)());
    }
    {
        let on_connect = on_connect.clone();
        server_entry.connect_activate(move |_| (on_connect)());
    }
    {
        let on_connect = on_connect.clone();
        key_entry.connect_activate(move |_| (on_connect)());
    }

    window.present();
}

/// Status line for a finished key check. Transport failures still save the key,
/// since the server may only be unreachable right now; any HTTP status error does not.
fn verification_message(result: Result<u16, ApiError>) -> Result<&'static str, ApiError> {
    match result {
        Ok(_) => Ok("Connected"),
        Err(ApiError::Http(err)) => {
            log::warn!("could not verify key: {}", err);
            Ok("Saved (server unreachable)")
        }
        Err(err) => Err(err),
    }
}

fn failure_label(err: &ApiError) -> String {
    match err {
        ApiError::Status { status: 401 | 403, .. } => "Key rejected".to_string(),
        ApiError::Status { status, .. } => format!("Server answered HTTP {}, check the URL", status),
        ApiError::InvalidUrl(_) => "Invalid API URL".to_string(),
        _ => "Connection failed".to_string(),
    }
}
