mod api;
mod app;
mod chat;
mod error;
mod ui;
mod utils;

use adw::prelude::*;
use adw::Application;
use std::rc::Rc;

use crate::app::AppConfig;
use crate::chat::store::{ConversationStore, Unconfigured};

fn main() -> gtk4::glib::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // One conversation for the whole process; windows come and go around it.
    let store = ConversationStore::with_seed(Rc::new(Unconfigured), AppConfig::default().max_tokens);

    let app = Application::builder()
        .application_id("com.example.OpenAIChat")
        .build();
    app.connect_activate(move |app| {
        crate::app::build_ui(app, &store);
    });
    app.run()
}
