pub mod chat_view;
pub mod credentials;
pub mod input_bar;
pub mod main_window;
pub mod message_row;
pub mod style;
