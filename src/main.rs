mod app;
mod config;
mod error;
mod message;
mod model;
mod pipeline;
mod views;

pub fn main() -> iced::Result {
    app::run()
}
