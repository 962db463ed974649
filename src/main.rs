use std::path::PathBuf;

use clap::Parser;
use iced::{event, window, Size, Subscription, Task, Theme};
use log::error;

use ack_frontend::common::{SCREEN_HEIGHT, SCREEN_WIDTH};
use message::Message;
use state::FrontendState;

mod message;
mod state;
mod update;
mod view;

#[derive(Parser, Debug)]
#[command(about = "Main menu for ACK adventure authoring")]
pub struct Args {
    /// Folder holding the ACK system files (skin, icons, palettes)
    #[arg(long)]
    system_dir: Option<PathBuf>,

    /// Adventure to load at start-up
    adventure: Option<String>,

    /// Draw the pointer into the menu framebuffer instead of using the host cursor
    #[arg(long)]
    software_cursor: bool,

    /// Integer zoom factor for the 320x200 menu
    #[arg(long, default_value_t = 3)]
    scale: u32,
}

fn theme(_state: &FrontendState) -> Theme {
    match dark_light::detect().unwrap_or(dark_light::Mode::Unspecified) {
        dark_light::Mode::Light => Theme::Light,
        dark_light::Mode::Dark | dark_light::Mode::Unspecified => Theme::Dark,
    }
}

fn subscription(_state: &FrontendState) -> Subscription<Message> {
    Subscription::batch([
        event::listen().map(Message::Event),
        window::close_requests().map(Message::WindowClose),
    ])
}

pub fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let state = match state::get_initial_state(&args) {
        Ok(state) => state,
        Err(e) => {
            error!("Unable to start: {}\n{}", e, e.backtrace());
            std::process::exit(1);
        }
    };
    let scale = args.scale as f32;
    iced::application("ACK", update::update, view::view)
        .subscription(subscription)
        .theme(theme)
        .window_size(Size::new(
            SCREEN_WIDTH as f32 * scale + 40.0,
            SCREEN_HEIGHT as f32 * scale + 40.0,
        ))
        .exit_on_close_request(false)
        .run_with(move || (state, Task::none()))
}
