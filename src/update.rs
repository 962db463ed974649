use iced::{
    keyboard::{self, key},
    window, Event, Task,
};
use log::{error, info};

use ack_frontend::{
    machine::{InputEvent, MenuKey},
    persist,
};

use crate::{message::Message, state::FrontendState};

fn menu_key(key: &keyboard::Key, modified_key: &keyboard::Key) -> MenuKey {
    if *key == keyboard::Key::Named(key::Named::Enter) {
        MenuKey::Enter
    } else if *modified_key == keyboard::Key::Character("q".into())
        || *modified_key == keyboard::Key::Character("Q".into())
    {
        MenuKey::Quit
    } else {
        MenuKey::Other
    }
}

fn save_config(state: &mut FrontendState) {
    let adventure = state.engine.context().adventure.clone();
    if state.global_config.last_adventure != adventure {
        state.global_config.last_adventure = adventure;
        state.global_config.modified = true;
    }
    if let Err(e) = persist::save_global_config(&state.global_config_path, &mut state.global_config)
    {
        error!("Error saving global config: {}\n{}", e, e.backtrace());
    }
}

pub fn update(state: &mut FrontendState, message: Message) -> Task<Message> {
    let input = match message {
        Message::Event(Event::Keyboard(keyboard::Event::KeyPressed {
            key, modified_key, ..
        })) => InputEvent::Key(menu_key(&key, &modified_key)),
        Message::Event(_) => return Task::none(),
        Message::Input(input) => input,
        Message::WindowClose(id) => {
            save_config(state);
            return window::close(id);
        }
    };

    if !state.engine.handle_event(input, &mut state.surface) {
        info!("Menu terminated, exiting.");
        save_config(state);
        return iced::exit();
    }
    Task::none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_mapping() {
        let enter = keyboard::Key::Named(key::Named::Enter);
        assert_eq!(menu_key(&enter, &enter), MenuKey::Enter);
        let q = keyboard::Key::Character("q".into());
        let big_q = keyboard::Key::Character("Q".into());
        assert_eq!(menu_key(&q, &q), MenuKey::Quit);
        assert_eq!(menu_key(&q, &big_q), MenuKey::Quit);
        let x = keyboard::Key::Character("x".into());
        assert_eq!(menu_key(&x, &x), MenuKey::Other);
        let esc = keyboard::Key::Named(key::Named::Escape);
        assert_eq!(menu_key(&esc, &esc), MenuKey::Other);
    }
}
