// Input-driven state machine for the main menu.
use log::{debug, warn};

use crate::menu::{self, MenuContext, OptionId, PLAY_OPTION, QUIT_OPTION, SELECT_OPTION};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuKey {
    Enter,
    Quit,
    Other,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    PointerMoved { x: usize, y: usize },
    PointerPressed,
    Key(MenuKey),
}

/// What confirming an option asks the owner to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    SelectAdventure,
    PlayAdventure,
    OpenEditor(OptionId),
    Quit,
}

impl Command {
    pub fn for_option(id: OptionId) -> Self {
        match id {
            SELECT_OPTION => Command::SelectAdventure,
            PLAY_OPTION => Command::PlayAdventure,
            QUIT_OPTION => Command::Quit,
            other => Command::OpenEditor(other),
        }
    }

    pub fn option(&self) -> OptionId {
        match *self {
            Command::SelectAdventure => SELECT_OPTION,
            Command::PlayAdventure => PLAY_OPTION,
            Command::OpenEditor(id) => id,
            Command::Quit => QUIT_OPTION,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuState {
    Idle(OptionId),
    Highlighted(OptionId),
    Dispatching(Command),
    Terminated,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    DrawOption { id: OptionId, highlighted: bool },
    Invoke(Command),
    Exit,
}

#[derive(Debug)]
pub struct MenuMachine {
    state: MenuState,
    pointer: Option<(usize, usize)>,
}

impl Default for MenuMachine {
    fn default() -> Self {
        MenuMachine {
            state: MenuState::Idle(SELECT_OPTION),
            pointer: None,
        }
    }
}

impl MenuMachine {
    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == MenuState::Terminated
    }

    /// The option that Enter would confirm.
    pub fn current(&self) -> Option<OptionId> {
        match self.state {
            MenuState::Idle(id) | MenuState::Highlighted(id) => Some(id),
            MenuState::Dispatching(cmd) => Some(cmd.option()),
            MenuState::Terminated => None,
        }
    }

    /// Draws the initially selected option highlighted.
    pub fn start(&mut self) -> Vec<Action> {
        match self.state {
            MenuState::Idle(id) => {
                self.state = MenuState::Highlighted(id);
                vec![Action::DrawOption {
                    id,
                    highlighted: true,
                }]
            }
            _ => vec![],
        }
    }

    pub fn handle(&mut self, event: InputEvent, ctx: &MenuContext) -> Vec<Action> {
        let current = match self.state {
            MenuState::Idle(id) | MenuState::Highlighted(id) => id,
            MenuState::Dispatching(cmd) => {
                warn!("Ignoring {:?} while dispatching {:?}", event, cmd);
                return vec![];
            }
            MenuState::Terminated => return vec![],
        };
        match event {
            InputEvent::PointerMoved { x, y } => {
                self.pointer = Some((x, y));
                match menu::option_at(x, y) {
                    Some(id) => self.hover(id),
                    None => vec![],
                }
            }
            InputEvent::PointerPressed => {
                let Some(id) = self.pointer.and_then(|(x, y)| menu::option_at(x, y)) else {
                    return vec![];
                };
                let mut actions = self.hover(id);
                actions.extend(self.confirm(id, ctx));
                actions
            }
            InputEvent::Key(MenuKey::Enter) => self.confirm(current, ctx),
            InputEvent::Key(MenuKey::Quit) => self.terminate(),
            InputEvent::Key(MenuKey::Other) => vec![],
        }
    }

    /// Returns from a finished handler to the option it was started from.
    pub fn finish_dispatch(&mut self) -> Vec<Action> {
        match self.state {
            MenuState::Dispatching(cmd) => {
                let id = cmd.option();
                self.state = MenuState::Highlighted(id);
                vec![Action::DrawOption {
                    id,
                    highlighted: true,
                }]
            }
            other => {
                warn!("finish_dispatch called in state {:?}", other);
                vec![]
            }
        }
    }

    fn hover(&mut self, id: OptionId) -> Vec<Action> {
        let mut actions = vec![];
        match self.state {
            MenuState::Highlighted(old) if old == id => return actions,
            MenuState::Highlighted(old) => actions.push(Action::DrawOption {
                id: old,
                highlighted: false,
            }),
            _ => {}
        }
        debug!("Hover option {}", id);
        actions.push(Action::DrawOption {
            id,
            highlighted: true,
        });
        self.state = MenuState::Highlighted(id);
        actions
    }

    fn confirm(&mut self, id: OptionId, ctx: &MenuContext) -> Vec<Action> {
        if !menu::is_enabled(id, ctx) {
            debug!("Option {} is disabled", id);
            return vec![];
        }
        match Command::for_option(id) {
            Command::Quit => self.terminate(),
            cmd => {
                self.state = MenuState::Dispatching(cmd);
                vec![Action::Invoke(cmd)]
            }
        }
    }

    fn terminate(&mut self) -> Vec<Action> {
        self.state = MenuState::Terminated;
        vec![Action::Exit]
    }
}
