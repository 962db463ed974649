use ack_frontend::machine::InputEvent;

#[derive(Debug, Clone)]
pub enum Message {
    Event(iced::Event),
    Input(InputEvent),
    WindowClose(iced::window::Id),
}
