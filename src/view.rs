// Shows the last presented menu frame and turns pointer input over it into
// framebuffer coordinates.
use iced::{
    mouse,
    widget::{canvas, center},
    Element, Point, Rectangle, Size,
};

use ack_frontend::{compositor::RgbaSurface, machine::InputEvent};

use crate::{message::Message, state::FrontendState};

struct MenuScreen<'a> {
    surface: &'a RgbaSurface,
    scale: f32,
}

impl<'a> MenuScreen<'a> {
    fn to_framebuffer(&self, p: Point) -> (usize, usize) {
        let x = (f32::max(p.x, 0.0) / self.scale) as usize;
        let y = (f32::max(p.y, 0.0) / self.scale) as usize;
        (
            x.min(self.surface.width.saturating_sub(1)),
            y.min(self.surface.height.saturating_sub(1)),
        )
    }
}

impl<'a> canvas::Program<Message> for MenuScreen<'a> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: iced::Rectangle,
        cursor: mouse::Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        let Some(p) = cursor.position_in(bounds) else {
            return (canvas::event::Status::Ignored, None);
        };
        match event {
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let (x, y) = self.to_framebuffer(p);
                (
                    canvas::event::Status::Captured,
                    Some(Message::Input(InputEvent::PointerMoved { x, y })),
                )
            }
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => (
                canvas::event::Status::Captured,
                Some(Message::Input(InputEvent::PointerPressed)),
            ),
            _ => (canvas::event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &(),
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: iced::Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        if self.surface.frames == 0 {
            return vec![frame.into_geometry()];
        }

        let image = iced::advanced::image::Image::new(iced::advanced::image::Handle::from_rgba(
            self.surface.width as u32,
            self.surface.height as u32,
            self.surface.rgba.clone(),
        ))
        .filter_method(iced::widget::image::FilterMethod::Nearest)
        .snap(true);

        frame.draw_image(
            Rectangle::new(
                Point::ORIGIN,
                Size {
                    width: self.surface.width as f32 * self.scale,
                    height: self.surface.height as f32 * self.scale,
                },
            ),
            image,
        );
        vec![frame.into_geometry()]
    }
}

pub fn view(state: &FrontendState) -> Element<Message> {
    let surface = &state.surface;
    center(
        canvas(MenuScreen {
            surface,
            scale: state.scale,
        })
        .width(surface.width as f32 * state.scale)
        .height(surface.height as f32 * state.scale),
    )
    .into()
}
