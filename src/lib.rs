pub mod common;
pub mod compositor;
pub mod cursor;
pub mod engine;
pub mod font;
pub mod framebuffer;
pub mod helpers;
pub mod machine;
pub mod menu;
pub mod palette;
pub mod persist;
pub mod resource;
pub mod skin;
pub mod sprite;
