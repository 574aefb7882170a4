pub use druid::theme::*;
use druid::{Color, Env, Key};

use crate::data::AppState;

pub fn grid(m: f64) -> f64 {
    GRID * m
}

pub const GRID: f64 = 8.0;

pub const GREY_1: Color = Color::grey8(0x33);
pub const GREY_4: Color = Color::grey8(0xbd);
pub const GREY_5: Color = Color::grey8(0xe0);
pub const GREY_6: Color = Color::grey8(0xf2);

pub const PLACEHOLDER: Key<Color> = Key::new("app.loadable.placeholder");
pub const SPINNER_DIM: Key<Color> = Key::new("app.loadable.spinner-dim");
pub const SPINNER_LIT: Key<Color> = Key::new("app.loadable.spinner-lit");
pub const PLAY_BUTTON: Key<Color> = Key::new("app.loadable.play-button");

pub fn setup(env: &mut Env, _state: &AppState) {
    env.set(WINDOW_BACKGROUND_COLOR, GREY_6);
    env.set(TEXT_COLOR, GREY_1);
    env.set(PLACEHOLDER, GREY_5);
    env.set(SPINNER_DIM, GREY_4);
    env.set(SPINNER_LIT, GREY_1);
    env.set(PLAY_BUTTON, Color::WHITE);
}
