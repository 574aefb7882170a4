//! Headless models of the loadable views.
//!
//! A view model owns everything a toolkit needs to draw a loadable view: the
//! activity indicator, the content slot and, for media, the video overlay.
//! Toolkit widgets render these and forward taps and layout passes.

pub mod image;
pub mod media;

pub use self::{
    image::{ImageState, LoadableImage},
    media::{LoadableMedia, MediaState, VIDEO_OVERLAY_SIZE},
};

use crate::{
    bitmap::Image,
    config::{ContentMode, IndicatorStyle},
    error::Error,
};

pub type Tapped = Box<dyn Fn()>;

#[derive(Clone, Debug, PartialEq)]
pub struct Indicator {
    pub style: IndicatorStyle,
    pub visible: bool,
    pub animating: bool,
}

impl Indicator {
    fn new(style: IndicatorStyle) -> Self {
        Self {
            style,
            visible: true,
            animating: true,
        }
    }

    fn start(&mut self) {
        self.animating = true;
        self.visible = true;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContentSlot {
    pub image: Option<Image>,
    pub visible: bool,
    pub interactive: bool,
    pub mode: ContentMode,
    pub corner_radius: f64,
}

impl ContentSlot {
    fn new(stretched: bool) -> Self {
        Self {
            image: None,
            visible: false,
            interactive: false,
            mode: if stretched {
                ContentMode::AspectFill
            } else {
                ContentMode::AspectFit
            },
            corner_radius: 0.0,
        }
    }

    fn hide(&mut self) {
        self.visible = false;
        self.interactive = false;
    }

    fn show(&mut self, image: Image, interactive: bool) {
        self.image = Some(image);
        self.visible = true;
        self.interactive = interactive;
    }

    fn round(&mut self, width: f64, height: f64) {
        if let Err(err) = check_square(width, height) {
            panic!("{err}, rounded content must be laid out square");
        }
        self.corner_radius = height / 2.0;
    }
}

/// Rounded content must be square, up to sub-pixel rounding.
pub fn check_square(width: f64, height: f64) -> Result<(), Error> {
    if width.round() == height.round() {
        Ok(())
    } else {
        Err(Error::NotSquare { width, height })
    }
}
