use std::{cell::RefCell, rc::Rc};

use crate::{
    bitmap::Image,
    config::{ContentMode, ImageViewConfig},
    notification::{NotificationCenter, NotificationCenterObserver, ObserverId},
    payload::ImageUserInfo,
};

use super::{ContentSlot, Indicator, Tapped};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ImageState {
    Loading,
    BlurredPreview,
    Final,
}

/// Placeholder for an upcoming image.
///
/// Shows an activity indicator until [`LoadableImage::show_image`] is called,
/// either directly or through a [`ImageUserInfo`] posted for its identifier.
pub struct LoadableImage {
    /// Photo this view is waiting for. Reassigned when the view is recycled.
    pub identifier: i64,
    state: ImageState,
    indicator: Indicator,
    content: ContentSlot,
    rounded: bool,
    tapped: Option<Tapped>,
    registration: Option<ObserverId>,
}

impl LoadableImage {
    pub fn new(config: &ImageViewConfig, tapped: Option<Tapped>) -> Self {
        Self {
            identifier: 0,
            state: ImageState::Loading,
            indicator: Indicator::new(config.indicator_style),
            content: ContentSlot::new(config.stretched),
            rounded: config.rounded,
            tapped,
            registration: None,
        }
    }

    /// Creates a shared view, registered on the photo channel if the config
    /// asks for it.
    pub fn new_shared(
        config: &ImageViewConfig,
        tapped: Option<Tapped>,
        center: &NotificationCenter,
    ) -> Rc<RefCell<Self>> {
        let this = Rc::new(RefCell::new(Self::new(config, tapped)));
        if config.register_notification_center {
            let id = center.register(&this);
            this.borrow_mut().registration = Some(id);
        }
        this
    }

    pub fn state(&self) -> ImageState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state != ImageState::Final
    }

    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    pub fn content(&self) -> &ContentSlot {
        &self.content
    }

    pub fn is_rounded(&self) -> bool {
        self.rounded
    }

    pub fn registration(&self) -> Option<ObserverId> {
        self.registration
    }

    pub fn show_indicator(&mut self) {
        self.indicator.start();
        self.content.hide();
        self.state = ImageState::Loading;
    }

    /// Shows a low resolution preview while the real image is still loading.
    pub fn show_blurred_image(&mut self, image: Image) {
        self.content.show(image, false);
        self.indicator.visible = true;
        self.state = ImageState::BlurredPreview;
    }

    /// Shows the final image. The content becomes interactive even without a
    /// tap handler, taps then reach nothing.
    pub fn show_image(&mut self, image: Image) {
        self.content.show(image, true);
        self.indicator.visible = false;
        self.state = ImageState::Final;
    }

    pub fn stretch_image(&mut self) {
        self.content.mode = ContentMode::AspectFill;
    }

    /// Returns whether the tap reached the handler.
    pub fn tap(&self) -> bool {
        match &self.tapped {
            Some(tapped) if self.content.interactive => {
                tapped();
                true
            }
            _ => false,
        }
    }

    /// Panics when a rounded view is given non-square bounds.
    pub fn layout(&mut self, width: f64, height: f64) {
        if self.rounded {
            self.content.round(width, height);
        }
    }
}

impl NotificationCenterObserver for LoadableImage {
    type Payload = ImageUserInfo;

    fn retrieved(&mut self, payload: ImageUserInfo) {
        if payload.photo_identifier == self.identifier {
            self.show_image(payload.photo);
        } else {
            log::trace!(
                "ignoring photo {} in view for {}",
                payload.photo_identifier,
                self.identifier
            );
        }
    }
}
