use std::{cell::RefCell, rc::Rc};

use url::Url;

use crate::{
    bitmap::Image,
    config::MediaViewConfig,
    notification::{NotificationCenter, NotificationCenterObserver, ObserverId},
    payload::{Media, MediaSender, MediaUpdate},
};

use super::{ContentSlot, Indicator, Tapped};

/// Side of the square play button shown over video thumbnails.
pub const VIDEO_OVERLAY_SIZE: f64 = 60.0;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MediaState {
    Loading,
    HighResolutionImage(Image),
    BlurredImageWithIndicator(Image),
    VideoThumbnail(Image),
    Video(Url),
}

impl MediaState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Placeholder for an upcoming image or video, addressed by identifier and
/// size.
pub struct LoadableMedia {
    pub identifier: i64,
    pub size: i32,
    state: MediaState,
    indicator: Indicator,
    content: ContentSlot,
    video_overlay_visible: bool,
    rounded: bool,
    user_interaction_enabled: bool,
    tapped: Option<Tapped>,
    present: Option<Box<dyn Fn(&Url)>>,
    presented_high_resolution_image: Option<Box<dyn Fn()>>,
    registration: Option<ObserverId>,
}

impl LoadableMedia {
    /// Panics if a tap handler is given while user interaction is disabled.
    pub fn new(config: &MediaViewConfig, tapped: Option<Tapped>) -> Self {
        assert!(
            tapped.is_none() || config.user_interaction_enabled,
            "a tap handler requires user interaction to be enabled"
        );
        Self {
            identifier: 0,
            size: 0,
            state: MediaState::Loading,
            indicator: Indicator::new(config.indicator_style),
            content: ContentSlot::new(config.stretched),
            video_overlay_visible: false,
            rounded: config.rounded,
            user_interaction_enabled: config.user_interaction_enabled,
            tapped,
            present: None,
            presented_high_resolution_image: None,
            registration: None,
        }
    }

    pub fn new_shared(
        config: &MediaViewConfig,
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

    pub fn on_tapped(&mut self, tapped: impl Fn() + 'static) {
        assert!(
            self.user_interaction_enabled,
            "a tap handler requires user interaction to be enabled"
        );
        self.tapped = Some(Box::new(tapped));
    }

    pub fn on_present(&mut self, present: impl Fn(&Url) + 'static) {
        self.present = Some(Box::new(present));
    }

    pub fn on_presented_high_resolution_image(&mut self, presented: impl Fn() + 'static) {
        self.presented_high_resolution_image = Some(Box::new(presented));
    }

    pub fn state(&self) -> &MediaState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    pub fn content(&self) -> &ContentSlot {
        &self.content
    }

    pub fn is_video_overlay_visible(&self) -> bool {
        self.video_overlay_visible
    }

    pub fn is_rounded(&self) -> bool {
        self.rounded
    }

    pub fn registration(&self) -> Option<ObserverId> {
        self.registration
    }

    fn matches(&self, identifier: i64, size: i32) -> bool {
        self.identifier == identifier && self.size == size
    }

    /// Applies `state` if this view still shows `(identifier, size)`.
    pub fn change(&mut self, state: MediaState, identifier: i64, size: i32) -> bool {
        if !self.matches(identifier, size) {
            log::trace!(
                "ignoring media ({identifier}, {size}) in view for ({}, {})",
                self.identifier,
                self.size
            );
            return false;
        }
        self.force_change(state);
        true
    }

    pub fn force_change(&mut self, state: MediaState) {
        match &state {
            MediaState::Loading => {
                self.show_indicator();
            }
            MediaState::HighResolutionImage(image) => {
                self.show_image(image.clone());
                self.video_overlay_visible = false;
                if let Some(presented) = &self.presented_high_resolution_image {
                    presented();
                }
            }
            MediaState::BlurredImageWithIndicator(image) => {
                self.show_blurred_image(image.clone());
                self.video_overlay_visible = false;
            }
            MediaState::VideoThumbnail(image) => {
                self.show_image(image.clone());
                self.video_overlay_visible = true;
            }
            MediaState::Video(url) => match &self.present {
                Some(present) => present(url),
                None => panic!("cannot present {url} without a present callback"),
            },
        }
        self.state = state;
    }

    fn show_indicator(&mut self) {
        self.indicator.start();
        self.content.hide();
        self.video_overlay_visible = false;
    }

    fn show_blurred_image(&mut self, image: Image) {
        self.content.show(image, false);
        self.indicator.visible = true;
    }

    fn show_image(&mut self, image: Image) {
        self.content.show(image, self.user_interaction_enabled);
        self.indicator.visible = false;
    }

    /// Tap on the content. Returns whether the tap was handled.
    ///
    /// Panics when the content is interactive but no tap handler is set.
    pub fn tap(&self) -> bool {
        if !self.content.interactive {
            return false;
        }
        self.fire_tapped();
        true
    }

    pub fn tap_video_overlay(&self) -> bool {
        if !self.video_overlay_visible || !self.user_interaction_enabled {
            return false;
        }
        self.fire_tapped();
        true
    }

    fn fire_tapped(&self) {
        match &self.tapped {
            Some(tapped) => tapped(),
            None => panic!("media view tapped without a tap handler"),
        }
    }

    /// Origin of the video overlay in a view of the given bounds.
    pub fn video_overlay_origin(width: f64, height: f64) -> (f64, f64) {
        (
            (width - VIDEO_OVERLAY_SIZE) / 2.0,
            (height - VIDEO_OVERLAY_SIZE) / 2.0,
        )
    }

    /// Panics when a rounded view is given non-square bounds.
    pub fn layout(&mut self, width: f64, height: f64) {
        if self.rounded {
            self.content.round(width, height);
        }
    }
}

impl NotificationCenterObserver for LoadableMedia {
    type Payload = MediaSender;

    fn retrieved(&mut self, payload: MediaSender) {
        match payload.update {
            MediaUpdate::Image {
                image,
                media,
                identifier,
                size,
            } => {
                let state = match media {
                    Media::Image => MediaState::HighResolutionImage(image),
                    Media::VideoThumbnail => MediaState::VideoThumbnail(image),
                };
                self.change(state, identifier, size);
            }
            MediaUpdate::Identifier {
                identifier,
                size,
                new_identifier,
            } => {
                if self.matches(identifier, size) {
                    log::debug!("media {identifier} is now known as {new_identifier}");
                    self.identifier = new_identifier;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn thumbnail() -> Image {
        Image::solid(4, 4, [0, 120, 240, 255]).unwrap()
    }

    fn view_for(identifier: i64, size: i32) -> LoadableMedia {
        let mut view = LoadableMedia::new(&MediaViewConfig::default(), None);
        view.identifier = identifier;
        view.size = size;
        view
    }

    fn assert_looks(
        view: &LoadableMedia,
        indicator: bool,
        content: bool,
        interactive: bool,
        overlay: bool,
    ) {
        assert_eq!(view.indicator().visible, indicator, "indicator");
        assert_eq!(view.content().visible, content, "content");
        assert_eq!(view.content().interactive, interactive, "interactive");
        assert_eq!(view.is_video_overlay_visible(), overlay, "video overlay");
    }

    #[test]
    fn state_table() {
        let mut view = view_for(1, 10);
        assert_looks(&view, true, false, false, false);

        view.force_change(MediaState::BlurredImageWithIndicator(thumbnail()));
        assert_looks(&view, true, true, false, false);

        view.force_change(MediaState::HighResolutionImage(thumbnail()));
        assert_looks(&view, false, true, true, false);

        view.force_change(MediaState::VideoThumbnail(thumbnail()));
        assert_looks(&view, false, true, true, true);

        view.force_change(MediaState::Loading);
        assert_looks(&view, true, false, false, false);
        assert!(view.indicator().animating);
        assert!(view.is_loading());
    }

    #[test]
    fn video_state_only_presents() {
        let presented = Rc::new(RefCell::new(None));
        let mut view = view_for(1, 10);
        view.on_present({
            let presented = presented.clone();
            move |url: &Url| *presented.borrow_mut() = Some(url.clone())
        });
        view.force_change(MediaState::VideoThumbnail(thumbnail()));

        let url = Url::parse("https://example.com/clip.mp4").unwrap();
        view.force_change(MediaState::Video(url.clone()));

        assert_eq!(presented.borrow().as_ref(), Some(&url));
        assert_eq!(view.state(), &MediaState::Video(url));
        assert_looks(&view, false, true, true, true);
    }

    #[test]
    #[should_panic(expected = "without a present callback")]
    fn video_state_needs_present_callback() {
        let mut view = view_for(1, 10);
        view.force_change(MediaState::Video(
            Url::parse("https://example.com/clip.mp4").unwrap(),
        ));
    }

    #[test]
    fn high_resolution_image_notifies() {
        let count = Rc::new(Cell::new(0));
        let mut view = view_for(1, 10);
        view.on_presented_high_resolution_image({
            let count = count.clone();
            move || count.set(count.get() + 1)
        });

        view.force_change(MediaState::BlurredImageWithIndicator(thumbnail()));
        view.force_change(MediaState::HighResolutionImage(thumbnail()));

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn change_requires_identifier_and_size() {
        let mut view = view_for(5, 100);

        assert!(!view.change(MediaState::HighResolutionImage(thumbnail()), 6, 100));
        assert!(!view.change(MediaState::HighResolutionImage(thumbnail()), 5, 50));
        assert!(view.is_loading());

        assert!(view.change(MediaState::HighResolutionImage(thumbnail()), 5, 100));
        assert_eq!(view.state(), &MediaState::HighResolutionImage(thumbnail()));
    }

    #[test]
    fn retrieved_picks_state_from_media_kind() {
        let mut view = view_for(5, 100);

        view.retrieved(MediaSender::image(thumbnail(), Media::VideoThumbnail, 5, 100));
        assert_eq!(view.state(), &MediaState::VideoThumbnail(thumbnail()));

        view.retrieved(MediaSender::image(thumbnail(), Media::Image, 5, 100));
        assert_eq!(view.state(), &MediaState::HighResolutionImage(thumbnail()));

        view.retrieved(MediaSender::image(thumbnail(), Media::VideoThumbnail, 6, 100));
        assert_eq!(view.state(), &MediaState::HighResolutionImage(thumbnail()));
    }

    #[test]
    fn identifier_update_leaves_other_views_pointing_where_they_were() {
        let mut view = view_for(5, 100);

        view.retrieved(MediaSender::identifier(4, 100, 8));
        assert_eq!(view.identifier, 5);
        view.retrieved(MediaSender::identifier(5, 64, 8));
        assert_eq!(view.identifier, 5);

        view.retrieved(MediaSender::identifier(5, 100, 8));
        assert_eq!(view.identifier, 8);
        assert!(view.is_loading());

        view.retrieved(MediaSender::image(thumbnail(), Media::Image, 8, 100));
        assert!(!view.is_loading());
    }

    #[test]
    fn taps_reach_handler_when_interactive() {
        let count = Rc::new(Cell::new(0));
        let mut view = view_for(1, 1);
        view.on_tapped({
            let count = count.clone();
            move || count.set(count.get() + 1)
        });

        assert!(!view.tap());
        assert!(!view.tap_video_overlay());

        view.force_change(MediaState::VideoThumbnail(thumbnail()));
        assert!(view.tap());
        assert!(view.tap_video_overlay());

        view.force_change(MediaState::HighResolutionImage(thumbnail()));
        assert!(!view.tap_video_overlay());

        assert_eq!(count.get(), 2);
    }

    #[test]
    #[should_panic(expected = "without a tap handler")]
    fn interactive_tap_without_handler_panics() {
        let mut view = view_for(1, 1);
        view.force_change(MediaState::HighResolutionImage(thumbnail()));
        view.tap();
    }

    #[test]
    fn disabled_interaction_keeps_content_inert() {
        let config = MediaViewConfig {
            user_interaction_enabled: false,
            ..MediaViewConfig::default()
        };
        let mut view = LoadableMedia::new(&config, None);

        view.force_change(MediaState::VideoThumbnail(thumbnail()));

        assert!(!view.content().interactive);
        assert!(!view.tap());
        assert!(!view.tap_video_overlay());
    }

    #[test]
    #[should_panic(expected = "requires user interaction")]
    fn tap_handler_without_interaction_panics() {
        let config = MediaViewConfig {
            user_interaction_enabled: false,
            ..MediaViewConfig::default()
        };
        LoadableMedia::new(&config, Some(Box::new(|| {})));
    }

    #[test]
    #[should_panic(expected = "must be laid out square")]
    fn rounded_media_must_be_square() {
        let config = MediaViewConfig {
            rounded: true,
            ..MediaViewConfig::default()
        };
        let mut view = LoadableMedia::new(&config, None);
        view.layout(100.0, 120.0);
    }

    #[test]
    fn overlay_is_centered() {
        assert_eq!(LoadableMedia::video_overlay_origin(100.0, 200.0), (20.0, 70.0));
    }
}
