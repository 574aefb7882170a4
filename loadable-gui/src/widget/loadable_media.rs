use std::{cell::RefCell, rc::Rc};

use druid::{widget::prelude::*, Data, Point, Rect, Selector};
use loadable_core::{
    config::MediaViewConfig,
    notification::NotificationCenter,
    view::{LoadableMedia, MediaState, Tapped, VIDEO_OVERLAY_SIZE},
    Url,
};

use super::{
    paint::{is_spinning, paint_play_button, ContentPainter, Spinner},
    DEFAULT_SIDE, REPAINT_LOADABLES,
};

pub const REQUEST_MEDIA: Selector<(i64, i32)> = Selector::new("loadable-media.request-media");

type Locator<T, K> = Box<dyn Fn(&T, &Env) -> Option<K>>;

/// Widget over a [`LoadableMedia`]. Tapping the play button of a video
/// thumbnail switches the view to the video, which is opened externally.
pub struct LoadableMediaWidget<T> {
    view: Rc<RefCell<LoadableMedia>>,
    locator: Locator<T, (i64, i32)>,
    video_locator: Option<Locator<T, Url>>,
    location: Option<(i64, i32)>,
    spinner: Spinner,
    content: ContentPainter,
}

impl<T: Data> LoadableMediaWidget<T> {
    pub fn new(
        config: &MediaViewConfig,
        tapped: Option<Tapped>,
        center: &NotificationCenter,
        locator: impl Fn(&T, &Env) -> Option<(i64, i32)> + 'static,
    ) -> Self {
        let view = LoadableMedia::new_shared(config, tapped, center);
        view.borrow_mut().on_present(|url: &Url| {
            log::info!("presenting video {url}");
            if let Err(err) = open::that(url.as_str()) {
                log::error!("failed to open {url}: {err}");
            }
        });
        view.borrow_mut().on_presented_high_resolution_image(|| {
            log::debug!("high resolution image presented");
        });
        Self {
            view,
            locator: Box::new(locator),
            video_locator: None,
            location: None,
            spinner: Spinner::new(),
            content: ContentPainter::new(),
        }
    }

    pub fn with_video(mut self, locator: impl Fn(&T, &Env) -> Option<Url> + 'static) -> Self {
        self.video_locator = Some(Box::new(locator));
        self
    }

    fn relocate(&mut self, location: Option<(i64, i32)>) -> Option<(i64, i32)> {
        let mut view = self.view.borrow_mut();
        view.force_change(MediaState::Loading);
        let (identifier, size) = location.unwrap_or_default();
        view.identifier = identifier;
        view.size = size;
        self.location = location;
        location
    }

    fn overlay_rect(size: Size) -> Rect {
        let (x, y) = LoadableMedia::video_overlay_origin(size.width, size.height);
        Rect::from_origin_size(Point::new(x, y), (VIDEO_OVERLAY_SIZE, VIDEO_OVERLAY_SIZE))
    }

    fn present_video(&self, data: &T, env: &Env) {
        let Some(url) = self.video_locator.as_ref().and_then(|locate| locate(data, env)) else {
            return;
        };
        self.view.borrow_mut().force_change(MediaState::Video(url));
    }
}

impl<T: Data> Widget<T> for LoadableMediaWidget<T> {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut T, env: &Env) {
        match event {
            Event::Command(cmd) if cmd.is(REPAINT_LOADABLES) => {
                if is_spinning(self.view.borrow().indicator()) {
                    ctx.request_anim_frame();
                }
                ctx.request_paint();
            }
            Event::AnimFrame(interval) => {
                if is_spinning(self.view.borrow().indicator()) {
                    self.spinner.advance(*interval);
                    ctx.request_anim_frame();
                    ctx.request_paint();
                }
            }
            Event::MouseDown(_) => {
                let view = self.view.borrow();
                if view.content().interactive || view.is_video_overlay_visible() {
                    ctx.set_active(true);
                }
            }
            Event::MouseUp(mouse) => {
                if ctx.is_active() {
                    ctx.set_active(false);
                    if !ctx.is_hot() {
                        return;
                    }
                    let on_overlay = Self::overlay_rect(ctx.size()).contains(mouse.pos);
                    let overlay_tapped = on_overlay && self.view.borrow().tap_video_overlay();
                    if overlay_tapped {
                        self.present_video(data, env);
                    } else {
                        self.view.borrow().tap();
                    }
                    ctx.request_paint();
                }
            }
            _ => {}
        }
    }

    fn lifecycle(&mut self, ctx: &mut LifeCycleCtx, event: &LifeCycle, data: &T, env: &Env) {
        if let LifeCycle::WidgetAdded = event {
            let location = (self.locator)(data, env);
            if let Some(key) = self.relocate(location) {
                ctx.submit_command(REQUEST_MEDIA.with(key));
            }
            ctx.request_anim_frame();
        }
    }

    fn update(&mut self, ctx: &mut UpdateCtx, _old_data: &T, data: &T, env: &Env) {
        let location = (self.locator)(data, env);
        if location != self.location {
            if let Some(key) = self.relocate(location) {
                ctx.submit_command(REQUEST_MEDIA.with(key));
            }
            ctx.request_anim_frame();
            ctx.request_paint();
        }
    }

    fn layout(&mut self, _ctx: &mut LayoutCtx, bc: &BoxConstraints, _data: &T, _env: &Env) -> Size {
        let size = if bc.is_width_bounded() && bc.is_height_bounded() {
            bc.max()
        } else {
            bc.constrain(Size::new(DEFAULT_SIDE, DEFAULT_SIDE))
        };
        self.view.borrow_mut().layout(size.width, size.height);
        size
    }

    fn paint(&mut self, ctx: &mut PaintCtx, _data: &T, env: &Env) {
        let view = self.view.borrow();
        self.content.paint(ctx, view.content(), env);
        if view.indicator().visible {
            self.spinner.paint(ctx, view.indicator(), env);
        }
        if view.is_video_overlay_visible() {
            let origin = Self::overlay_rect(ctx.size()).origin();
            paint_play_button(ctx, origin, env);
        }
    }
}
