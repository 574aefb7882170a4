use std::{cell::RefCell, rc::Rc};

use druid::{widget::prelude::*, Data, Selector};
use loadable_core::{
    config::ImageViewConfig,
    notification::NotificationCenter,
    view::{image::LoadableImage, Tapped},
};

use super::{
    paint::{is_spinning, ContentPainter, Spinner},
    DEFAULT_SIDE, REPAINT_LOADABLES,
};

pub const REQUEST_IMAGE: Selector<i64> = Selector::new("loadable-image.request-image");

/// Widget over a [`LoadableImage`] whose identifier comes from the data.
pub struct LoadableImageWidget<T> {
    view: Rc<RefCell<LoadableImage>>,
    locator: Box<dyn Fn(&T, &Env) -> Option<i64>>,
    location: Option<i64>,
    spinner: Spinner,
    content: ContentPainter,
}

impl<T: Data> LoadableImageWidget<T> {
    pub fn new(
        config: &ImageViewConfig,
        tapped: Option<Tapped>,
        center: &NotificationCenter,
        locator: impl Fn(&T, &Env) -> Option<i64> + 'static,
    ) -> Self {
        Self {
            view: LoadableImage::new_shared(config, tapped, center),
            locator: Box::new(locator),
            location: None,
            spinner: Spinner::new(),
            content: ContentPainter::new(),
        }
    }

    /// Resets the view for `location`, returning the request to submit.
    fn relocate(&mut self, location: Option<i64>) -> Option<i64> {
        let mut view = self.view.borrow_mut();
        view.show_indicator();
        view.identifier = location.unwrap_or_default();
        self.location = location;
        location
    }
}

impl<T: Data> Widget<T> for LoadableImageWidget<T> {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, _data: &mut T, _env: &Env) {
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
                if self.view.borrow().content().interactive {
                    ctx.set_active(true);
                }
            }
            Event::MouseUp(_) => {
                if ctx.is_active() {
                    ctx.set_active(false);
                    if ctx.is_hot() {
                        self.view.borrow().tap();
                    }
                }
            }
            _ => {}
        }
    }

    fn lifecycle(&mut self, ctx: &mut LifeCycleCtx, event: &LifeCycle, data: &T, env: &Env) {
        if let LifeCycle::WidgetAdded = event {
            let location = (self.locator)(data, env);
            if let Some(identifier) = self.relocate(location) {
                ctx.submit_command(REQUEST_IMAGE.with(identifier));
            }
            ctx.request_anim_frame();
        }
    }

    fn update(&mut self, ctx: &mut UpdateCtx, _old_data: &T, data: &T, env: &Env) {
        let location = (self.locator)(data, env);
        if location != self.location {
            if let Some(identifier) = self.relocate(location) {
                ctx.submit_command(REQUEST_IMAGE.with(identifier));
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
    }
}
