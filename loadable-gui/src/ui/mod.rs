use druid::{
    im::Vector,
    widget::{Button, CrossAxisAlignment, Flex, Label, List, Scroll},
    Widget, WidgetExt, WindowDesc,
};
use loadable_core::{notification::NotificationCenter, view::Tapped, Url};

use crate::{
    data::{AppState, Config, MediaItem, Photo},
    widget::{LoadableImageWidget, LoadableMediaWidget},
};

pub mod theme;

pub fn main_window(config: &Config, center: &NotificationCenter) -> WindowDesc<AppState> {
    let root = root_widget(config, center);
    WindowDesc::new(root)
        .title("Loadable")
        .with_min_size((theme::grid(40.0), theme::grid(30.0)))
        .window_size((theme::grid(110.0), theme::grid(70.0)))
}

fn root_widget(config: &Config, center: &NotificationCenter) -> impl Widget<AppState> {
    let header = Flex::row()
        .with_child(Label::dynamic(|data: &AppState, _| {
            format!("Page {}", data.page + 1)
        }))
        .with_default_spacer()
        .with_child(
            Button::new("Next page").on_click(|_ctx, data: &mut AppState, _env| {
                data.next_page();
            }),
        );

    let content = Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(Label::new("Photos").with_text_size(theme::grid(2.5)))
        .with_default_spacer()
        .with_child(photo_list(config, center).lens(AppState::photos))
        .with_spacer(theme::grid(3.0))
        .with_child(Label::new("Media").with_text_size(theme::grid(2.5)))
        .with_default_spacer()
        .with_child(media_list(config, center).lens(AppState::media));

    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(header)
        .with_spacer(theme::grid(2.0))
        .with_flex_child(Scroll::new(content).vertical(), 1.0)
        .padding(theme::grid(2.0))
}

fn photo_list(config: &Config, center: &NotificationCenter) -> impl Widget<Vector<Photo>> {
    let view_config = config.photo_view.clone();
    let side = config.tile_size;
    let center = center.clone();
    List::new(move || {
        let tapped: Tapped = Box::new(|| log::info!("photo tapped"));
        LoadableImageWidget::new(&view_config, Some(tapped), &center, |photo: &Photo, _| {
            Some(photo.identifier)
        })
        .fix_size(side, side)
        .padding(theme::grid(0.5))
    })
    .horizontal()
}

fn media_list(config: &Config, center: &NotificationCenter) -> impl Widget<Vector<MediaItem>> {
    let view_config = config.media_view.clone();
    let side = config.tile_size;
    let center = center.clone();
    List::new(move || {
        let tapped = view_config.user_interaction_enabled.then(|| -> Tapped {
            Box::new(|| log::info!("media tapped"))
        });
        LoadableMediaWidget::new(&view_config, tapped, &center, |item: &MediaItem, _| {
            Some((item.identifier, item.size))
        })
        .with_video(|item: &MediaItem, _| {
            item.video.as_deref().and_then(|video| Url::parse(video).ok())
        })
        .fix_size(side, side)
        .padding(theme::grid(0.5))
    })
    .horizontal()
}
