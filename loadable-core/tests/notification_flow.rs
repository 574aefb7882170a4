use loadable_core::{
    bitmap::Image,
    config::{ImageViewConfig, MediaViewConfig},
    notification::NotificationCenter,
    payload::{ImageUserInfo, Media, MediaSender, RETRIEVED_MEDIA, RETRIEVED_PHOTO},
    user_info::UserInfoMapper,
    view::{ImageState, LoadableImage, LoadableMedia, MediaState},
};

#[test]
fn posted_photo_reaches_only_its_view() {
    let center = NotificationCenter::new();
    let wanted = LoadableImage::new_shared(&ImageViewConfig::default(), None, &center);
    let other = LoadableImage::new_shared(&ImageViewConfig::default(), None, &center);
    wanted.borrow_mut().identifier = 42;
    other.borrow_mut().identifier = 7;

    let photo = Image::solid(16, 16, [30, 60, 90, 255]).unwrap();
    center.post(&ImageUserInfo::new(42, photo.clone()));

    let wanted = wanted.borrow();
    assert_eq!(wanted.state(), ImageState::Final);
    assert_eq!(wanted.content().image.as_ref(), Some(&photo));
    assert!(!wanted.indicator().visible);

    let other = other.borrow();
    assert_eq!(other.state(), ImageState::Loading);
    assert!(other.content().image.is_none());
}

#[test]
fn recycled_view_drops_stale_photo() {
    let center = NotificationCenter::new();
    let view = LoadableImage::new_shared(&ImageViewConfig::default(), None, &center);
    view.borrow_mut().identifier = 1;

    // Reused for another item before the first photo arrived.
    view.borrow_mut().show_indicator();
    view.borrow_mut().identifier = 2;
    center.post(&ImageUserInfo::new(1, Image::solid(1, 1, [1, 0, 0, 255]).unwrap()));
    assert!(view.borrow().is_loading());

    center.post(&ImageUserInfo::new(2, Image::solid(1, 1, [0, 1, 0, 255]).unwrap()));
    assert!(!view.borrow().is_loading());
}

#[test]
fn media_updates_flow_through_user_info() {
    let center = NotificationCenter::new();
    let view = LoadableMedia::new_shared(&MediaViewConfig::default(), None, &center);
    {
        let mut view = view.borrow_mut();
        view.identifier = 5;
        view.size = 100;
    }
    let thumbnail = Image::solid(8, 8, [9, 9, 9, 255]).unwrap();

    center.post(&MediaSender::image(thumbnail.clone(), Media::VideoThumbnail, 5, 50));
    assert!(view.borrow().is_loading());

    center.post(&MediaSender::identifier(5, 100, 6));
    center.post(&MediaSender::image(thumbnail.clone(), Media::VideoThumbnail, 6, 100));

    let view = view.borrow();
    assert_eq!(view.identifier, 6);
    assert_eq!(view.state(), &MediaState::VideoThumbnail(thumbnail));
    assert!(view.is_video_overlay_visible());
}

#[test]
fn single_pixel_media_is_delivered() {
    let center = NotificationCenter::new();
    let view = LoadableMedia::new_shared(&MediaViewConfig::default(), None, &center);
    view.borrow_mut().size = 1;
    let pixel = Image::solid(1, 1, [0, 0, 0, 0]).unwrap();

    center.post(&MediaSender::image(pixel.clone(), Media::Image, 0, 1));

    assert_eq!(view.borrow().state(), &MediaState::HighResolutionImage(pixel));
}

#[test]
fn untyped_producer_gets_decoding_errors() {
    let center = NotificationCenter::new();
    let view = LoadableMedia::new_shared(&MediaViewConfig::default(), None, &center);

    let mut user_info = MediaSender::identifier(0, 0, 3).map();
    user_info.remove("newIdentifier");

    assert!(center
        .post_user_info(RETRIEVED_MEDIA.name(), user_info)
        .is_err());
    assert_eq!(view.borrow().identifier, 0);

    let photo_info = ImageUserInfo::new(0, Image::solid(1, 1, [0, 0, 0, 255]).unwrap()).map();
    assert!(center
        .post_user_info(RETRIEVED_PHOTO.name(), photo_info)
        .is_ok());
}

#[test]
fn dropped_views_stop_listening() {
    let center = NotificationCenter::new();
    let view = LoadableImage::new_shared(&ImageViewConfig::default(), None, &center);
    assert_eq!(center.observer_count(RETRIEVED_PHOTO.name()), 1);

    drop(view);
    center.post(&ImageUserInfo::new(0, Image::solid(1, 1, [0, 0, 0, 255]).unwrap()));

    assert_eq!(center.observer_count(RETRIEVED_PHOTO.name()), 0);
}
