use druid::Selector;
use loadable_core::payload::{ImageUserInfo, MediaSender};

// Produced on the image pool, posted on the notification center by the
// delegate once back on the UI thread.

pub const IMAGE_READY: Selector<ImageUserInfo> = Selector::new("app.image-ready");
pub const MEDIA_READY: Selector<MediaSender> = Selector::new("app.media-ready");
