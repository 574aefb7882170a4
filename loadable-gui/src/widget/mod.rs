mod loadable_image;
mod loadable_media;
mod paint;

use druid::Selector;

pub use loadable_image::{LoadableImageWidget, REQUEST_IMAGE};
pub use loadable_media::{LoadableMediaWidget, REQUEST_MEDIA};

/// Sent after a notification-center post, view models may have changed
/// underneath their widgets.
pub const REPAINT_LOADABLES: Selector = Selector::new("loadable.repaint");

/// Used when the parent does not bound the widget.
const DEFAULT_SIDE: f64 = 96.0;
