use std::{thread, time::Duration};

use druid::{AppDelegate, Command, DelegateCtx, Env, ExtEventSink, Handled, Target};
use loadable_core::{
    notification::NotificationCenter,
    payload::{ImageUserInfo, Media, MediaSender},
};
use rand::Rng;
use threadpool::ThreadPool;

use crate::{
    artwork, cmd,
    data::{AppState, Config},
    widget::{REPAINT_LOADABLES, REQUEST_IMAGE, REQUEST_MEDIA},
};

const PHOTO_SIDE: u32 = 128;

pub struct Delegate {
    center: NotificationCenter,
    image_pool: ThreadPool,
    config: Config,
}

impl Delegate {
    pub fn new(center: NotificationCenter, config: Config) -> Self {
        let threads = config.image_threads.max(1);
        Self {
            center,
            image_pool: ThreadPool::with_name("image_loading".into(), threads),
            config,
        }
    }

    fn fetch_delay(&self) -> Duration {
        rand::rng().random_range(self.config.delay_range())
    }

    fn request_image(&self, sink: ExtEventSink, identifier: i64) {
        let delay = self.fetch_delay();
        self.image_pool.execute(move || {
            thread::sleep(delay);
            let photo = match artwork::render(identifier, PHOTO_SIDE, false) {
                Ok(photo) => photo,
                Err(err) => {
                    log::error!("failed to render photo {identifier}: {err}");
                    return;
                }
            };
            let payload = ImageUserInfo::new(identifier, photo);
            if let Err(err) = sink.submit_command(cmd::IMAGE_READY, payload, Target::Auto) {
                log::error!("failed to deliver photo {identifier}: {err:?}");
            }
        });
    }

    fn request_media(&self, sink: ExtEventSink, identifier: i64, size: i32) {
        let delay = self.fetch_delay();
        self.image_pool.execute(move || {
            thread::sleep(delay);
            let media = if identifier % 2 == 1 {
                Media::VideoThumbnail
            } else {
                Media::Image
            };
            let side = u32::try_from(size).unwrap_or(PHOTO_SIDE).max(1);
            let image = match artwork::render(identifier, side, media == Media::VideoThumbnail) {
                Ok(image) => image,
                Err(err) => {
                    log::error!("failed to render media ({identifier}, {size}): {err}");
                    return;
                }
            };
            let payload = MediaSender::image(image, media, identifier, size);
            if let Err(err) = sink.submit_command(cmd::MEDIA_READY, payload, Target::Auto) {
                log::error!("failed to deliver media ({identifier}, {size}): {err:?}");
            }
        });
    }
}

impl AppDelegate<AppState> for Delegate {
    fn command(
        &mut self,
        ctx: &mut DelegateCtx,
        _target: Target,
        cmd: &Command,
        _data: &mut AppState,
        _env: &Env,
    ) -> Handled {
        if let Some(&identifier) = cmd.get(REQUEST_IMAGE) {
            log::debug!("requesting photo {identifier}");
            self.request_image(ctx.get_external_handle(), identifier);
            Handled::Yes
        } else if let Some(&(identifier, size)) = cmd.get(REQUEST_MEDIA) {
            log::debug!("requesting media ({identifier}, {size})");
            self.request_media(ctx.get_external_handle(), identifier, size);
            Handled::Yes
        } else if let Some(payload) = cmd.get(cmd::IMAGE_READY) {
            self.center.post(payload);
            ctx.submit_command(REPAINT_LOADABLES.to(Target::Global));
            Handled::Yes
        } else if let Some(payload) = cmd.get(cmd::MEDIA_READY) {
            self.center.post(payload);
            ctx.submit_command(REPAINT_LOADABLES.to(Target::Global));
            Handled::Yes
        } else {
            Handled::No
        }
    }
}
