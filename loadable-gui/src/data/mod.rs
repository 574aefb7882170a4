mod config;

use std::sync::Arc;

use druid::{im::Vector, Data, Lens};

pub use crate::data::config::Config;

/// Identifiers of page `n` start at `n * PAGE_STRIDE`.
const PAGE_STRIDE: i64 = 1000;

#[derive(Clone, Data, Lens)]
pub struct AppState {
    pub page: i64,
    pub photos: Vector<Photo>,
    pub media: Vector<MediaItem>,
}

#[derive(Clone, Debug, Data, Lens)]
pub struct Photo {
    pub identifier: i64,
}

#[derive(Clone, Debug, Data, Lens)]
pub struct MediaItem {
    pub identifier: i64,
    pub size: i32,
    pub video: Option<Arc<str>>,
}

impl MediaItem {
    fn new(identifier: i64, size: i32) -> Self {
        let video = (identifier % 2 == 1)
            .then(|| Arc::from(format!("https://example.com/videos/{identifier}.mp4")));
        Self {
            identifier,
            size,
            video,
        }
    }
}

impl AppState {
    pub fn with_config(config: &Config) -> Self {
        let mut state = Self {
            page: 0,
            photos: Vector::new(),
            media: Vector::new(),
        };
        for _ in 0..config.photos_per_page {
            state.photos.push_back(Photo { identifier: 0 });
        }
        for _ in 0..config.media_per_page {
            state.media.push_back(MediaItem::new(0, config.media_size));
        }
        state.assign_identifiers();
        state
    }

    /// Reassigns every tile to a new item, the way a scrolling list recycles
    /// its cells.
    pub fn next_page(&mut self) {
        self.page += 1;
        self.assign_identifiers();
    }

    fn assign_identifiers(&mut self) {
        let base = self.page * PAGE_STRIDE;
        for (i, photo) in self.photos.iter_mut().enumerate() {
            photo.identifier = base + i as i64;
        }
        for (i, item) in self.media.iter_mut().enumerate() {
            *item = MediaItem::new(base + i as i64, item.size);
        }
    }
}
