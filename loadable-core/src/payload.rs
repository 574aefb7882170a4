use serde::{Deserialize, Serialize};

use crate::{
    bitmap::Image,
    error::Error,
    notification::{Channel, NotificationCenterSendable},
    user_info::{UserInfo, UserInfoExt, UserInfoMapper, Value},
};

pub const RETRIEVED_PHOTO: Channel<ImageUserInfo> =
    Channel::new("loadable-image.retrieved-photo");
pub const RETRIEVED_MEDIA: Channel<MediaSender> = Channel::new("loadable-image.retrieved-media");

/// A decoded photo for the view showing `photo_identifier`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUserInfo {
    pub photo_identifier: i64,
    pub photo: Image,
}

impl ImageUserInfo {
    const PHOTO_IDENTIFIER: &'static str = "photoIdentifier";
    const PHOTO: &'static str = "photo";

    pub fn new(photo_identifier: i64, photo: Image) -> Self {
        Self {
            photo_identifier,
            photo,
        }
    }
}

impl UserInfoMapper for ImageUserInfo {
    fn map(&self) -> UserInfo {
        UserInfo::from([
            (
                Self::PHOTO_IDENTIFIER.to_string(),
                Value::Int(self.photo_identifier),
            ),
            (Self::PHOTO.to_string(), Value::Image(self.photo.clone())),
        ])
    }

    fn map_from(user_info: &UserInfo) -> Result<Self, Error> {
        Ok(Self {
            photo_identifier: user_info.int(Self::PHOTO_IDENTIFIER)?,
            photo: user_info.image(Self::PHOTO)?,
        })
    }
}

impl NotificationCenterSendable for ImageUserInfo {
    const CHANNEL: Channel<Self> = RETRIEVED_PHOTO;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Media {
    Image = 0,
    VideoThumbnail = 1,
}

impl From<Media> for i64 {
    fn from(media: Media) -> i64 {
        media as i64
    }
}

impl TryFrom<i64> for Media {
    type Error = Error;

    fn try_from(raw: i64) -> Result<Self, Error> {
        match raw {
            0 => Ok(Self::Image),
            1 => Ok(Self::VideoThumbnail),
            other => Err(Error::UnknownMedia(other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaUpdate {
    /// New image or video thumbnail for `(identifier, size)`.
    Image {
        image: Image,
        media: Media,
        identifier: i64,
        size: i32,
    },
    /// The item known as `(identifier, size)` is now called `new_identifier`.
    Identifier {
        identifier: i64,
        size: i32,
        new_identifier: i64,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaSender {
    pub update: MediaUpdate,
}

impl MediaSender {
    const IDENTIFIER: &'static str = "identifier";
    const SIZE: &'static str = "size";
    const IMAGE: &'static str = "image";
    const MEDIA: &'static str = "media";
    const NEW_IDENTIFIER: &'static str = "newIdentifier";

    pub fn new(update: MediaUpdate) -> Self {
        Self { update }
    }

    pub fn image(image: Image, media: Media, identifier: i64, size: i32) -> Self {
        Self::new(MediaUpdate::Image {
            image,
            media,
            identifier,
            size,
        })
    }

    pub fn identifier(identifier: i64, size: i32, new_identifier: i64) -> Self {
        Self::new(MediaUpdate::Identifier {
            identifier,
            size,
            new_identifier,
        })
    }

    /// Identity key of the view this update is addressed to.
    pub fn key(&self) -> (i64, i32) {
        match self.update {
            MediaUpdate::Image {
                identifier, size, ..
            }
            | MediaUpdate::Identifier {
                identifier, size, ..
            } => (identifier, size),
        }
    }

    pub fn to_wire(&self) -> Result<MediaSenderWire, Error> {
        let (identifier, size) = self.key();
        Ok(match &self.update {
            MediaUpdate::Image { image, media, .. } => MediaSenderWire {
                identifier,
                size,
                image: Some(image.to_png()?),
                media: Some(*media),
                new_identifier: None,
            },
            MediaUpdate::Identifier { new_identifier, .. } => MediaSenderWire {
                identifier,
                size,
                image: None,
                media: None,
                new_identifier: Some(*new_identifier),
            },
        })
    }

    pub fn from_wire(wire: MediaSenderWire) -> Result<Self, Error> {
        let MediaSenderWire {
            identifier,
            size,
            image,
            media,
            new_identifier,
        } = wire;
        match (image, new_identifier) {
            (Some(bytes), None) => Ok(Self::image(
                Image::from_png(&bytes)?,
                media.ok_or(Error::MissingKey(Self::MEDIA))?,
                identifier,
                size,
            )),
            (None, Some(new_identifier)) => {
                Ok(Self::identifier(identifier, size, new_identifier))
            }
            _ => Err(Error::AmbiguousUpdate),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(&self.to_wire()?)?)
    }

    pub fn from_json(json: &[u8]) -> Result<Self, Error> {
        Self::from_wire(serde_json::from_slice(json)?)
    }
}

/// Flat form of a [`MediaSender`], as it crosses process boundaries.
///
/// Exactly one of `image` and `new_identifier` is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSenderWire {
    pub identifier: i64,
    pub size: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_identifier: Option<i64>,
}

impl UserInfoMapper for MediaSender {
    fn map(&self) -> UserInfo {
        let (identifier, size) = self.key();
        let mut user_info = UserInfo::from([
            (Self::IDENTIFIER.to_string(), Value::Int(identifier)),
            (Self::SIZE.to_string(), Value::Int(size.into())),
        ]);
        match &self.update {
            MediaUpdate::Image { image, media, .. } => {
                // `Image` is never empty, and the PNG encoder only rejects
                // empty images.
                let bytes = match image.to_png() {
                    Ok(bytes) => bytes,
                    Err(err) => unreachable!("{image:?} failed to encode as PNG: {err}"),
                };
                user_info.insert(Self::IMAGE.to_string(), Value::from(bytes));
                user_info.insert(Self::MEDIA.to_string(), Value::Int((*media).into()));
            }
            MediaUpdate::Identifier { new_identifier, .. } => {
                user_info.insert(Self::NEW_IDENTIFIER.to_string(), Value::Int(*new_identifier));
            }
        }
        user_info
    }

    fn map_from(user_info: &UserInfo) -> Result<Self, Error> {
        let size = user_info.int(Self::SIZE)?;
        let media = user_info
            .optional_int(Self::MEDIA)?
            .map(Media::try_from)
            .transpose()?;
        Self::from_wire(MediaSenderWire {
            identifier: user_info.int(Self::IDENTIFIER)?,
            size: i32::try_from(size).map_err(|_| Error::UnexpectedValue {
                key: Self::SIZE,
                expected: "a 32-bit size",
            })?,
            image: user_info
                .optional_bytes(Self::IMAGE)?
                .map(|bytes| bytes.to_vec()),
            media,
            new_identifier: user_info.optional_int(Self::NEW_IDENTIFIER)?,
        })
    }
}

impl NotificationCenterSendable for MediaSender {
    const CHANNEL: Channel<Self> = RETRIEVED_MEDIA;
}
