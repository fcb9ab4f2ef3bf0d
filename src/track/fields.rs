use std::fmt;
use std::str::FromStr;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use super::{Liveness, Resolution, Track};
use crate::api::SourceType;
use crate::errors::{AppError, Result};

/// Fields reachable by name from loosely typed callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackField {
    Title,
    Link,
    Duration,
    Streamtype,
    Video,
    Thumb,
    DownloadUrl,
    IsLive,
    Vidid,
    FilePath,
}

impl TrackField {
    pub const ALL: [TrackField; 10] = [
        TrackField::Title,
        TrackField::Link,
        TrackField::Duration,
        TrackField::Streamtype,
        TrackField::Video,
        TrackField::Thumb,
        TrackField::DownloadUrl,
        TrackField::IsLive,
        TrackField::Vidid,
        TrackField::FilePath,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TrackField::Title => "title",
            TrackField::Link => "link",
            TrackField::Duration => "duration",
            TrackField::Streamtype => "streamtype",
            TrackField::Video => "video",
            TrackField::Thumb => "thumb",
            TrackField::DownloadUrl => "download_url",
            TrackField::IsLive => "is_live",
            TrackField::Vidid => "vidid",
            TrackField::FilePath => "file_path",
        }
    }
}

impl fmt::Display for TrackField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrackField {
    type Err = AppError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TrackField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown track field: {}", s)))
    }
}

fn decode<T: DeserializeOwned>(field: TrackField, value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Validation(format!("Invalid value for {}: {}", field, e)))
}

impl Track {
    pub fn get(&self, field: TrackField) -> Value {
        match field {
            TrackField::Title => json!(self.title),
            TrackField::Link => json!(self.link),
            TrackField::Duration => json!(self.duration),
            TrackField::Streamtype => json!(self.streamtype),
            TrackField::Video => json!(self.video),
            TrackField::Thumb => json!(self.thumb),
            TrackField::DownloadUrl => json!(self.download_url),
            TrackField::IsLive => json!(self.liveness.as_option()),
            TrackField::Vidid => json!(self.video_id),
            TrackField::FilePath => json!(self.file_path()),
        }
    }

    /// Values are stored as given; construction-time derivation does not run again.
    pub fn set(&mut self, field: TrackField, value: Value) -> Result<()> {
        match field {
            TrackField::Title => self.title = decode(field, value)?,
            TrackField::Link => self.link = decode(field, value)?,
            TrackField::Duration => self.duration = decode(field, value)?,
            TrackField::Streamtype => self.streamtype = decode::<SourceType>(field, value)?,
            TrackField::Video => self.video = decode(field, value)?,
            TrackField::Thumb => self.thumb = decode(field, value)?,
            TrackField::DownloadUrl => {
                let url: String = decode(field, value)?;
                if url.is_empty() {
                    return Err(AppError::Validation("download_url cannot be empty".to_string()));
                }
                self.download_url = url;
            }
            TrackField::IsLive => self.liveness = Liveness::from(decode::<Option<bool>>(field, value)?),
            TrackField::Vidid => self.video_id = decode(field, value)?,
            TrackField::FilePath => {
                self.state = match decode::<Option<String>>(field, value)? {
                    Some(path) if !path.is_empty() => Resolution::Resolved(path),
                    _ => Resolution::Unresolved,
                };
            }
        }
        Ok(())
    }
}
