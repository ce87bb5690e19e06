use std::sync::LazyLock;

use error_stack::{report, ResultExt};
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VideoUrlError {
    #[error("invalid video url")]
    InvalidUrl,
    #[error("video url has no video id")]
    MissingVideoId,
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("playback from {start}s for {duration}s runs past the longest supported video")]
    PlaybackOutOfRange { start: u32, duration: u32 },
}

/// `90`, `90s`, `1m30s`, `1h2m3s`
static TIMESTAMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s?)?$").expect("timestamp regex is valid")
});

/// The parts of a YouTube link the deck and the playlist care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoParams {
    pub video_id: String,
    /// Start offset in seconds, from the `t` query parameter
    pub timestamp: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackBounds {
    pub start: u32,
    pub end: Option<u32>,
}

impl VideoParams {
    /// Accepts both `watch?v=ID` links and `youtu.be/ID` short links.
    pub fn from_url(url: &str) -> error_stack::Result<Self, VideoUrlError> {
        let parsed = url::Url::parse(url)
            .change_context(VideoUrlError::InvalidUrl)
            .attach_printable_lazy(|| format!("Url: {}", url))?;

        let query_param = |name: &str| {
            parsed
                .query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };

        let video_id = query_param("v")
            .unwrap_or_else(|| parsed.path().trim_start_matches('/').to_owned());
        if video_id.is_empty() {
            return Err(report!(VideoUrlError::MissingVideoId))
                .attach_printable_lazy(|| format!("Url: {}", url));
        }

        let timestamp = query_param("t")
            .map(|t| parse_timestamp(&t))
            .transpose()
            .attach_printable_lazy(|| format!("Url: {}", url))?;

        Ok(Self {
            video_id,
            timestamp,
        })
    }

    /// Playback bounds for this video, or `None` when it plays untrimmed.
    ///
    /// `duration` is in seconds; zero means unlimited.
    pub fn playback_bounds(
        &self,
        duration: u32,
    ) -> error_stack::Result<Option<PlaybackBounds>, VideoUrlError> {
        if duration == 0 && self.timestamp.is_none() {
            return Ok(None);
        }

        let start = self.timestamp.unwrap_or(0);
        let end = match duration {
            0 => None,
            duration => Some(start.checked_add(duration).ok_or_else(|| {
                report!(VideoUrlError::PlaybackOutOfRange { start, duration })
            })?),
        };
        Ok(Some(PlaybackBounds { start, end }))
    }
}

pub fn parse_timestamp(raw: &str) -> error_stack::Result<u32, VideoUrlError> {
    let invalid = || report!(VideoUrlError::InvalidTimestamp(raw.to_owned()));

    if raw.is_empty() {
        return Err(invalid());
    }
    let captures = TIMESTAMP_REGEX.captures(raw).ok_or_else(invalid)?;

    let component = |index: usize, scale: u32| -> error_stack::Result<u32, VideoUrlError> {
        match captures.get(index) {
            Some(value) => value
                .as_str()
                .parse::<u32>()
                .ok()
                .and_then(|value| value.checked_mul(scale))
                .ok_or_else(invalid),
            None => Ok(0),
        }
    };

    let (hours, minutes, seconds) = (component(1, 3600)?, component(2, 60)?, component(3, 1)?);
    hours
        .checked_add(minutes)
        .and_then(|total| total.checked_add(seconds))
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_and_long_links_yield_same_id() {
        let short = VideoParams::from_url("https://youtu.be/XYZ").unwrap();
        let long = VideoParams::from_url("https://www.youtube.com/watch?v=XYZ").unwrap();

        assert_eq!(short.video_id, "XYZ");
        assert_eq!(long.video_id, "XYZ");
        assert_eq!(short.timestamp, None);
    }

    #[test]
    fn test_timestamp_with_seconds_suffix() {
        let params = VideoParams::from_url("https://www.youtube.com/watch?v=XYZ&t=90s").unwrap();
        assert_eq!(params.timestamp, Some(90));
        assert_eq!(
            params.playback_bounds(30).unwrap(),
            Some(PlaybackBounds {
                start: 90,
                end: Some(120)
            })
        );
    }

    #[test]
    fn test_short_link_timestamp() {
        let params = VideoParams::from_url("https://youtu.be/abc?t=42").unwrap();
        assert_eq!(params.video_id, "abc");
        assert_eq!(params.timestamp, Some(42));
    }

    #[test]
    fn test_playback_bounds() {
        let untimed = VideoParams {
            video_id: "a".to_owned(),
            timestamp: None,
        };
        assert_eq!(untimed.playback_bounds(0).unwrap(), None);
        assert_eq!(
            untimed.playback_bounds(15).unwrap(),
            Some(PlaybackBounds {
                start: 0,
                end: Some(15)
            })
        );

        let timed = VideoParams {
            video_id: "a".to_owned(),
            timestamp: Some(10),
        };
        assert_eq!(
            timed.playback_bounds(0).unwrap(),
            Some(PlaybackBounds {
                start: 10,
                end: None
            })
        );
    }

    #[test]
    fn test_parse_timestamp_forms() {
        assert_eq!(parse_timestamp("90").unwrap(), 90);
        assert_eq!(parse_timestamp("90s").unwrap(), 90);
        assert_eq!(parse_timestamp("1m30s").unwrap(), 90);
        assert_eq!(parse_timestamp("1h2m3s").unwrap(), 3723);
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("abc").is_err());
    }

    #[test]
    fn test_invalid_urls() {
        let error = VideoParams::from_url("not a url").unwrap_err();
        assert_eq!(error.current_context(), &VideoUrlError::InvalidUrl);

        let error = VideoParams::from_url("https://www.youtube.com/").unwrap_err();
        assert_eq!(error.current_context(), &VideoUrlError::MissingVideoId);

        let error = VideoParams::from_url("https://youtu.be/abc?t=soon").unwrap_err();
        assert_eq!(
            error.current_context(),
            &VideoUrlError::InvalidTimestamp("soon".to_owned())
        );
    }

    #[test]
    fn test_timestamp_past_u32_is_rejected() {
        let error = parse_timestamp("1193046h59m59s").unwrap_err();
        assert_eq!(
            error.current_context(),
            &VideoUrlError::InvalidTimestamp("1193046h59m59s".to_owned())
        );
        assert!(parse_timestamp("99999999999").is_err());
        assert!(parse_timestamp("1193047h").is_err());
    }

    #[test]
    fn test_playback_end_past_u32_is_rejected() {
        let params = VideoParams::from_url("https://youtu.be/abc?t=4294967290").unwrap();
        assert_eq!(params.timestamp, Some(4_294_967_290));

        let error = params.playback_bounds(30).unwrap_err();
        assert_eq!(
            error.current_context(),
            &VideoUrlError::PlaybackOutOfRange {
                start: 4_294_967_290,
                duration: 30
            }
        );
        assert_eq!(
            params.playback_bounds(0).unwrap(),
            Some(PlaybackBounds {
                start: 4_294_967_290,
                end: None
            })
        );
    }
}
