//! Output formats offered by the backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output container/codec requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Mp4,
    Mp3,
    Webm,
    Ogg,
    Flac,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Mp4 => "mp4",
            Format::Mp3 => "mp3",
            Format::Webm => "webm",
            Format::Ogg => "ogg",
            Format::Flac => "flac",
        }
    }

    /// Video formats accept a quality selection; audio formats do not
    /// (the backend expects "best" for those).
    pub fn has_quality_axis(self) -> bool {
        matches!(self, Format::Mp4 | Format::Webm)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mp4" => Ok(Format::Mp4),
            "mp3" => Ok(Format::Mp3),
            "webm" => Ok(Format::Webm),
            "ogg" => Ok(Format::Ogg),
            "flac" => Ok(Format::Flac),
            other => Err(format!(
                "unknown format '{other}' (expected mp4, mp3, webm, ogg, flac)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_formats() {
        assert_eq!("mp4".parse::<Format>().unwrap(), Format::Mp4);
        assert_eq!("FLAC".parse::<Format>().unwrap(), Format::Flac);
    }

    #[test]
    fn parse_unknown_format_fails() {
        assert!("wav".parse::<Format>().is_err());
    }

    #[test]
    fn quality_axis_only_for_video() {
        assert!(Format::Mp4.has_quality_axis());
        assert!(Format::Webm.has_quality_axis());
        assert!(!Format::Mp3.has_quality_axis());
        assert!(!Format::Ogg.has_quality_axis());
        assert!(!Format::Flac.has_quality_axis());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Format::Webm).unwrap(), "\"webm\"");
    }
}
