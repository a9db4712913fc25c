use std::fmt;
use std::sync::OnceLock;
use clap::ValueEnum;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum OutputFormat {
    Ogg,
    Mp3,
    Flac,
    Wav,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Ogg,
        OutputFormat::Mp3,
        OutputFormat::Flac,
        OutputFormat::Wav,
    ];

    /// File extension and directory suffix for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Ogg => "ogg",
            OutputFormat::Mp3 => "mp3",
            OutputFormat::Flac => "flac",
            OutputFormat::Wav => "wav",
        }
    }

    pub fn is_lossless(&self) -> bool {
        matches!(self, OutputFormat::Flac | OutputFormat::Wav)
    }

    /// Encoder override for formats whose ffmpeg default is not what we want.
    pub fn codec_args(&self) -> &'static [&'static str] {
        match self {
            OutputFormat::Ogg => &["-codec:a", "libvorbis"],
            _ => &[],
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the quality token is handed to ffmpeg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quality {
    /// Constant bitrate such as `320k`, passed as `-b:a`.
    Bitrate(String),
    /// Anything else, passed to the encoder's variable quality scale as `-qscale:a`.
    Scale(String),
}

fn bitrate_regex() -> &'static Regex {
    static BITRATE: OnceLock<Regex> = OnceLock::new();
    BITRATE.get_or_init(|| Regex::new(r"^\d+[kK]$").expect("valid bitrate pattern"))
}

impl Quality {
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        if bitrate_regex().is_match(token) {
            Quality::Bitrate(token.to_string())
        } else {
            Quality::Scale(token.to_string())
        }
    }

    /// ffmpeg flags for this quality when encoding to `format`.
    /// Lossless targets take no quality flags at all.
    pub fn args_for(quality: Option<&Quality>, format: OutputFormat) -> Vec<String> {
        if format.is_lossless() {
            return Vec::new();
        }

        let mut args = match quality {
            Some(Quality::Bitrate(t)) => vec!["-b:a".to_string(), t.clone()],
            Some(Quality::Scale(t)) => vec!["-qscale:a".to_string(), t.clone()],
            None => Vec::new(),
        };
        // Drop embedded cover art instead of trying to encode it as video
        args.push("-vn".to_string());
        args
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Bitrate(t) => write!(f, "{} (constant bitrate)", t),
            Quality::Scale(t) => write!(f, "{} (variable quality)", t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bitrate_tokens_select_constant_bitrate() {
        assert_eq!(Quality::from_token("320k"), Quality::Bitrate("320k".into()));
        assert_eq!(Quality::from_token("192K"), Quality::Bitrate("192K".into()));
        assert_eq!(Quality::from_token("5"), Quality::Scale("5".into()));
        assert_eq!(Quality::from_token("k320"), Quality::Scale("k320".into()));
    }

    #[test]
    fn lossless_formats_take_no_quality_flags() {
        let q = Quality::from_token("320k");
        assert!(Quality::args_for(Some(&q), OutputFormat::Flac).is_empty());
        assert!(Quality::args_for(Some(&q), OutputFormat::Wav).is_empty());
    }

    #[test]
    fn lossy_quality_flags() {
        let cbr = Quality::from_token("320k");
        assert_eq!(
            Quality::args_for(Some(&cbr), OutputFormat::Mp3),
            vec!["-b:a", "320k", "-vn"]
        );
        let vbr = Quality::from_token("6");
        assert_eq!(
            Quality::args_for(Some(&vbr), OutputFormat::Ogg),
            vec!["-qscale:a", "6", "-vn"]
        );
        assert_eq!(Quality::args_for(None, OutputFormat::Ogg), vec!["-vn"]);
    }

    #[test]
    fn only_ogg_overrides_the_codec() {
        assert_eq!(OutputFormat::Ogg.codec_args(), &["-codec:a", "libvorbis"]);
        assert!(OutputFormat::Mp3.codec_args().is_empty());
        assert!(OutputFormat::Flac.codec_args().is_empty());
    }
}
