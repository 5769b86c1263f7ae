use std::{io::Write, path::Path};
use tempfile::NamedTempFile;
use tracing::info;

pub const SUPPORTED_VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mov", "avi", "webm"];

/// Where the influencer video came from. Exactly one source per submission.
#[derive(Debug)]
pub enum VideoReference {
    External { video_id: String, short_form: bool },
    Uploaded(UploadedVideo),
}

/// Uploaded video spooled to disk. The file is removed when this value is dropped.
#[derive(Debug)]
pub struct UploadedVideo {
    file: NamedTempFile,
    pub original_name: String,
    pub short_form: bool,
}

impl UploadedVideo {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Name of the spooled file, which is what the profile prompt refers to.
    pub fn stored_name(&self) -> String {
        self.path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// "Short-Form/Vertical Video" or "Standard Video".
    pub fn type_label(&self) -> &'static str {
        if self.short_form { "Short-Form/Vertical Video" } else { "Standard Video" }
    }
}

/// Pulls the video id out of a pasted YouTube link. Returns `(id, is_shorts)`.
///
/// Recognised shapes: `youtube.com/watch?v=ID`, `youtu.be/ID` and `youtube.com/shorts/ID`.
/// Anything else yields `None`.
pub fn parse_youtube_url(url: &str) -> Option<(String, bool)> {
    let url = url.trim();
    let (id, short_form) = if url.contains("youtube.com/watch?v=") {
        let rest = url.split_once("v=")?.1;
        (rest.split('&').next().unwrap_or_default(), false)
    } else if let Some((_, rest)) = url.split_once("youtu.be/") {
        (rest.split('?').next().unwrap_or_default(), false)
    } else if url.contains("youtube.com/shorts/") {
        let rest = url.split_once("shorts/")?.1;
        (rest.split('?').next().unwrap_or_default(), true)
    } else {
        return None;
    };

    (!id.is_empty()).then(|| (id.to_string(), short_form))
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}")
}

/// Lower-cased extension of an uploaded file name, if it is one we accept.
pub fn supported_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    SUPPORTED_VIDEO_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Writes the uploaded bytes to a temporary file that keeps the original extension.
pub fn store_upload(original_name: &str, extension: &str, data: &[u8], short_form: bool) -> std::io::Result<UploadedVideo> {
    let mut file = tempfile::Builder::new()
        .prefix("influencer-video-")
        .suffix(&format!(".{extension}"))
        .tempfile()?;
    file.write_all(data)?;
    file.flush()?;

    info!("🎬 Stored uploaded video '{}' ({} bytes) at {}", original_name, data.len(), file.path().display());

    Ok(UploadedVideo {
        file,
        original_name: original_name.to_string(),
        short_form,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn watch_urls_are_standard() {
        assert_eq!(
            parse_youtube_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            Some(("dQw4w9WgXcQ".to_string(), false))
        );
    }

    #[test]
    fn short_links_are_standard() {
        assert_eq!(
            parse_youtube_url("https://youtu.be/dQw4w9WgXcQ?si=abc"),
            Some(("dQw4w9WgXcQ".to_string(), false))
        );
    }

    #[test]
    fn shorts_urls_are_short_form() {
        assert_eq!(
            parse_youtube_url("https://youtube.com/shorts/abc123XYZ?feature=share"),
            Some(("abc123XYZ".to_string(), true))
        );
    }

    #[test]
    fn unknown_shapes_are_rejected() {
        assert_eq!(parse_youtube_url("https://vimeo.com/12345"), None);
        assert_eq!(parse_youtube_url("https://www.youtube.com/watch?v="), None);
        assert_eq!(parse_youtube_url(""), None);
    }

    #[test]
    fn extension_filter() {
        assert_eq!(supported_extension("clip.MP4").as_deref(), Some("mp4"));
        assert_eq!(supported_extension("reel.webm").as_deref(), Some("webm"));
        assert_eq!(supported_extension("notes.txt"), None);
        assert_eq!(supported_extension("noextension"), None);
    }

    #[test]
    fn stored_upload_lives_until_dropped() {
        let upload = store_upload("reel.mov", "mov", b"not really a video", true).unwrap();
        let path = upload.path().to_path_buf();
        assert!(path.exists());
        assert!(upload.stored_name().ends_with(".mov"));
        assert_eq!(upload.type_label(), "Short-Form/Vertical Video");
        assert_eq!(std::fs::read(&path).unwrap(), b"not really a video");

        drop(upload);
        assert!(!path.exists());
    }
}
