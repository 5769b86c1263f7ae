use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

use crate::{
    error::AppError,
    images,
    models::{AnalysisRequest, ApiKey, Notice, Personality},
    report::RequestSummary,
    video::{self, VideoReference, SUPPORTED_VIDEO_EXTENSIONS},
};

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub data: Bytes,
}

/// Raw fields of the analysis form, before validation.
#[derive(Debug, Default)]
pub struct AnalysisForm {
    pub api_key: Option<String>,
    pub personality: Option<String>,
    pub product_description: String,
    pub influencer_context: String,
    pub product_images: Vec<UploadedFile>,
    pub youtube_url: Option<String>,
    pub video_file: Option<UploadedFile>,
    pub short_form: bool,
}

/// A validated submission: what the analyzer needs, what the report shows, and any
/// remarks picked up on the way.
#[derive(Debug)]
pub struct Submission {
    pub request: AnalysisRequest,
    pub summary: RequestSummary,
    pub notices: Vec<Notice>,
}

impl AnalysisForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);

            match name.as_str() {
                "product_images" => {
                    let data = field.bytes().await?;
                    // browsers send an empty part when no file was picked
                    if !data.is_empty() {
                        let name = file_name.unwrap_or_else(|| format!("image-{}", form.product_images.len() + 1));
                        form.product_images.push(UploadedFile { name, data });
                    }
                }
                "video_file" => {
                    let data = field.bytes().await?;
                    if !data.is_empty() {
                        let name = file_name.unwrap_or_else(|| "video".to_string());
                        form.video_file = Some(UploadedFile { name, data });
                    }
                }
                "api_key" => form.api_key = Some(field.text().await?),
                "personality" => form.personality = Some(field.text().await?),
                "product_description" => form.product_description = field.text().await?,
                "influencer_context" => form.influencer_context = field.text().await?,
                "youtube_url" => form.youtube_url = Some(field.text().await?),
                "is_short_form" => form.short_form = is_checked(&field.text().await?),
                other => debug!("Ignoring unknown form field '{}'", other),
            }
        }

        debug!(
            "📝 Form received: images={}, video_file={}, youtube_url={}",
            form.product_images.len(),
            form.video_file.is_some(),
            form.youtube_url.as_deref().is_some_and(|u| !u.trim().is_empty())
        );
        Ok(form)
    }

    /// Validates required fields and resolves the video reference.
    ///
    /// An uploaded file wins over a pasted link. Optional inputs that cannot be used
    /// become notices instead of errors.
    pub fn into_submission(self, fallback_api_key: Option<&str>) -> Result<Submission, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .and_then(|key| ApiKey::new(key))
            .or_else(|| fallback_api_key.and_then(|key| ApiKey::new(key)))
            .ok_or(AppError::MissingApiKey)?;

        if self.product_images.is_empty() {
            return Err(AppError::NoImages);
        }
        if self.product_description.trim().is_empty() {
            return Err(AppError::EmptyDescription);
        }

        let images = self
            .product_images
            .iter()
            .map(|file| images::to_png_payload(&file.name, &file.data))
            .collect::<Result<Vec<_>, _>>()?;

        let mut notices = Vec::new();
        let video = resolve_video(self.video_file, self.youtube_url.as_deref(), self.short_form, &mut notices)?;

        let personality = self
            .personality
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| Personality::default().label().to_string());

        let request = AnalysisRequest {
            api_key,
            personality,
            product_description: self.product_description,
            influencer_context: self.influencer_context.trim().to_string(),
            images,
            video,
        };
        let summary = RequestSummary::from_request(&request);

        Ok(Submission { request, summary, notices })
    }
}

fn resolve_video(
    upload: Option<UploadedFile>,
    youtube_url: Option<&str>,
    short_form: bool,
    notices: &mut Vec<Notice>,
) -> Result<Option<VideoReference>, AppError> {
    if let Some(file) = upload {
        match video::supported_extension(&file.name) {
            Some(ext) => {
                let stored = video::store_upload(&file.name, &ext, &file.data, short_form)?;
                if short_form {
                    notices.push(Notice::info("📱 Short-form video detected - analysis will consider short-form content style"));
                }
                return Ok(Some(VideoReference::Uploaded(stored)));
            }
            None => notices.push(Notice::error(format!(
                "Unsupported video file '{}'. Supported formats: {}.",
                file.name,
                SUPPORTED_VIDEO_EXTENSIONS.join(", ")
            ))),
        }
    }

    if let Some(url) = youtube_url.map(str::trim).filter(|u| !u.is_empty()) {
        match video::parse_youtube_url(url) {
            Some((video_id, is_shorts)) => {
                if is_shorts {
                    notices.push(Notice::info("📱 YouTube Shorts detected - analysis will consider short-form content style"));
                }
                return Ok(Some(VideoReference::External { video_id, short_form: is_shorts }));
            }
            None => notices.push(Notice::error(
                "Invalid YouTube URL format. Please use a standard YouTube URL or YouTube Shorts URL.",
            )),
        }
    }

    notices.push(Notice::warning(
        "No influencer video provided. The analysis proceeds, but it will be limited.",
    ));
    Ok(None)
}

fn is_checked(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "on" | "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{images::sample_png, models::Tone};
    use pretty_assertions::assert_eq;

    fn image() -> UploadedFile {
        UploadedFile { name: "product.png".into(), data: Bytes::from(sample_png(2, 2)) }
    }

    fn valid_form() -> AnalysisForm {
        AnalysisForm {
            api_key: Some("sk-form".into()),
            personality: Some("Creative Marketer".into()),
            product_description: "Handmade ceramic mug".into(),
            influencer_context: "  cozy home creator  ".into(),
            product_images: vec![image()],
            ..AnalysisForm::default()
        }
    }

    #[test]
    fn required_fields_are_enforced() {
        let err = AnalysisForm { api_key: None, ..valid_form() }.into_submission(None).unwrap_err();
        assert!(matches!(err, AppError::MissingApiKey));

        let err = AnalysisForm { product_images: vec![], ..valid_form() }.into_submission(None).unwrap_err();
        assert!(matches!(err, AppError::NoImages));

        let err = AnalysisForm { product_description: "   ".into(), ..valid_form() }
            .into_submission(None)
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyDescription));
    }

    #[test]
    fn fallback_key_is_used_when_form_has_none() {
        let submission = AnalysisForm { api_key: Some(" ".into()), ..valid_form() }
            .into_submission(Some("sk-env"))
            .unwrap();
        assert_eq!(submission.request.api_key.expose(), "sk-env");
    }

    #[test]
    fn undecodable_image_is_rejected() {
        let bad = UploadedFile { name: "broken.png".into(), data: Bytes::from_static(b"nope") };
        let err = AnalysisForm { product_images: vec![bad], ..valid_form() }
            .into_submission(None)
            .unwrap_err();
        assert!(matches!(err, AppError::Image(_)));
    }

    #[test]
    fn no_video_yields_warning_and_default_personality() {
        let submission = AnalysisForm { personality: None, ..valid_form() }.into_submission(None).unwrap();
        assert!(submission.request.video.is_none());
        assert_eq!(submission.request.personality, "Professional Analyst");
        assert_eq!(submission.request.influencer_context, "cozy home creator");
        assert_eq!(submission.notices.len(), 1);
        assert_eq!(submission.notices[0].tone, Tone::Warning);
    }

    #[test]
    fn unknown_personality_label_is_kept_verbatim() {
        let submission = AnalysisForm { personality: Some("Pirate Captain".into()), ..valid_form() }
            .into_submission(None)
            .unwrap();
        assert_eq!(submission.request.personality, "Pirate Captain");
    }

    #[test]
    fn shorts_link_is_resolved() {
        let submission = AnalysisForm {
            youtube_url: Some("https://youtube.com/shorts/abc123".into()),
            ..valid_form()
        }
        .into_submission(None)
        .unwrap();

        match submission.request.video {
            Some(VideoReference::External { ref video_id, short_form }) => {
                assert_eq!(video_id, "abc123");
                assert!(short_form);
            }
            ref other => panic!("unexpected video: {other:?}"),
        }
        assert_eq!(submission.notices[0].tone, Tone::Info);
    }

    #[test]
    fn bad_link_degrades_to_no_video() {
        let submission = AnalysisForm {
            youtube_url: Some("https://vimeo.com/123".into()),
            ..valid_form()
        }
        .into_submission(None)
        .unwrap();

        assert!(submission.request.video.is_none());
        let tones: Vec<_> = submission.notices.iter().map(|n| n.tone).collect();
        assert_eq!(tones, vec![Tone::Error, Tone::Warning]);
    }

    #[test]
    fn link_without_id_is_flagged() {
        let submission = AnalysisForm {
            youtube_url: Some("https://youtu.be/?si=share".into()),
            ..valid_form()
        }
        .into_submission(None)
        .unwrap();

        assert!(submission.request.video.is_none());
        assert_eq!(submission.notices[0].tone, Tone::Error);
        assert!(submission.notices[0].message.starts_with("Invalid YouTube URL format"));
    }

    #[test]
    fn upload_wins_over_link() {
        let submission = AnalysisForm {
            youtube_url: Some("https://www.youtube.com/watch?v=xyz".into()),
            video_file: Some(UploadedFile { name: "Reel.MOV".into(), data: Bytes::from_static(b"video") }),
            short_form: true,
            ..valid_form()
        }
        .into_submission(None)
        .unwrap();

        match &submission.request.video {
            Some(VideoReference::Uploaded(upload)) => {
                assert_eq!(upload.original_name, "Reel.MOV");
                assert!(upload.short_form);
                assert!(upload.path().exists());
            }
            other => panic!("unexpected video: {other:?}"),
        }
    }

    #[test]
    fn unsupported_upload_falls_back_to_link() {
        let submission = AnalysisForm {
            youtube_url: Some("https://youtu.be/xyz".into()),
            video_file: Some(UploadedFile { name: "clip.mkv".into(), data: Bytes::from_static(b"video") }),
            ..valid_form()
        }
        .into_submission(None)
        .unwrap();

        assert!(matches!(
            submission.request.video,
            Some(VideoReference::External { short_form: false, .. })
        ));
        assert_eq!(submission.notices[0].tone, Tone::Error);
        assert!(submission.notices[0].message.contains("clip.mkv"));
    }

    #[test]
    fn checkbox_values() {
        assert!(is_checked("on"));
        assert!(is_checked("TRUE"));
        assert!(!is_checked(""));
        assert!(!is_checked("off"));
    }
}
