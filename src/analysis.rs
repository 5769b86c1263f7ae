use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    models::{AnalysisFailure, AnalysisRequest, AnalysisResult, ExternalVideoSource, MatchAnalysis},
    openai::{CompletionBackend, CompletionRequest, OpenAiError},
    prompt,
    sections::{self, MATCH_SCORE},
    video::{UploadedVideo, VideoReference},
};

pub const FAILURE_ANALYSIS: &str = "Error occurred during analysis. Please check your API key and try again.";

#[derive(Debug, Clone, Copy)]
pub struct AnalyzerSettings {
    pub analysis_max_tokens: u32,
    pub profile_max_tokens: u32,
    /// Whether uploaded videos get a model-invented content profile spliced into the prompt.
    pub video_profile_enabled: bool,
}

impl From<&AppConfig> for AnalyzerSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            analysis_max_tokens: config.analysis_max_tokens,
            profile_max_tokens: config.profile_max_tokens,
            video_profile_enabled: config.video_profile_enabled,
        }
    }
}

pub struct Analyzer {
    backend: Arc<dyn CompletionBackend>,
    settings: AnalyzerSettings,
}

impl Analyzer {
    pub fn new(backend: Arc<dyn CompletionBackend>, settings: AnalyzerSettings) -> Self {
        Self { backend, settings }
    }

    /// Runs one product/influencer match. Never returns an error: a failed model call comes
    /// back as [`AnalysisResult::Failure`].
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        let id = Uuid::new_v4();
        info!(
            "🚀 Analysis {} started (personality={:?}, images={}, video={})",
            id,
            request.personality,
            request.images.len(),
            video_kind(request.video.as_ref())
        );

        let mut video_context = prompt::video_context(request.video.as_ref());
        let mut video_analysis = None;

        if let Some(VideoReference::Uploaded(upload)) = &request.video {
            if self.settings.video_profile_enabled && upload.path().exists() {
                match self.profile_video(request, upload).await {
                    Ok(profile) => {
                        info!("🎬 Video profile generated for {} ({} chars)", id, profile.len());
                        video_context = prompt::with_video_profile(&video_context, &profile);
                        video_analysis = Some(profile);
                    }
                    Err(e) => warn!("⚠️ Video profile failed for {}, continuing without it: {}", id, e),
                }
            }
        }

        let bundle = prompt::assemble(request, &video_context);
        let completion = self
            .backend
            .complete(CompletionRequest {
                api_key: request.api_key.clone(),
                system: bundle.system,
                text: bundle.text,
                images: bundle.images,
                max_tokens: self.settings.analysis_max_tokens,
            })
            .await;

        match completion {
            Ok(text) => {
                let verdict = sections::verdict(&text);
                info!("✅ Analysis {} finished: {}", id, verdict);
                AnalysisResult::Success(MatchAnalysis {
                    id,
                    match_score: MATCH_SCORE,
                    verdict,
                    analysis: text,
                    video_analysis,
                    video_source: external_source(request.video.as_ref()),
                    personality: request.personality.clone(),
                    analyzed_at: Utc::now(),
                })
            }
            Err(e) => {
                warn!("❌ Analysis {} failed: {}", id, e);
                AnalysisResult::Failure(AnalysisFailure {
                    id,
                    error: e.to_string(),
                    analysis: FAILURE_ANALYSIS.to_string(),
                })
            }
        }
    }

    async fn profile_video(&self, request: &AnalysisRequest, upload: &UploadedVideo) -> Result<String, OpenAiError> {
        info!("🎬 Requesting hypothetical profile for uploaded video '{}'", upload.original_name);
        let (system, text) = prompt::video_profile_prompt(upload);
        self.backend
            .complete(CompletionRequest {
                api_key: request.api_key.clone(),
                system,
                text,
                images: Vec::new(),
                max_tokens: self.settings.profile_max_tokens,
            })
            .await
    }
}

fn external_source(video: Option<&VideoReference>) -> Option<ExternalVideoSource> {
    match video {
        Some(VideoReference::External { video_id, short_form }) => Some(ExternalVideoSource {
            platform: "youtube".to_string(),
            video_id: video_id.clone(),
            short_form: *short_form,
        }),
        _ => None,
    }
}

fn video_kind(video: Option<&VideoReference>) -> &'static str {
    match video {
        Some(VideoReference::External { short_form: true, .. }) => "youtube-shorts",
        Some(VideoReference::External { .. }) => "youtube",
        Some(VideoReference::Uploaded(_)) => "upload",
        None => "none",
    }
}
