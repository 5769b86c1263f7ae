use serde::Serialize;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use std::fmt;

use crate::video::VideoReference;

/// Caller-supplied bearer credential. Only ever written into the Authorization header.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into().trim().to_string();
        (!key.is_empty()).then_some(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Tone selector offered by the form. Labels outside this set are still accepted by the
/// prompt builder; they just get the generic tone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Personality {
    #[default]
    ProfessionalAnalyst,
    CreativeMarketer,
    DataDrivenConsultant,
    TrendySocialMediaExpert,
    BrandStrategySpecialist,
}

impl Personality {
    pub const ALL: [Personality; 5] = [
        Personality::ProfessionalAnalyst,
        Personality::CreativeMarketer,
        Personality::DataDrivenConsultant,
        Personality::TrendySocialMediaExpert,
        Personality::BrandStrategySpecialist,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Personality::ProfessionalAnalyst => "Professional Analyst",
            Personality::CreativeMarketer => "Creative Marketer",
            Personality::DataDrivenConsultant => "Data-Driven Consultant",
            Personality::TrendySocialMediaExpert => "Trendy Social Media Expert",
            Personality::BrandStrategySpecialist => "Brand Strategy Specialist",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label.trim())
    }

    pub fn tone(self) -> &'static str {
        match self {
            Personality::ProfessionalAnalyst => "Maintain a formal, business-oriented tone with emphasis on ROI and strategic alignment.",
            Personality::CreativeMarketer => "Emphasize creative storytelling opportunities and innovative campaign concepts.",
            Personality::DataDrivenConsultant => "Focus heavily on metrics, analytics, and quantifiable outcomes.",
            Personality::TrendySocialMediaExpert => "Highlight viral potential, current trends, and platform-specific opportunities.",
            Personality::BrandStrategySpecialist => "Prioritize long-term brand building and strategic positioning in the market.",
        }
    }
}

/// One product photo, normalised to PNG and base64 encoded.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub base64_png: String,
    pub width: u32,
    pub height: u32,
}

impl ImagePayload {
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", self.base64_png)
    }
}

/// Everything one submission hands to the analyzer.
#[derive(Debug)]
pub struct AnalysisRequest {
    pub api_key: ApiKey,
    pub personality: String,
    pub product_description: String,
    pub influencer_context: String,
    pub images: Vec<ImagePayload>,
    pub video: Option<VideoReference>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    #[serde(rename = "MATCH")]
    Match,
    #[serde(rename = "NO MATCH")]
    NoMatch,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Match => "MATCH",
            Verdict::NoMatch => "NO MATCH",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalVideoSource {
    pub platform: String,
    pub video_id: String,
    pub short_form: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchAnalysis {
    pub id: Uuid,
    pub match_score: u8,
    pub verdict: Verdict,
    pub analysis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_source: Option<ExternalVideoSource>,
    pub personality: String,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisFailure {
    pub id: Uuid,
    pub error: String,
    pub analysis: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnalysisResult {
    Success(MatchAnalysis),
    Failure(AnalysisFailure),
}

impl AnalysisResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResult::Success(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

/// Non-fatal remark produced while reading the form (bad URL, missing video, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub tone: Tone,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { tone: Tone::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { tone: Tone::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { tone: Tone::Error, message: message.into() }
    }
}
