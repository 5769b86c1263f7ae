//! Turns an [`AnalysisResult`] into the panel layout the page renders.

use serde::Serialize;

use crate::{
    models::{AnalysisFailure, AnalysisRequest, AnalysisResult, MatchAnalysis, Notice, Tone, Verdict},
    sections,
    video::{self, VideoReference},
};

/// What the report needs to know about the submission, captured before the request (and
/// its temp file) is dropped.
#[derive(Debug, Clone, Serialize)]
pub struct RequestSummary {
    pub personality: String,
    pub image_count: usize,
    /// "WIDTHxHEIGHT" per image, in upload order.
    pub image_dimensions: Vec<String>,
    pub video: Option<VideoSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum VideoSummary {
    Youtube { video_id: String, short_form: bool },
    Upload { name: String, short_form: bool },
}

impl RequestSummary {
    pub fn from_request(request: &AnalysisRequest) -> Self {
        let video = request.video.as_ref().map(|v| match v {
            VideoReference::External { video_id, short_form } => VideoSummary::Youtube {
                video_id: video_id.clone(),
                short_form: *short_form,
            },
            VideoReference::Uploaded(upload) => VideoSummary::Upload {
                name: upload.original_name.clone(),
                short_form: upload.short_form,
            },
        });
        Self {
            personality: request.personality.clone(),
            image_count: request.images.len(),
            image_dimensions: request
                .images
                .iter()
                .map(|img| format!("{}x{}", img.width, img.height))
                .collect(),
            video,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTone {
    Good,
    Fair,
    Poor,
}

impl ScoreTone {
    pub fn for_score(score: u8) -> Self {
        match score {
            7.. => ScoreTone::Good,
            5..=6 => ScoreTone::Fair,
            _ => ScoreTone::Poor,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub score_label: String,
    pub score_tone: ScoreTone,
    pub verdict: Verdict,
    pub analyzed_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    Paragraph { text: String },
    Labeled { label: String, text: String },
    Checklist { items: Vec<String> },
    Steps { items: Vec<String> },
    Callout { tone: Tone, text: String },
    Embed { url: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct Panel {
    pub key: &'static str,
    pub title: &'static str,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub result: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    pub notices: Vec<Notice>,
    pub panels: Vec<Panel>,
}

pub fn build(result: AnalysisResult, request: &RequestSummary, notices: Vec<Notice>) -> Report {
    let (summary, panels) = match &result {
        AnalysisResult::Success(analysis) => (
            Some(summary(analysis, request)),
            vec![
                overview_panel(analysis),
                visual_panel(analysis, request),
                content_panel(analysis, request),
                recommendations_panel(analysis),
            ],
        ),
        AnalysisResult::Failure(failure) => (None, vec![failure_panel(failure)]),
    };
    Report { result, summary, notices, panels }
}

fn summary(analysis: &MatchAnalysis, request: &RequestSummary) -> Summary {
    Summary {
        score_label: format!("{}/10", analysis.match_score),
        score_tone: ScoreTone::for_score(analysis.match_score),
        verdict: analysis.verdict,
        analyzed_by: format!("🤖 Analysis by: {}", request.personality),
    }
}

fn heading(text: &str) -> Block {
    Block::Heading { text: text.to_string() }
}

fn paragraph(text: &str) -> Block {
    Block::Paragraph { text: text.to_string() }
}

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn overview_panel(analysis: &MatchAnalysis) -> Panel {
    let mut blocks = Vec::new();
    if let Some(evaluation) = sections::match_evaluation(&analysis.analysis) {
        blocks.push(Block::Labeled { label: "Match Evaluation".into(), text: evaluation.into() });
    }
    blocks.push(heading("Complete Analysis"));
    blocks.push(paragraph(&analysis.analysis));
    Panel { key: "overview", title: "📊 Analysis Overview", blocks }
}

fn visual_panel(analysis: &MatchAnalysis, request: &RequestSummary) -> Panel {
    let mut blocks = vec![heading("Product & Influencer Visual Alignment")];
    if let Some(strengths) = sections::strengths(&analysis.analysis) {
        blocks.push(Block::Labeled { label: "Strengths".into(), text: strengths.into() });
    }
    blocks.push(heading("Visual Elements Analyzed"));
    blocks.push(Block::Checklist {
        items: list(&[
            "Product imagery colors, composition, and style",
            "Brand aesthetic and visual identity",
            "Product presentation and staging",
        ]),
    });
    if request.image_count > 0 {
        blocks.push(heading("Product Images Analyzed"));
        blocks.push(paragraph(&format!(
            "{} product image(s) were sent for analysis ({}).",
            request.image_count,
            request.image_dimensions.join(", ")
        )));
    }
    Panel { key: "visual", title: "🖼️ Visual Analysis", blocks }
}

fn content_panel(analysis: &MatchAnalysis, request: &RequestSummary) -> Panel {
    let mut blocks = vec![heading("Content Style Analysis")];

    let Some(video) = &request.video else {
        blocks.push(Block::Callout {
            tone: Tone::Info,
            text: "No video content was provided for analysis.".into(),
        });
        return Panel { key: "content", title: "🎬 Content Style", blocks };
    };

    match video {
        VideoSummary::Youtube { video_id, short_form } => {
            let kind = if *short_form { "YouTube Shorts" } else { "YouTube Video" };
            blocks.push(heading(&format!("{kind} Content Analyzed")));
            blocks.push(Block::Embed { url: video::embed_url(video_id) });
        }
        VideoSummary::Upload { name, short_form } => {
            let kind = if *short_form { "Vertical/Short-form Video" } else { "Standard Video" };
            blocks.push(heading(&format!("Uploaded {kind} Content Analyzed")));
            blocks.push(Block::Callout {
                tone: Tone::Info,
                text: format!("Video file '{name}' was analyzed but is no longer available for display."),
            });
        }
    }

    blocks.push(heading("Content Elements Analyzed"));
    blocks.push(Block::Checklist {
        items: list(&[
            "Production quality and style",
            "Content themes and tone",
            "Visual language and aesthetic",
            "Audience engagement approach",
        ]),
    });

    if let Some(profile) = &analysis.video_analysis {
        blocks.push(heading("Video Content Analysis"));
        blocks.push(paragraph(profile));
        blocks.push(Block::Callout {
            tone: Tone::Success,
            text: "✅ Detailed video analysis completed successfully".into(),
        });
    } else if let Some(extracted) = sections::video_content_analysis(&analysis.analysis) {
        blocks.push(heading("Video Content Analysis"));
        blocks.push(paragraph(extracted));
    } else if sections::mentions_content_style(&analysis.analysis) {
        blocks.push(heading("Video Content Insights"));
        blocks.push(paragraph("Based on the AI analysis of the video content style and production elements."));
        blocks.push(paragraph("For detailed analysis, please refer to the Overview tab."));
    }

    Panel { key: "content", title: "🎬 Content Style", blocks }
}

fn recommendations_panel(analysis: &MatchAnalysis) -> Panel {
    let mut blocks = vec![heading("Partnership Recommendations")];
    match sections::recommendations(&analysis.analysis) {
        Some(recommendations) => blocks.push(Block::Labeled {
            label: "Recommendations".into(),
            text: recommendations.into(),
        }),
        None => {
            blocks.push(paragraph("Based on the visual and content analysis, here are potential next steps:"));
            blocks.push(Block::Steps {
                items: list(&[
                    "Review the match score and detailed analysis",
                    "Consider the strengths and weaknesses identified",
                    "Implement the specific recommendations provided",
                ]),
            });
        }
    }

    blocks.push(heading("Final Verdict"));
    blocks.push(match analysis.verdict {
        Verdict::Match => Block::Callout {
            tone: Tone::Success,
            text: "✅ RECOMMENDED MATCH: This product and influencer pairing shows strong compatibility based on visual style, content approach, and brand alignment.".into(),
        },
        Verdict::NoMatch => Block::Callout {
            tone: Tone::Error,
            text: "❌ NOT RECOMMENDED: This product and influencer pairing may not be optimal based on the analysis. Review the recommendations for alternatives.".into(),
        },
    });
    Panel { key: "recommendations", title: "📈 Recommendations", blocks }
}

fn failure_panel(failure: &AnalysisFailure) -> Panel {
    Panel {
        key: "failure",
        title: "Analysis failed",
        blocks: vec![
            Block::Callout { tone: Tone::Error, text: format!("Analysis failed: {}", failure.error) },
            Block::Callout {
                tone: Tone::Info,
                text: "Please check your API key and try again, or try with different product/influencer content.".into(),
            },
            heading("Troubleshooting Tips"),
            Block::Steps {
                items: list(&[
                    "Verify your OpenAI API key is valid and has sufficient credits",
                    "Try uploading different or higher quality product images",
                    "Provide more detailed product and influencer descriptions",
                    "Try a different YouTube video link",
                ]),
            },
        ],
    }
}
