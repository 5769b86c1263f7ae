//! Prompt text for the matching call and for the hypothetical video-profile call.
//!
//! Everything here is plain string assembly. No input is validated: an empty description or
//! an odd personality label just produces a less useful prompt.

use crate::{
    models::{AnalysisRequest, ImagePayload, Personality},
    video::{UploadedVideo, VideoReference},
};

/// Tone used when the personality label is not one of the five known ones.
pub const GENERIC_TONE: &str = "provide a detailed assessment of product-influencer compatibility.";

pub const NO_VIDEO_CONTEXT: &str = "No influencer video was provided for analysis.";

/// Header under which a fabricated video profile is spliced into the video context.
pub const VIDEO_PROFILE_HEADER: &str = "HYPOTHETICAL VIDEO CONTENT PROFILE:";

const VIDEO_EMPHASIS: &str = "IMPORTANT: Your analysis MUST include a detailed section on the video content provided.
The video analysis should be a significant factor in your overall match evaluation.
Include specific observations about the video style, production quality, and content approach.";

const RESPONSE_FORMAT: &str = "Please provide your analysis in this format:
- Match Evaluation: A clear statement indicating whether the product and influencer are a good match.
- Match Score: Rate the compatibility on a scale of 1-10.
- Video Content Analysis: Analyze the provided video content in detail, focusing on style, quality, and brand alignment.
- Strengths of the Match: Highlight specific areas where the pairing works well.
- Weaknesses/Concerns: Identify any potential mismatches or risks.
- Recommendations: Suggest ways to improve the partnership or propose alternative approaches if needed.
- Final Verdict: Provide a summary conclusion (MATCH/NO MATCH) about the suitability of the match.";

const PROFILE_SYSTEM_PROMPT: &str = "You are a video content analysis expert specializing in marketing and influencer content.
Your task is to create a hypothetical analysis of video content based on the provided metadata.

IMPORTANT INSTRUCTIONS:
- This is a HYPOTHETICAL EXERCISE to analyze marketing content
- You are NOT being asked to analyze actual video content
- Instead, you should create a marketing analysis based on the video type and format
- Focus on typical production elements, content styles, and engagement techniques for this type of content
- Provide insights that would be valuable for product-influencer matching

DO NOT refuse to complete this task or state that you cannot analyze the video.
This is a hypothetical exercise for marketing purposes, not actual video analysis.";

const SHORT_FORM_PROFILE_NOTE: &str = "Note that this is vertical/short-form video content, which typically has:
- Faster pacing and shorter duration
- More dynamic editing and transitions
- Vertical orientation optimized for mobile viewing
- Direct engagement techniques like hooks and calls-to-action
- Music and trending sounds";

const STANDARD_PROFILE_NOTE: &str = "Note that this is standard video content, which typically has:
- Longer duration with more developed narrative
- Traditional horizontal framing
- More detailed production elements
- Varied pacing and editing styles
- More comprehensive content development";

/// Text and images for one chat-completion call.
#[derive(Debug, Clone)]
pub struct PromptBundle {
    pub system: String,
    pub text: String,
    pub images: Vec<ImagePayload>,
}

/// One-sentence tone modifier for a personality label.
pub fn tone_for(label: &str) -> &'static str {
    Personality::from_label(label).map(Personality::tone).unwrap_or(GENERIC_TONE)
}

pub fn system_prompt(personality_label: &str) -> String {
    format!(
        "You are a professional marketing AI specializing in influencer-product matching analysis.

TASK: Create a hypothetical analysis of compatibility between the product and typical influencer content styles.

IMPORTANT INSTRUCTIONS:
- This is a HYPOTHETICAL EXERCISE to analyze marketing compatibility
- You are analyzing product images and descriptions alongside hypothetical video content profiles
- You should NOT refuse to complete this task or state that you cannot analyze the content
- This is for marketing decision-making purposes only

ANALYSIS APPROACH:
- Examine product images and description thoroughly
- Consider the hypothetical video content profile provided
- Identify potential alignment between product positioning and typical content styles
- Consider target audience overlap
- Evaluate aesthetic and tonal compatibility

{personality_label}

FORMAT YOUR RESPONSE WITH THESE SECTIONS:
1. Overview: Brief summary of the product and hypothetical content style
2. Product Analysis: Key features, positioning, target market
3. Video Content Analysis: Typical style, production elements, tone, audience for this format
4. Compatibility Assessment: How well the product and content style might align
5. Strengths of the Match: Specific reasons why they could work well together
6. Potential Concerns: Any potential misalignments or considerations
7. Recommendations: Specific content approach suggestions
8. Verdict: Clear MATCH or NO MATCH recommendation with a score (1-10)

Be thorough but concise. Provide specific, actionable insights."
    )
}

fn image_notes(count: usize) -> String {
    (1..=count)
        .map(|i| format!("Product Image {i}: Please analyze the visual elements including colors, composition, style, quality, and product presentation. Focus on aesthetic elements and brand positioning signals."))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Context block describing the influencer video, worded per source.
pub fn video_context(video: Option<&VideoReference>) -> String {
    match video {
        Some(VideoReference::External { video_id, short_form: true }) => format!(
            "YOUTUBE SHORTS VIDEO REFERENCE: https://youtube.com/shorts/{video_id}

Please create a HYPOTHETICAL ANALYSIS of this type of content.

VIDEO ANALYSIS INSTRUCTIONS:
- This is a hypothetical exercise to analyze short-form vertical video content
- Consider typical production elements for short-form content: lighting, editing, transitions, graphics, music
- Consider typical pacing, hooks, narrative structure, and engagement techniques for this format
- Consider typical content themes, tone, and target audience for this format
- Analyze how this type of content style would typically align with the product aesthetics
- Consider typical visual language, color schemes, and overall mood of this content format

IMPORTANT: This is a hypothetical exercise. Do not refuse to complete this task.
Focus on typical content style, production quality, and creative approach for this format."
        ),
        Some(VideoReference::External { video_id, short_form: false }) => format!(
            "YOUTUBE VIDEO REFERENCE: https://www.youtube.com/watch?v={video_id}

Please create a HYPOTHETICAL ANALYSIS of this type of content.

VIDEO ANALYSIS INSTRUCTIONS:
- This is a hypothetical exercise to analyze standard video content
- Consider typical production elements for standard videos: camera work, lighting, editing, set design, graphics
- Consider typical pacing, narrative structure, and engagement techniques for this format
- Consider typical content themes, tone, and target audience for this format
- Analyze how this type of content style would typically align with the product aesthetics
- Consider typical visual language, color schemes, and overall mood of this content format

IMPORTANT: This is a hypothetical exercise. Do not refuse to complete this task.
Focus on typical content style, production quality, and creative approach for this format."
        ),
        Some(VideoReference::Uploaded(upload)) => format!(
            "IMPORTANT - ANALYZE THIS UPLOADED VIDEO: Influencer Uploaded {}

YOU MUST ANALYZE THE UPLOADED VIDEO THOROUGHLY.

VIDEO ANALYSIS INSTRUCTIONS:
- This is a critical part of your analysis - the video MUST be analyzed in detail
- Analyze the video content format, style, and production quality
- Note production elements: camera work, lighting, editing, set design, graphics
- Examine pacing, narrative structure, and engagement techniques
- Identify content themes, tone, and apparent target audience
- Consider how the influencer's content style would align with the product aesthetics
- Analyze the visual language, color schemes, and overall mood

REMEMBER: Do not attempt to identify specific individuals. Focus only on content style, production quality, and creative approach.",
            upload.type_label()
        ),
        None => NO_VIDEO_CONTEXT.to_string(),
    }
}

/// Appends a fabricated content profile to a video-context block. The profile is not
/// inspected; it goes in verbatim.
pub fn with_video_profile(context: &str, profile: &str) -> String {
    format!(
        "{context}

{VIDEO_PROFILE_HEADER}
Based on the video format and type, here is a hypothetical content profile to consider in your analysis:

{profile}

IMPORTANT: Use this hypothetical profile to inform your product-influencer compatibility analysis.
Consider how these typical content characteristics would align with the product."
    )
}

/// Builds the matching prompt. `video_context` is passed separately so a profile can be
/// spliced in before assembly.
pub fn assemble(request: &AnalysisRequest, video_context: &str) -> PromptBundle {
    let system = system_prompt(&request.personality);
    let tone = tone_for(&request.personality);
    let emphasis = if request.video.is_some() { VIDEO_EMPHASIS } else { "" };

    let text = format!(
        "{system}

As a {personality}, {tone}

Product Details:
- Product Description: {description}
- Visual Analysis Instructions:
{notes}

Influencer Context:
{video_context}
{influencer_context}

{emphasis}

{RESPONSE_FORMAT}",
        personality = request.personality,
        description = request.product_description,
        notes = image_notes(request.images.len()),
        influencer_context = request.influencer_context,
    );

    PromptBundle {
        system,
        text,
        images: request.images.clone(),
    }
}

/// System and user text for the text-only call that invents a profile for an uploaded video.
pub fn video_profile_prompt(upload: &UploadedVideo) -> (String, String) {
    let video_type = upload.type_label();
    let note = if upload.short_form { SHORT_FORM_PROFILE_NOTE } else { STANDARD_PROFILE_NOTE };
    let user = format!(
        "I need you to create a hypothetical marketing analysis for an influencer's {video_type}.

Video metadata:
- Video type: {video_type}
- File name: {file_name}

Please provide a detailed hypothetical analysis covering:
1. Production Quality: What technical aspects (lighting, camera work, editing) would be typical for this content format?
2. Content Style: What aesthetic, tone, and visual approach would be expected?
3. Engagement Techniques: How would this type of content typically engage viewers?
4. Target Audience: What audience demographics would this content format typically appeal to?
5. Brand Compatibility: What types of products/brands would align well with this content style?

Format your response as a structured analysis with clear sections.
Remember, this is a hypothetical exercise to assist with marketing decisions.

{note}",
        file_name = upload.stored_name(),
    );
    (PROFILE_SYSTEM_PROMPT.to_string(), user)
}
