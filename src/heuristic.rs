use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Weighted score at or above which the pairing counts as a match.
pub const MATCH_THRESHOLD: u8 = 70;

const STYLE_BASE: i32 = 75;
const AUDIENCE_BASE: i32 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfluencerStyle {
    Minimalist,
    ColorfulVibrant,
    LuxuryPremium,
    CasualRelaxed,
    ArtisticCreative,
    ProfessionalCorporate,
    VintageRetro,
    NaturalOrganic,
    EdgyAlternative,
    PlayfulFun,
}

impl InfluencerStyle {
    pub const ALL: [InfluencerStyle; 10] = [
        InfluencerStyle::Minimalist,
        InfluencerStyle::ColorfulVibrant,
        InfluencerStyle::LuxuryPremium,
        InfluencerStyle::CasualRelaxed,
        InfluencerStyle::ArtisticCreative,
        InfluencerStyle::ProfessionalCorporate,
        InfluencerStyle::VintageRetro,
        InfluencerStyle::NaturalOrganic,
        InfluencerStyle::EdgyAlternative,
        InfluencerStyle::PlayfulFun,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InfluencerStyle::Minimalist => "Minimalist",
            InfluencerStyle::ColorfulVibrant => "Colorful/Vibrant",
            InfluencerStyle::LuxuryPremium => "Luxury/Premium",
            InfluencerStyle::CasualRelaxed => "Casual/Relaxed",
            InfluencerStyle::ArtisticCreative => "Artistic/Creative",
            InfluencerStyle::ProfessionalCorporate => "Professional/Corporate",
            InfluencerStyle::VintageRetro => "Vintage/Retro",
            InfluencerStyle::NaturalOrganic => "Natural/Organic",
            InfluencerStyle::EdgyAlternative => "Edgy/Alternative",
            InfluencerStyle::PlayfulFun => "Playful/Fun",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    GenZ,
    Millennials,
    GenX,
    BabyBoomers,
    FashionEnthusiasts,
    FitnessWellness,
    BeautyLovers,
    TechEnthusiasts,
    Foodies,
    Travelers,
    EcoConscious,
    LuxuryShoppers,
}

impl Audience {
    pub const ALL: [Audience; 12] = [
        Audience::GenZ,
        Audience::Millennials,
        Audience::GenX,
        Audience::BabyBoomers,
        Audience::FashionEnthusiasts,
        Audience::FitnessWellness,
        Audience::BeautyLovers,
        Audience::TechEnthusiasts,
        Audience::Foodies,
        Audience::Travelers,
        Audience::EcoConscious,
        Audience::LuxuryShoppers,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Audience::GenZ => "Gen Z",
            Audience::Millennials => "Millennials",
            Audience::GenX => "Gen X",
            Audience::BabyBoomers => "Baby Boomers",
            Audience::FashionEnthusiasts => "Fashion Enthusiasts",
            Audience::FitnessWellness => "Fitness & Wellness",
            Audience::BeautyLovers => "Beauty Lovers",
            Audience::TechEnthusiasts => "Tech Enthusiasts",
            Audience::Foodies => "Foodies",
            Audience::Travelers => "Travelers",
            Audience::EcoConscious => "Eco-Conscious",
            Audience::LuxuryShoppers => "Luxury Shoppers",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.label() == label.trim())
    }
}

/// Input of the offline quick match. Uploaded files are only counted, never inspected.
/// Unknown fields such as a free-text influencer description are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuickMatchRequest {
    pub product_name: String,
    pub product_description: String,
    pub product_photo_count: usize,
    pub influencer_name: String,
    pub influencer_content_count: usize,
    pub influencer_style: String,
    pub influencer_audience: String,
}

impl QuickMatchRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.product_name.trim().is_empty() {
            return Err(AppError::EmptyProductName);
        }
        if self.product_description.trim().is_empty() {
            return Err(AppError::EmptyDescription);
        }
        if self.product_photo_count == 0 {
            return Err(AppError::NoImages);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickMatch {
    pub product_name: String,
    pub influencer_name: String,
    pub is_match: bool,
    pub score: u8,
    pub style_compatibility: u8,
    pub audience_compatibility: u8,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Keyword-driven compatibility estimate. Deterministic and independent of any model call.
pub fn determine_match(request: &QuickMatchRequest) -> QuickMatch {
    let description = request.product_description.to_lowercase();

    let style_compatibility = style_compatibility(
        InfluencerStyle::from_label(&request.influencer_style),
        &description,
        request.product_photo_count,
    );
    let audience_compatibility = audience_compatibility(
        Audience::from_label(&request.influencer_audience),
        &description,
        request.influencer_content_count,
    );
    let score = weighted_score(style_compatibility, audience_compatibility);

    QuickMatch {
        product_name: request.product_name.trim().to_string(),
        influencer_name: request.influencer_name.trim().to_string(),
        is_match: score >= MATCH_THRESHOLD,
        score,
        style_compatibility,
        audience_compatibility,
        strengths: strengths(request, style_compatibility, audience_compatibility),
        weaknesses: weaknesses(request, style_compatibility, audience_compatibility),
    }
}

/// 60% style, 40% audience, rounded half up.
pub fn weighted_score(style: u8, audience: u8) -> u8 {
    let weighted = (6 * u32::from(style) + 4 * u32::from(audience) + 5) / 10;
    weighted.min(100) as u8
}

fn clamp_percent(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

fn mentions(description: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| description.contains(t))
}

fn style_compatibility(style: Option<InfluencerStyle>, description: &str, photo_count: usize) -> u8 {
    use InfluencerStyle::*;

    let adjustment = match style {
        Some(Minimalist) if mentions(description, &["simple", "clean", "minimal"]) => 20,
        Some(Minimalist) if mentions(description, &["luxury", "ornate", "complex"]) => -15,
        Some(LuxuryPremium) if mentions(description, &["premium", "luxury", "high-end"]) => 20,
        Some(LuxuryPremium) if mentions(description, &["budget", "affordable", "cheap"]) => -15,
        Some(NaturalOrganic) if mentions(description, &["organic", "natural", "eco"]) => 20,
        Some(NaturalOrganic) if mentions(description, &["synthetic", "artificial"]) => -15,
        Some(ColorfulVibrant) if mentions(description, &["vibrant", "colorful", "bright"]) => 20,
        Some(ColorfulVibrant) if mentions(description, &["monochrome", "muted", "subtle"]) => -10,
        _ => 0,
    };
    let photos = if photo_count >= 3 { 5 } else { -5 };

    clamp_percent(STYLE_BASE + adjustment + photos)
}

fn audience_compatibility(audience: Option<Audience>, description: &str, content_count: usize) -> u8 {
    use Audience::*;

    let adjustment = match audience {
        Some(GenZ) if mentions(description, &["trend", "young", "social media"]) => 25,
        Some(GenZ) if mentions(description, &["traditional", "classic", "mature"]) => -15,
        Some(Millennials) if mentions(description, &["experience", "sustainable", "quality"]) => 25,
        Some(BeautyLovers) if mentions(description, &["beauty", "cosmetic", "skincare"]) => 25,
        Some(BeautyLovers) if !mentions(description, &["appearance", "look", "skin"]) => -15,
        Some(EcoConscious) if mentions(description, &["sustainable", "eco", "green", "natural"]) => 25,
        Some(EcoConscious) if mentions(description, &["plastic", "disposable"]) => -15,
        _ => 0,
    };
    let content = if content_count >= 2 { 5 } else { -5 };

    clamp_percent(AUDIENCE_BASE + adjustment + content)
}

fn strengths(request: &QuickMatchRequest, style: u8, audience: u8) -> Vec<String> {
    let mut strengths = Vec::new();

    if style > 80 {
        strengths.push(format!(
            "The influencer's {} style perfectly complements your product's aesthetic.",
            request.influencer_style.trim()
        ));
    } else if style > 60 {
        strengths.push("The influencer's style has good potential to showcase your product effectively.".to_string());
    }

    if audience > 80 {
        strengths.push(format!(
            "Your product strongly appeals to the influencer's {} audience.",
            request.influencer_audience.trim()
        ));
    } else if audience > 60 {
        strengths.push("There's good alignment between your product and the influencer's audience demographics.".to_string());
    }

    if request.influencer_content_count >= 3 {
        strengths.push("The influencer has provided multiple content examples, showing versatility.".to_string());
    }
    if request.product_photo_count >= 3 {
        strengths.push("Your product is well-represented with multiple high-quality images.".to_string());
    }

    if strengths.len() < 2 {
        strengths.push("The collaboration has potential to increase brand awareness.".to_string());
    }
    strengths
}

fn weaknesses(request: &QuickMatchRequest, style: u8, audience: u8) -> Vec<String> {
    let mut weaknesses = Vec::new();

    if style < 50 {
        weaknesses.push(format!(
            "The influencer's {} style may not be the best fit for your product presentation.",
            request.influencer_style.trim()
        ));
    } else if style < 70 {
        weaknesses.push("There are some style inconsistencies between the influencer and your product.".to_string());
    }

    if audience < 50 {
        weaknesses.push(format!(
            "Your product may not strongly resonate with the influencer's {} audience.",
            request.influencer_audience.trim()
        ));
    } else if audience < 70 {
        weaknesses.push("There's room to improve alignment with the influencer's audience.".to_string());
    }

    if request.influencer_content_count < 2 {
        weaknesses.push("More content examples from the influencer would help assess compatibility better.".to_string());
    }
    if request.product_photo_count < 2 {
        weaknesses.push("Additional product photos would improve the matching accuracy.".to_string());
    }

    if weaknesses.len() < 2 {
        weaknesses.push("Consider providing more detailed information for more accurate matching.".to_string());
    }
    weaknesses
}
