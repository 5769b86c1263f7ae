use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    analysis::Analyzer,
    config::AppConfig,
    error::AppError,
    form::AnalysisForm,
    heuristic::{self, Audience, InfluencerStyle, QuickMatch, QuickMatchRequest},
    models::Personality,
    report::{self, Report},
};

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub analyzer: Arc<Analyzer>,
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/personalities", get(personalities))
        .route("/api/analyze", post(analyze))
        .route("/api/quick-match", post(quick_match))
        .route("/api/quick-match/options", get(quick_match_options))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn personalities() -> Json<Value> {
    let labels: Vec<&str> = Personality::ALL.iter().map(|p| p.label()).collect();
    Json(json!({
        "personalities": labels,
        "default": Personality::default().label(),
    }))
}

pub async fn analyze(State(state): State<AppState>, multipart: Multipart) -> Result<Json<Report>, AppError> {
    let form = AnalysisForm::from_multipart(multipart).await?;
    let submission = form.into_submission(state.config.fallback_api_key.as_deref())?;

    tracing::info!(
        "🎯 Analyzing product-influencer match ({} image(s), {} notice(s))",
        submission.summary.image_count,
        submission.notices.len()
    );

    let result = state.analyzer.analyze(&submission.request).await;
    tracing::info!("📦 Analysis complete (success={})", result.is_success());
    // the uploaded video's temp file goes away with the request here
    drop(submission.request);

    Ok(Json(report::build(result, &submission.summary, submission.notices)))
}

pub async fn quick_match_options() -> Json<Value> {
    let styles: Vec<&str> = InfluencerStyle::ALL.iter().map(|s| s.label()).collect();
    let audiences: Vec<&str> = Audience::ALL.iter().map(|a| a.label()).collect();
    Json(json!({ "styles": styles, "audiences": audiences }))
}

pub async fn quick_match(Json(request): Json<QuickMatchRequest>) -> Result<Json<QuickMatch>, AppError> {
    request.validate()?;
    let result = heuristic::determine_match(&request);
    tracing::info!(
        "⚡ Quick match for '{}': score={} (style={}, audience={}, match={})",
        result.product_name,
        result.score,
        result.style_compatibility,
        result.audience_compatibility,
        result.is_match
    );
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::AnalyzerSettings,
        images::sample_png,
        openai::OpenAiError,
        testing::ScriptedBackend,
    };
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    const BOUNDARY: &str = "brandbuddiesboundary";

    fn app(backend: Arc<ScriptedBackend>) -> Router {
        let config = Arc::new(AppConfig::default());
        let analyzer = Arc::new(Analyzer::new(backend, AnalyzerSettings::from(config.as_ref())));
        router(AppState { config, analyzer })
    }

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, Vec<u8>),
    }

    fn multipart_body(parts: Vec<Part<'_>>) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes());
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, file_name, data) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(&data);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn analyze_request(parts: Vec<Part<'_>>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn index_serves_the_form() {
        let response = app(ScriptedBackend::replying(Vec::<String>::new()))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Brand Buddies"));
    }

    #[tokio::test]
    async fn personalities_lists_all_five() {
        let response = app(ScriptedBackend::replying(Vec::<String>::new()))
            .oneshot(Request::builder().uri("/api/personalities").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["personalities"].as_array().unwrap().len(), 5);
        assert_eq!(body["default"], "Professional Analyst");
    }

    #[tokio::test]
    async fn full_submission_returns_report() {
        let backend = ScriptedBackend::replying([
            "Match Evaluation: great\nStrengths of the Match: colours\nWeaknesses: none\nRecommendations: post a reel\nFinal Verdict: MATCH",
        ]);
        let response = app(backend.clone())
            .oneshot(analyze_request(vec![
                Part::Text("api_key", "sk-test"),
                Part::Text("personality", "Trendy Social Media Expert"),
                Part::Text("product_description", "Glow-in-the-dark sneakers"),
                Part::Text("influencer_context", "Streetwear reviewer"),
                Part::File("product_images", "sneaker.png", sample_png(3, 3)),
                Part::Text("youtube_url", "https://www.youtube.com/watch?v=abc123"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["result"]["outcome"], "success");
        assert_eq!(body["result"]["verdict"], "MATCH");
        assert_eq!(body["result"]["match_score"], 7);
        assert_eq!(body["result"]["video_source"]["video_id"], "abc123");
        assert_eq!(body["summary"]["score_label"], "7/10");
        assert_eq!(body["panels"].as_array().unwrap().len(), 4);

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].api_key.expose(), "sk-test");
        assert_eq!(calls[0].images.len(), 1);
        assert!(calls[0].text.contains("Glow-in-the-dark sneakers"));
        assert!(calls[0].text.contains("YOUTUBE VIDEO REFERENCE"));
    }

    #[tokio::test]
    async fn uploaded_video_goes_through_profile_call() {
        let backend = ScriptedBackend::replying(["Typical vlog profile", "NO MATCH"]);
        let response = app(backend.clone())
            .oneshot(analyze_request(vec![
                Part::Text("api_key", "sk-test"),
                Part::Text("product_description", "Linen shirt"),
                Part::File("product_images", "shirt.png", sample_png(2, 2)),
                Part::File("video_file", "reel.mp4", b"fake video".to_vec()),
                Part::Text("is_short_form", "on"),
            ]))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["result"]["verdict"], "NO MATCH");
        assert_eq!(body["result"]["video_analysis"], "Typical vlog profile");
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn model_failure_is_reported_not_raised() {
        let backend = ScriptedBackend::new([Err(OpenAiError::Api {
            status: 401,
            message: "Incorrect API key provided".into(),
        })]);
        let response = app(backend)
            .oneshot(analyze_request(vec![
                Part::Text("api_key", "sk-wrong"),
                Part::Text("product_description", "Linen shirt"),
                Part::File("product_images", "shirt.png", sample_png(2, 2)),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["result"]["outcome"], "failure");
        assert!(body["result"]["error"].as_str().unwrap().contains("Incorrect API key provided"));
        assert_eq!(body["panels"][0]["key"], "failure");
        assert_eq!(body["notices"][0]["tone"], "warning");
    }

    fn quick_match_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/quick-match")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn quick_match_scores_without_the_model() {
        let backend = ScriptedBackend::replying(Vec::<String>::new());
        let response = app(backend.clone())
            .oneshot(quick_match_request(json!({
                "product_name": "Desk Lamp",
                "product_description": "A simple clean desk lamp",
                "product_photo_count": 3,
                "influencer_name": "Sam",
                "influencer_content_count": 2,
                "influencer_style": "Minimalist",
                "influencer_audience": "Millennials"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["is_match"], true);
        assert_eq!(body["score"], 90);
        assert_eq!(body["style_compatibility"], 100);
        assert_eq!(body["audience_compatibility"], 75);
        assert_eq!(body["influencer_name"], "Sam");
        assert_eq!(body["strengths"].as_array().unwrap().len(), 3);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn quick_match_requires_a_product_name() {
        let response = app(ScriptedBackend::replying(Vec::<String>::new()))
            .oneshot(quick_match_request(json!({
                "product_description": "A lamp",
                "product_photo_count": 1
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Product name is required.");
    }

    #[tokio::test]
    async fn quick_match_options_list_styles_and_audiences() {
        let response = app(ScriptedBackend::replying(Vec::<String>::new()))
            .oneshot(Request::builder().uri("/api/quick-match/options").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["styles"].as_array().unwrap().len(), 10);
        assert_eq!(body["audiences"].as_array().unwrap().len(), 12);
        assert_eq!(body["styles"][0], "Minimalist");
    }

    #[tokio::test]
    async fn missing_description_is_a_bad_request() {
        let backend = ScriptedBackend::replying(["unused"]);
        let response = app(backend.clone())
            .oneshot(analyze_request(vec![
                Part::Text("api_key", "sk-test"),
                Part::File("product_images", "shirt.png", sample_png(2, 2)),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Please provide a product description.");
        assert!(backend.calls().is_empty());
    }
}
