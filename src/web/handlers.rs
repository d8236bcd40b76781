use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{analyze_soil_health, YieldAssessment};
use crate::error::AdvisorError;
use crate::io::{self, FileFormat};
use crate::models::{default_soil_profile, Season, SoilSample, YieldRequest};

use super::state::AppState;
use super::MAX_BODY_BYTES;

// ---------------------------------------------------------------------------
// Error wrapper
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct ErrorBody {
    error: String,
    details: String,
}

#[derive(Debug)]
pub(crate) struct WebError(AdvisorError);

impl From<AdvisorError> for WebError {
    fn from(e: AdvisorError) -> Self {
        WebError(e)
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_type) = match &self.0 {
            AdvisorError::ValidationError(_)
            | AdvisorError::ParseError(_)
            | AdvisorError::InvalidArea(_)
            | AdvisorError::Csv(_)
            | AdvisorError::Json(_) => (actix_web::http::StatusCode::BAD_REQUEST, "Bad Request"),
            AdvisorError::NotFound(_) => (actix_web::http::StatusCode::NOT_FOUND, "Not Found"),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ),
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        HttpResponse::build(status).json(ErrorBody {
            error: error_type.to_string(),
            details: self.0.to_string(),
        })
    }
}

fn parse_season(season: Option<&str>) -> Result<Season, AdvisorError> {
    match season.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.parse(),
        None => Ok(Season::current()),
    }
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct PredictBody {
    #[serde(flatten)]
    request: YieldRequest,
    season: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct PredictResponse {
    id: Uuid,
    assessment: YieldAssessment,
}

pub async fn predict(
    state: web::Data<AppState>,
    body: web::Json<PredictBody>,
) -> Result<HttpResponse, WebError> {
    let body = body.into_inner();
    let season = parse_season(body.season.as_deref())?;
    let assessment = state.advisor()?.assess(&body.request, season)?;

    let id = Uuid::new_v4();
    tracing::debug!(%id, crop = %body.request.crop, "stored assessment");
    state.insert_assessment(id, assessment.clone());
    Ok(HttpResponse::Ok().json(PredictResponse { id, assessment }))
}

pub async fn get_prediction(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, WebError> {
    let id = path.into_inner();
    let assessment = state
        .get_assessment(&id)
        .ok_or_else(|| WebError(AdvisorError::NotFound(format!("Prediction {id} not found"))))?;
    Ok(HttpResponse::Ok().json(PredictResponse { id, assessment }))
}

// ---------------------------------------------------------------------------
// Recommendations, soil and challenges
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct RecommendBody {
    region: String,
    soil_type: Option<String>,
    season: Option<String>,
}

pub async fn recommend(
    state: web::Data<AppState>,
    body: web::Json<RecommendBody>,
) -> Result<HttpResponse, WebError> {
    let season = parse_season(body.season.as_deref())?;
    let soil_type = match body.soil_type.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default_soil_profile(&body.region).predominant_type.to_string(),
    };
    let recs = state.advisor()?.recommend(&body.region, &soil_type, season);
    Ok(HttpResponse::Ok().json(recs))
}

#[derive(Deserialize)]
pub struct SoilHealthBody {
    ph: f64,
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
}

pub async fn soil_health(body: web::Json<SoilHealthBody>) -> HttpResponse {
    HttpResponse::Ok().json(analyze_soil_health(
        body.ph,
        body.nitrogen,
        body.phosphorus,
        body.potassium,
    ))
}

#[derive(Deserialize)]
pub struct ChallengesQuery {
    crop: String,
    region: String,
    season: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct ChallengesResponse {
    crop: String,
    region: String,
    season: Season,
    challenges: Vec<String>,
}

pub async fn challenges(
    state: web::Data<AppState>,
    query: web::Query<ChallengesQuery>,
) -> Result<HttpResponse, WebError> {
    let season = parse_season(query.season.as_deref())?;
    let challenges = state.advisor()?.challenges(&query.crop, &query.region, season);
    Ok(HttpResponse::Ok().json(ChallengesResponse {
        crop: query.crop.clone(),
        region: query.region.clone(),
        season,
        challenges,
    }))
}

#[derive(Serialize, Deserialize)]
struct SoilProfileResponse {
    region: String,
    profile: SoilSample,
}

pub async fn soil_profile(path: web::Path<String>) -> HttpResponse {
    let region = path.into_inner();
    let profile = default_soil_profile(&region);
    HttpResponse::Ok().json(SoilProfileResponse { region, profile })
}

#[derive(Deserialize)]
pub struct SeasonQuery {
    month: Option<u32>,
}

#[derive(Serialize, Deserialize)]
struct SeasonResponse {
    month: u32,
    season: Season,
}

pub async fn season(query: web::Query<SeasonQuery>) -> Result<HttpResponse, WebError> {
    let month = match query.month {
        Some(m) if m > 11 => {
            return Err(WebError(AdvisorError::ValidationError(format!(
                "month must be 0-11, got {m}"
            ))))
        }
        Some(m) => m,
        None => chrono::Datelike::month0(&chrono::Local::now()),
    };
    Ok(HttpResponse::Ok().json(SeasonResponse {
        month,
        season: Season::from_month0(month),
    }))
}

// ---------------------------------------------------------------------------
// Batch upload
// ---------------------------------------------------------------------------

fn malformed_upload(e: actix_multipart::MultipartError) -> WebError {
    WebError(AdvisorError::ValidationError(format!("Malformed upload: {e}")))
}

pub async fn batch(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, WebError> {
    let mut field = match payload.next().await {
        Some(Ok(field)) => field,
        Some(Err(e)) => return Err(malformed_upload(e)),
        None => {
            return Ok(HttpResponse::BadRequest().json(ErrorBody {
                error: "Bad Request".to_string(),
                details: "No file uploaded".to_string(),
            }))
        }
    };

    let filename = field
        .content_disposition()
        .and_then(|cd| cd.get_filename().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown".to_string());

    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(malformed_upload)?;
        if bytes.len() + chunk.len() > MAX_BODY_BYTES {
            return Ok(HttpResponse::PayloadTooLarge().json(ErrorBody {
                error: "Payload Too Large".to_string(),
                details: format!("Upload exceeds {MAX_BODY_BYTES} bytes"),
            }));
        }
        bytes.extend_from_slice(&chunk);
    }

    let format = FileFormat::from_path(std::path::Path::new(&filename))?;
    let plans = io::read_plans_from_bytes(&bytes, format)?;
    tracing::info!(%filename, rows = plans.len(), "batch upload received");

    let results = state.advisor()?.predict_batch(&plans);
    Ok(HttpResponse::Ok().json(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;
    use actix_web::App;

    use crate::config::{AdvisorConfig, VariabilityConfig};
    use crate::models::BatchResult;

    fn deterministic_state() -> AppState {
        let mut config = AdvisorConfig::default();
        config.variability = VariabilityConfig::disabled();
        AppState::new(config)
    }

    fn make_app(
        state: AppState,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .configure(super::super::routes)
    }

    fn rice_body() -> serde_json::Value {
        serde_json::json!({
            "crop": "rice",
            "variety": "IR36",
            "area_hectares": 1.0,
            "soil_type": "alluvial",
            "region": "Punjab",
            "ph": 6.5,
            "nitrogen": 340.0,
            "phosphorus": 18.0,
            "potassium": 210.0,
            "season": "kharif"
        })
    }

    // -----------------------------------------------------------------------
    // Prediction endpoints
    // -----------------------------------------------------------------------

    #[actix_web::test]
    async fn test_predict_and_fetch() {
        let app = actix_test::init_service(make_app(deterministic_state())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/predict")
            .set_json(rice_body())
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        let expected = body["assessment"]["estimate"]["expected_yield"].as_f64().unwrap();
        assert!((expected - 83.6044).abs() < 1e-3);
        assert_eq!(body["assessment"]["estimate"]["confidence_percent"], 94);
        assert_eq!(
            body["assessment"]["challenges"][1],
            "Monitor for stem borers"
        );

        let id = body["id"].as_str().unwrap();
        let req = actix_test::TestRequest::get()
            .uri(&format!("/api/predictions/{id}"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let again: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(again["assessment"], body["assessment"]);
    }

    #[actix_web::test]
    async fn test_predict_invalid_area() {
        let app = actix_test::init_service(make_app(deterministic_state())).await;
        let mut body = rice_body();
        body["area_hectares"] = serde_json::json!(0.0);
        let req = actix_test::TestRequest::post()
            .uri("/api/predict")
            .set_json(body)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let err: ErrorBody = actix_test::read_body_json(resp).await;
        assert_eq!(err.error, "Bad Request");
        assert!(err.details.contains("Invalid area"));
    }

    #[actix_web::test]
    async fn test_predict_unknown_season() {
        let app = actix_test::init_service(make_app(deterministic_state())).await;
        let mut body = rice_body();
        body["season"] = serde_json::json!("monsoon");
        let req = actix_test::TestRequest::post()
            .uri("/api/predict")
            .set_json(body)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_prediction_not_found() {
        let app = actix_test::init_service(make_app(deterministic_state())).await;
        let req = actix_test::TestRequest::get()
            .uri(&format!("/api/predictions/{}", Uuid::new_v4()))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    #[actix_web::test]
    async fn test_recommend() {
        let app = actix_test::init_service(make_app(deterministic_state())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/recommend")
            .set_json(serde_json::json!({
                "region": "Maharashtra",
                "soil_type": "black",
                "season": "kharif"
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        let primary = body["primary"].as_array().unwrap();
        assert_eq!(primary.len(), 3);
        assert_eq!(primary[0]["crop"], "cotton");
        assert!(body["alternatives"].as_array().is_some());
    }

    #[actix_web::test]
    async fn test_soil_health() {
        let app = actix_test::init_service(make_app(deterministic_state())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/soil-health")
            .set_json(serde_json::json!({
                "ph": 5.0, "nitrogen": 200.0, "phosphorus": 10.0, "potassium": 100.0
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["ph"]["status"], "Acidic");
        assert_eq!(body["potassium"]["status"], "Low");
    }

    #[actix_web::test]
    async fn test_challenges_query() {
        let app = actix_test::init_service(make_app(deterministic_state())).await;
        let req = actix_test::TestRequest::get()
            .uri("/api/challenges?crop=wheat&region=Kerala&season=rabi")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: ChallengesResponse = actix_test::read_body_json(resp).await;
        assert_eq!(body.season, Season::Rabi);
        assert_eq!(body.challenges, vec!["Ensure timely sowing", "Monitor for rust diseases"]);
    }

    #[actix_web::test]
    async fn test_soil_profile_fallback() {
        let app = actix_test::init_service(make_app(deterministic_state())).await;
        let req = actix_test::TestRequest::get()
            .uri("/api/soil/Atlantis")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: SoilProfileResponse = actix_test::read_body_json(resp).await;
        assert_eq!(body.region, "Atlantis");
        assert_eq!(body.profile, default_soil_profile("West Bengal"));
    }

    #[actix_web::test]
    async fn test_season_by_month() {
        let app = actix_test::init_service(make_app(deterministic_state())).await;
        let req = actix_test::TestRequest::get()
            .uri("/api/season?month=6")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        let body: SeasonResponse = actix_test::read_body_json(resp).await;
        assert_eq!(body.season, Season::Kharif);

        let req = actix_test::TestRequest::get()
            .uri("/api/season?month=12")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    // -----------------------------------------------------------------------
    // Batch upload
    // -----------------------------------------------------------------------

    fn multipart_request(filename: &str, content: &str) -> actix_test::TestRequest {
        let boundary = "----cropadvisorboundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {content}\r\n\
             --{boundary}--\r\n"
        );
        actix_test::TestRequest::post()
            .uri("/api/batch")
            .insert_header((
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            ))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn test_batch_csv_upload() {
        let app = actix_test::init_service(make_app(deterministic_state())).await;
        let csv = "field_id,crop,variety,area_hectares,soil_type,region,ph,nitrogen,phosphorus,potassium\n\
                   A,rice,IR36,1.0,alluvial,Punjab,6.5,340,18,210\n\
                   B,rice,IR36,0,alluvial,Punjab,6.5,340,18,210\n";
        let resp = actix_test::call_service(&app, multipart_request("plans.csv", csv).to_request()).await;
        assert_eq!(resp.status(), 200);
        let results: Vec<BatchResult> = actix_test::read_body_json(resp).await;
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(!results[1].is_ok());
    }

    #[actix_web::test]
    async fn test_batch_unsupported_format() {
        let app = actix_test::init_service(make_app(deterministic_state())).await;
        let resp =
            actix_test::call_service(&app, multipart_request("plans.xlsx", "x").to_request()).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_batch_truncated_upload_rejected() {
        let app = actix_test::init_service(make_app(deterministic_state())).await;
        let boundary = "----cropadvisorboundary";
        // closing boundary never arrives
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"plans.csv\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             field_id,crop,variety,area_hectares,region\n\
             A,rice,IR36,1.0,Punjab\n"
        );
        let req = actix_test::TestRequest::post()
            .uri("/api/batch")
            .insert_header((
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            ))
            .set_payload(body)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: ErrorBody = actix_test::read_body_json(resp).await;
        assert!(body.details.contains("Malformed upload"), "{}", body.details);
    }

    #[actix_web::test]
    async fn test_batch_upload_size_capped() {
        let app = actix_test::init_service(make_app(deterministic_state())).await;
        let content = "x".repeat(MAX_BODY_BYTES + 1);
        let resp =
            actix_test::call_service(&app, multipart_request("plans.csv", &content).to_request())
                .await;
        assert_eq!(resp.status(), 413);
    }
}
