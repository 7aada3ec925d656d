use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use tracing::info;

use crate::analyzer::{uniqueness_score, wateriness_score};
use crate::data_models::{Language, SearchQuery};
use crate::knowledge::{self, KnowledgeBase};
use crate::research::{SerpResearch, serp_research};

use super::AppState;
use super::error::ApiError;
use super::models::{AnalyzeRequest, AnalyzeResponse, HealthResponse, KnowledgeRequest, SearchRequest};

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "server is running",
    })
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchRequest>, QueryRejection>,
) -> Result<Json<SerpResearch>, ApiError> {
    let started = Instant::now();
    let Query(params) = params.map_err(|e| ApiError::Validation(e.body_text()))?;

    let text = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::Validation("Missing required query parameter: q".to_string()))?;

    let language = Language::from_param(params.lang.as_deref());
    let mut query = SearchQuery::new(text, language);
    if let Some(country) = params.country.filter(|c| !c.trim().is_empty()) {
        query = query.with_country(country.trim());
    }
    if let Some(cr) = params.cr.filter(|c| !c.trim().is_empty()) {
        query = query.with_country_restrict(cr.trim());
    }
    if let Some(num) = params.num {
        query = query.with_result_count(saturate_u32(num));
    }
    if let Some(start) = params.start {
        query = query.with_start_index(saturate_u32(start));
    }

    let research = serp_research(&state.search, &query).await?;

    info!(
        query = %research.query,
        lang = %language,
        results = research.items.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "search served"
    );
    Ok(Json(research))
}

fn saturate_u32(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

pub async fn knowledge_handler(Query(params): Query<KnowledgeRequest>) -> Json<KnowledgeBase> {
    let language = Language::from_param(params.lang.as_deref());
    Json(knowledge::profile(language).knowledge_base())
}

pub async fn analyze_handler(
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    if request.text.trim().is_empty() {
        return Err(ApiError::Validation("text cannot be empty".to_string()));
    }

    let profile = knowledge::profile(Language::from_param(request.lang.as_deref()));
    Ok(Json(AnalyzeResponse {
        language: profile.code,
        wateriness: wateriness_score(&request.text, profile.stopwords()),
        uniqueness: uniqueness_score(&request.text, &request.references),
    }))
}
