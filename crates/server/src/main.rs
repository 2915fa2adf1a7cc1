// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use lawn_bid_api::{
    AcceptBidRequest, AcceptBidResponse, ActorIdentity, ApiError, ApiResult, CloseJobRequest,
    CloseJobResponse, CompanyReviewsResponse, ConfirmCompletionRequest, ConfirmCompletionResponse,
    CreatePostingRequest, CreatePostingResponse, ListBidsForUserRequest, ListBidsResponse,
    ListOpenPostingsRequest, ListOpenPostingsResponse, ListPostingsWithBidsRequest,
    ListPostingsWithBidsResponse, PostalGeocoder, PostingDetailResponse, RegisterPartyRequest,
    RegisterPartyResponse, StaticGeocoder, SubmitBidRequest, SubmitBidResponse,
    SubmitReviewRequest, SubmitReviewResponse, TimelineResponse, accept_bid, close_completed_job,
    confirm_completion, create_posting, get_event_timeline, get_posting, list_bids_for_user,
    list_company_reviews, list_open_postings, list_postings_with_bids, register_party, submit_bid,
    submit_review,
};
use lawn_bid_events::{Cause, EventSink};
use lawn_bid_persistence::Persistence;

use live::{LiveEvent, LiveEventBroadcaster, live_events_handler};

/// LawnBid Server - HTTP server for the LawnBid marketplace
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex for safe concurrent
/// access; the event sink and geocoder are the injected collaborators
/// wired by this composition root.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for the posting lifecycle.
    persistence: Arc<Mutex<Persistence>>,
    /// The live event broadcaster backing the WebSocket stream.
    broadcaster: Arc<LiveEventBroadcaster>,
    /// The event hook collaborator; transitions are published here after
    /// they commit.
    event_sink: Arc<dyn EventSink>,
    /// The geocoding collaborator for radius filtering.
    geocoder: Arc<dyn PostalGeocoder + Send + Sync>,
}

/// Actor and cause fields carried by every state-changing request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorFields {
    /// The acting party's canonical ID.
    actor_id: i64,
    /// The acting party's kind: `"homeowner"` or `"companyowner"`.
    actor_kind: String,
    /// The cause ID for this action (e.g., client request ID).
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

impl ActorFields {
    /// Parses the actor identity from the request fields.
    fn actor(&self) -> Result<ActorIdentity, HttpError> {
        match self.actor_kind.as_str() {
            "homeowner" => Ok(ActorIdentity::Homeowner { id: self.actor_id }),
            "companyowner" => Ok(ActorIdentity::CompanyOwner { id: self.actor_id }),
            other => Err(HttpError {
                status: StatusCode::BAD_REQUEST,
                message: format!(
                    "Invalid actor kind: '{other}'. Must be 'homeowner' or 'companyowner'"
                ),
            }),
        }
    }

    /// Builds the cause for this action.
    fn cause(&self) -> Cause {
        Cause::new(self.cause_id.clone(), self.cause_description.clone())
    }
}

/// API request for registering a party.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterPartyApiRequest {
    /// The party kind: `"homeowner"` or `"companyowner"`.
    kind: String,
    /// The display name.
    name: String,
    /// The party's postal code.
    postal_code: String,
}

/// API request for creating a posting.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreatePostingApiRequest {
    /// Actor and cause fields.
    #[serde(flatten)]
    actor: ActorFields,
    /// A short title for the job.
    title: String,
    /// A free-text description of the work.
    description: String,
    /// The job site's postal code.
    postal_code: String,
    /// Ordered image URLs attached to the posting.
    #[serde(default)]
    images: Vec<String>,
    /// The estimated start date (ISO 8601).
    estimated_start_date: String,
}

/// API request for submitting a bid.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SubmitBidApiRequest {
    /// Actor and cause fields.
    #[serde(flatten)]
    actor: ActorFields,
    /// The posting to bid on.
    posting_id: i64,
    /// The proposed price in cents.
    amount_cents: i64,
    /// A free-text description of the proposal.
    description: String,
    /// The proposed start date (ISO 8601).
    proposed_date: String,
}

/// API request for accept, confirm, and close operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LifecycleActionApiRequest {
    /// Actor and cause fields.
    #[serde(flatten)]
    actor: ActorFields,
    /// The winning bid (only for close).
    #[serde(skip_serializing_if = "Option::is_none")]
    winning_bid_id: Option<i64>,
}

/// API request for submitting a review.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SubmitReviewApiRequest {
    /// Actor and cause fields.
    #[serde(flatten)]
    actor: ActorFields,
    /// The completed posting the review is about.
    posting_id: i64,
    /// The rating, 1–5.
    rating: i64,
    /// An optional short title.
    title: Option<String>,
    /// Optional free-text review body.
    body: Option<String>,
}

/// Query parameters for the open-postings listing.
#[derive(Debug, Deserialize)]
struct ListOpenPostingsQuery {
    /// The browsing company owner.
    bidder_id: i64,
    /// Optional search radius in kilometers.
    radius_km: Option<f64>,
    /// Optional search center latitude in degrees.
    center_latitude_deg: Option<f64>,
    /// Optional search center longitude in degrees.
    center_longitude_deg: Option<f64>,
}

/// Query parameters for a company owner's bid listing.
#[derive(Debug, Deserialize)]
struct ListBidsQuery {
    /// The company owner whose bids to list.
    bidder_id: i64,
    /// Comma-separated bid statuses to include.
    statuses: String,
}

/// Query parameters for a homeowner's postings listing.
#[derive(Debug, Deserialize)]
struct ListPostingsQuery {
    /// The homeowner whose postings to list.
    homeowner_id: i64,
    /// Comma-separated posting statuses to include.
    statuses: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidState { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            // Benign contention: clients should refresh and retry rather
            // than show an error dialog.
            ApiError::Duplicate { .. } | ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Splits a comma-separated status list into its elements.
fn split_statuses(statuses: &str) -> Vec<String> {
    statuses
        .split(',')
        .map(str::trim)
        .filter(|status| !status.is_empty())
        .map(String::from)
        .collect()
}

/// Handler for POST `/parties` endpoint.
async fn handle_register_party(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterPartyApiRequest>,
) -> Result<Json<RegisterPartyResponse>, HttpError> {
    info!(kind = %req.kind, "Handling register_party request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterPartyResponse = register_party(
        &mut persistence,
        RegisterPartyRequest {
            kind: req.kind,
            name: req.name,
            postal_code: req.postal_code,
        },
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/postings` endpoint.
async fn handle_create_posting(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreatePostingApiRequest>,
) -> Result<Json<CreatePostingResponse>, HttpError> {
    info!(actor_id = req.actor.actor_id, "Handling create_posting request");

    let actor: ActorIdentity = req.actor.actor()?;
    let cause: Cause = req.actor.cause();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<CreatePostingResponse> = create_posting(
        &mut persistence,
        CreatePostingRequest {
            title: req.title,
            description: req.description,
            postal_code: req.postal_code,
            images: req.images,
            estimated_start_date: req.estimated_start_date,
        },
        &actor,
        cause,
    )?;
    drop(persistence);

    app_state.event_sink.publish(&result.event);

    Ok(Json(result.response))
}

/// Handler for POST `/bids` endpoint.
async fn handle_submit_bid(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SubmitBidApiRequest>,
) -> Result<Json<SubmitBidResponse>, HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        posting_id = req.posting_id,
        "Handling submit_bid request"
    );

    let actor: ActorIdentity = req.actor.actor()?;
    let cause: Cause = req.actor.cause();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<SubmitBidResponse> = submit_bid(
        &mut persistence,
        SubmitBidRequest {
            posting_id: req.posting_id,
            amount_cents: req.amount_cents,
            description: req.description,
            proposed_date: req.proposed_date,
        },
        &actor,
        cause,
    )?;
    drop(persistence);

    app_state.event_sink.publish(&result.event);

    Ok(Json(result.response))
}

/// Handler for POST `/bids/{bid_id}/accept` endpoint.
///
/// On success, publishes the acceptance and fans out the per-bidder
/// rejection notification for every sibling the acceptance turned away.
async fn handle_accept_bid(
    AxumState(app_state): AxumState<AppState>,
    Path(bid_id): Path<i64>,
    Json(req): Json<LifecycleActionApiRequest>,
) -> Result<Json<AcceptBidResponse>, HttpError> {
    info!(actor_id = req.actor.actor_id, bid_id, "Handling accept_bid request");

    let actor: ActorIdentity = req.actor.actor()?;
    let cause: Cause = req.actor.cause();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<AcceptBidResponse> =
        accept_bid(&mut persistence, AcceptBidRequest { bid_id }, &actor, cause)?;
    drop(persistence);

    app_state.event_sink.publish(&result.event);
    if !result.response.rejected_bid_ids.is_empty() {
        app_state.broadcaster.broadcast(&LiveEvent::BidsRejected {
            posting_id: result.response.posting_id,
            bid_ids: result.response.rejected_bid_ids.clone(),
        });
    }

    Ok(Json(result.response))
}

/// Handler for POST `/postings/{posting_id}/confirm` endpoint.
async fn handle_confirm_completion(
    AxumState(app_state): AxumState<AppState>,
    Path(posting_id): Path<i64>,
    Json(req): Json<LifecycleActionApiRequest>,
) -> Result<Json<ConfirmCompletionResponse>, HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        posting_id, "Handling confirm_completion request"
    );

    let actor: ActorIdentity = req.actor.actor()?;
    let cause: Cause = req.actor.cause();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ConfirmCompletionResponse> = confirm_completion(
        &mut persistence,
        ConfirmCompletionRequest { posting_id },
        &actor,
        cause,
    )?;
    drop(persistence);

    app_state.event_sink.publish(&result.event);

    Ok(Json(result.response))
}

/// Handler for POST `/postings/{posting_id}/close` endpoint.
async fn handle_close_job(
    AxumState(app_state): AxumState<AppState>,
    Path(posting_id): Path<i64>,
    Json(req): Json<LifecycleActionApiRequest>,
) -> Result<Json<CloseJobResponse>, HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        posting_id, "Handling close_job request"
    );

    let winning_bid_id: i64 = req.winning_bid_id.ok_or_else(|| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: String::from("winning_bid_id is required to close a job"),
    })?;
    let actor: ActorIdentity = req.actor.actor()?;
    let cause: Cause = req.actor.cause();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<CloseJobResponse> = close_completed_job(
        &mut persistence,
        CloseJobRequest {
            posting_id,
            winning_bid_id,
        },
        &actor,
        cause,
    )?;
    drop(persistence);

    app_state.event_sink.publish(&result.event);

    Ok(Json(result.response))
}

/// Handler for POST `/reviews` endpoint.
async fn handle_submit_review(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SubmitReviewApiRequest>,
) -> Result<Json<SubmitReviewResponse>, HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        posting_id = req.posting_id,
        "Handling submit_review request"
    );

    let actor: ActorIdentity = req.actor.actor()?;
    let cause: Cause = req.actor.cause();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<SubmitReviewResponse> = submit_review(
        &mut persistence,
        SubmitReviewRequest {
            posting_id: req.posting_id,
            rating: req.rating,
            title: req.title,
            body: req.body,
        },
        &actor,
        cause,
    )?;
    drop(persistence);

    app_state.event_sink.publish(&result.event);

    Ok(Json(result.response))
}

/// Handler for GET `/postings/{posting_id}` endpoint.
async fn handle_get_posting(
    AxumState(app_state): AxumState<AppState>,
    Path(posting_id): Path<i64>,
) -> Result<Json<PostingDetailResponse>, HttpError> {
    info!(posting_id, "Handling get_posting request");

    let mut persistence = app_state.persistence.lock().await;
    let response: PostingDetailResponse = get_posting(&mut persistence, posting_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/postings/open` endpoint.
async fn handle_list_open_postings(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListOpenPostingsQuery>,
) -> Result<Json<ListOpenPostingsResponse>, HttpError> {
    info!(bidder_id = query.bidder_id, "Handling list_open_postings request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListOpenPostingsResponse = list_open_postings(
        &mut persistence,
        app_state.geocoder.as_ref(),
        ListOpenPostingsRequest {
            bidder_id: query.bidder_id,
            radius_km: query.radius_km,
            center_latitude_deg: query.center_latitude_deg,
            center_longitude_deg: query.center_longitude_deg,
        },
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/bids` endpoint.
async fn handle_list_bids(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListBidsQuery>,
) -> Result<Json<ListBidsResponse>, HttpError> {
    info!(bidder_id = query.bidder_id, "Handling list_bids request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListBidsResponse = list_bids_for_user(
        &mut persistence,
        ListBidsForUserRequest {
            bidder_id: query.bidder_id,
            statuses: split_statuses(&query.statuses),
        },
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/postings/mine` endpoint.
async fn handle_list_postings_with_bids(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListPostingsQuery>,
) -> Result<Json<ListPostingsWithBidsResponse>, HttpError> {
    info!(
        homeowner_id = query.homeowner_id,
        "Handling list_postings_with_bids request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ListPostingsWithBidsResponse = list_postings_with_bids(
        &mut persistence,
        ListPostingsWithBidsRequest {
            homeowner_id: query.homeowner_id,
            statuses: split_statuses(&query.statuses),
        },
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/companies/{company_owner_id}/reviews` endpoint.
async fn handle_company_reviews(
    AxumState(app_state): AxumState<AppState>,
    Path(company_owner_id): Path<i64>,
) -> Result<Json<CompanyReviewsResponse>, HttpError> {
    info!(company_owner_id, "Handling company_reviews request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CompanyReviewsResponse = list_company_reviews(&mut persistence, company_owner_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/postings/{posting_id}/timeline` endpoint.
async fn handle_get_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(posting_id): Path<i64>,
) -> Result<Json<TimelineResponse>, HttpError> {
    info!(posting_id, "Handling get_timeline request");

    let mut persistence = app_state.persistence.lock().await;
    let response: TimelineResponse = get_event_timeline(&mut persistence, posting_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    let live_router: Router = Router::new()
        .route("/live", get(live_events_handler))
        .with_state(Arc::clone(&app_state.broadcaster));

    Router::new()
        .route("/parties", post(handle_register_party))
        .route("/postings", post(handle_create_posting))
        .route("/postings/open", get(handle_list_open_postings))
        .route("/postings/mine", get(handle_list_postings_with_bids))
        .route("/postings/{posting_id}", get(handle_get_posting))
        .route("/postings/{posting_id}/confirm", post(handle_confirm_completion))
        .route("/postings/{posting_id}/close", post(handle_close_job))
        .route("/postings/{posting_id}/timeline", get(handle_get_timeline))
        .route("/bids", post(handle_submit_bid))
        .route("/bids", get(handle_list_bids))
        .route("/bids/{bid_id}/accept", post(handle_accept_bid))
        .route("/reviews", post(handle_submit_review))
        .route(
            "/companies/{company_owner_id}/reviews",
            get(handle_company_reviews),
        )
        .with_state(app_state)
        .merge(live_router)
}

/// Builds the application state, wiring the collaborators together.
fn build_app_state(persistence: Persistence) -> AppState {
    let broadcaster: Arc<LiveEventBroadcaster> = Arc::new(LiveEventBroadcaster::new());
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        event_sink: Arc::clone(&broadcaster) as Arc<dyn EventSink>,
        geocoder: Arc::new(StaticGeocoder::new()),
        broadcaster,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing LawnBid Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = build_app_state(persistence);

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode, header},
    };
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        build_app_state(persistence)
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    async fn register(app: &Router, kind: &str, name: &str) -> i64 {
        let response = app
            .clone()
            .oneshot(json_request(
                "/parties",
                serde_json::json!({
                    "kind": kind,
                    "name": name,
                    "postal_code": "M4B 1B3",
                }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), HttpStatusCode::OK);
        response_json(response).await["party_id"]
            .as_i64()
            .expect("party_id")
    }

    fn actor_fields(actor_id: i64, actor_kind: &str) -> serde_json::Value {
        serde_json::json!({
            "actor_id": actor_id,
            "actor_kind": actor_kind,
            "cause_id": "req-1",
            "cause_description": "test request",
        })
    }

    fn with_actor(mut base: serde_json::Value, actor: serde_json::Value) -> serde_json::Value {
        let map = base.as_object_mut().expect("object body");
        for (key, value) in actor.as_object().expect("actor object") {
            map.insert(key.clone(), value.clone());
        }
        base
    }

    async fn create_posting_http(app: &Router, homeowner_id: i64) -> i64 {
        let body = with_actor(
            serde_json::json!({
                "title": "Backyard sod replacement",
                "description": "Remove old sod and lay fresh sod",
                "postal_code": "M4B 1B3",
                "images": ["https://img.example/yard-1.jpg"],
                "estimated_start_date": "2026-05-15",
            }),
            actor_fields(homeowner_id, "homeowner"),
        );

        let response = app
            .clone()
            .oneshot(json_request("/postings", body))
            .await
            .expect("response");
        assert_eq!(response.status(), HttpStatusCode::OK);
        response_json(response).await["posting_id"]
            .as_i64()
            .expect("posting_id")
    }

    async fn submit_bid_http(app: &Router, posting_id: i64, bidder_id: i64) -> i64 {
        let body = with_actor(
            serde_json::json!({
                "posting_id": posting_id,
                "amount_cents": 50_000,
                "description": "Two day job",
                "proposed_date": "2026-05-20",
            }),
            actor_fields(bidder_id, "companyowner"),
        );

        let response = app
            .clone()
            .oneshot(json_request("/bids", body))
            .await
            .expect("response");
        assert_eq!(response.status(), HttpStatusCode::OK);
        response_json(response).await["bid_id"]
            .as_i64()
            .expect("bid_id")
    }

    #[tokio::test]
    async fn test_register_party_and_create_posting() {
        let app: Router = build_router(create_test_app_state());

        let homeowner: i64 = register(&app, "homeowner", "Dana").await;
        let posting_id: i64 = create_posting_http(&app, homeowner).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/postings/{posting_id}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), HttpStatusCode::OK);

        let detail = response_json(response).await;
        assert_eq!(detail["posting"]["status"], "open");
        assert_eq!(detail["ready_to_close"], false);
    }

    #[tokio::test]
    async fn test_accept_flow_and_error_mapping() {
        let app: Router = build_router(create_test_app_state());

        let homeowner: i64 = register(&app, "homeowner", "Dana").await;
        let company_one: i64 = register(&app, "companyowner", "Green Thumb").await;
        let company_two: i64 = register(&app, "companyowner", "Lawn Kings").await;

        let posting_id: i64 = create_posting_http(&app, homeowner).await;
        let bid_one: i64 = submit_bid_http(&app, posting_id, company_one).await;
        let bid_two: i64 = submit_bid_http(&app, posting_id, company_two).await;

        let accept = app
            .clone()
            .oneshot(json_request(
                &format!("/bids/{bid_one}/accept"),
                with_actor(serde_json::json!({}), actor_fields(homeowner, "homeowner")),
            ))
            .await
            .expect("response");
        assert_eq!(accept.status(), HttpStatusCode::OK);
        let accepted = response_json(accept).await;
        assert_eq!(accepted["rejected_bid_ids"], serde_json::json!([bid_two]));

        // Accepting the rejected sibling now violates lifecycle rules.
        let second = app
            .clone()
            .oneshot(json_request(
                &format!("/bids/{bid_two}/accept"),
                with_actor(serde_json::json!({}), actor_fields(homeowner, "homeowner")),
            ))
            .await
            .expect("response");
        assert_eq!(second.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missing_posting_maps_to_not_found() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/postings/999")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_open_listing_endpoint() {
        let app: Router = build_router(create_test_app_state());

        let homeowner: i64 = register(&app, "homeowner", "Dana").await;
        let company: i64 = register(&app, "companyowner", "Green Thumb").await;
        let posting_id: i64 = create_posting_http(&app, homeowner).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/postings/open?bidder_id={company}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), HttpStatusCode::OK);

        let listing = response_json(response).await;
        assert_eq!(listing["postings"][0]["posting_id"], posting_id);
    }
}
