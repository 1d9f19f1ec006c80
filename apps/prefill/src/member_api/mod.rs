/// Member API: the one submission client for the prefill form.
///
/// All backend calls for the member bundle go through [`MemberApi`]; endpoint paths come
/// from configuration so the payload contract lives in exactly one place.
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{info, warn};

use crate::form::file::UploadFile;
use crate::http_client::{ApiError, ApiErrorKind, Credentials, HttpClient, Method, RequestOptions};

pub mod payload;

pub use payload::{MemberInitResponse, SubmissionPayload};

pub const DEFAULT_INIT_PATH: &str = "/api/v1/member/init";
pub const DEFAULT_PROFILE_IMAGE_PATH: &str = "/api/v1/members/profile-image";

/// Multipart part name the backend reads the photo from.
const IMAGE_PART: &str = "image";

#[async_trait]
pub trait MemberApi: Send + Sync {
    /// Creates the member together with disability, veteran and military records.
    async fn save_all(&self, payload: &SubmissionPayload) -> Result<MemberInitResponse, ApiError>;

    async fn upload_profile_image(&self, file: &UploadFile) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct HttpMemberApi {
    http: HttpClient,
    init_path: String,
    profile_image_path: String,
    bearer_token: Option<String>,
}

impl HttpMemberApi {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            init_path: DEFAULT_INIT_PATH.to_string(),
            profile_image_path: DEFAULT_PROFILE_IMAGE_PATH.to_string(),
            bearer_token: None,
        }
    }

    pub fn with_paths(mut self, init_path: impl Into<String>, profile_image_path: impl Into<String>) -> Self {
        self.init_path = init_path.into();
        self.profile_image_path = profile_image_path.into();
        self
    }

    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token;
        self
    }

    /// Session cookies always go along; the bearer token only when one was configured.
    fn options(&self) -> RequestOptions {
        RequestOptions::default()
            .credentials(Credentials::Include)
            .bearer_token(self.bearer_token.clone())
    }
}

#[async_trait]
impl MemberApi for HttpMemberApi {
    async fn save_all(&self, payload: &SubmissionPayload) -> Result<MemberInitResponse, ApiError> {
        info!("Submitting member bundle to {}", self.init_path);
        let response: MemberInitResponse = self
            .http
            .request_json(Method::Post, &self.init_path, self.options().json(payload)?)
            .await?;
        info!("Member bundle saved (id: {})", response.id);
        Ok(response)
    }

    async fn upload_profile_image(&self, file: &UploadFile) -> Result<(), ApiError> {
        let mut part = Part::bytes(file.bytes.to_vec()).file_name(file.name.clone());
        if !file.mime.is_empty() {
            part = part.mime_str(&file.mime).map_err(|e| {
                ApiError::new(
                    ApiErrorKind::Serialization,
                    0,
                    format!("Invalid image type '{}': {e}", file.mime),
                )
            })?;
        }
        let form = Form::new().part(IMAGE_PART, part);

        info!("Uploading profile image {} ({} bytes)", file.name, file.size());
        self.http
            .request(
                Method::Patch,
                &self.profile_image_path,
                self.options().multipart(form),
            )
            .await
            .map(|_| ())
            .inspect_err(|e| warn!("Profile image upload failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Multipart, State};
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::routing::{patch, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;

    #[derive(Clone, Default)]
    struct Seen {
        bodies: Arc<Mutex<Vec<Value>>>,
        auth: Arc<Mutex<Vec<String>>>,
        parts: Arc<Mutex<Vec<(String, String, usize)>>>,
    }

    async fn init(State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        seen.auth.lock().unwrap().push(auth);
        seen.bodies.lock().unwrap().push(body);
        Json(json!({ "id": 42, "memberId": 7, "message": "등록되었습니다." }))
    }

    async fn rejected() -> (StatusCode, Json<Value>) {
        (
            StatusCode::CONFLICT,
            Json(json!({ "error": { "code": "DUPLICATE", "message": "이미 등록된 회원입니다." } })),
        )
    }

    async fn image(State(seen): State<Seen>, mut multipart: Multipart) -> StatusCode {
        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let len = field.bytes().await.map(|b| b.len()).unwrap_or_default();
            seen.parts.lock().unwrap().push((name, content_type, len));
        }
        StatusCode::NO_CONTENT
    }

    async fn spawn(seen: Seen) -> String {
        let app = Router::new()
            .route("/api/v1/member/init", post(init))
            .route("/rejected", post(rejected))
            .route("/api/v1/members/profile-image", patch(image))
            .with_state(seen);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_save_all_posts_payload_and_decodes_response() {
        let seen = Seen::default();
        let base = spawn(seen.clone()).await;
        let api = HttpMemberApi::new(HttpClient::new(base).unwrap())
            .with_bearer_token(Some("tok".to_string()));

        let mut payload = SubmissionPayload::default();
        payload.member.korean_name = "홍길동".to_string();
        let response = api.save_all(&payload).await.unwrap();

        assert_eq!(response.id, 42);
        assert_eq!(response.member_id, Some(7));
        assert_eq!(response.message.as_deref(), Some("등록되었습니다."));

        let bodies = seen.bodies.lock().unwrap();
        assert_eq!(bodies[0]["member"]["koreanName"], "홍길동");
        assert_eq!(bodies[0]["veteran"]["veteranRatio"], 0);
        assert_eq!(seen.auth.lock().unwrap()[0], "Bearer tok");
    }

    #[tokio::test]
    async fn test_save_all_surfaces_nested_error() {
        let base = spawn(Seen::default()).await;
        let api = HttpMemberApi::new(HttpClient::new(base).unwrap())
            .with_paths("/rejected", DEFAULT_PROFILE_IMAGE_PATH);

        let err = api.save_all(&SubmissionPayload::default()).await.unwrap_err();
        assert_eq!(err.status, 409);
        assert_eq!(err.code.as_deref(), Some("DUPLICATE"));
        assert_eq!(err.message, "이미 등록된 회원입니다.");
    }

    #[tokio::test]
    async fn test_upload_profile_image_sends_image_part() {
        let seen = Seen::default();
        let base = spawn(seen.clone()).await;
        let api = HttpMemberApi::new(HttpClient::new(base).unwrap());

        let file = UploadFile::new("me.png", "image/png", vec![1u8, 2, 3, 4]);
        api.upload_profile_image(&file).await.unwrap();

        let parts = seen.parts.lock().unwrap();
        assert_eq!(
            parts.as_slice(),
            &[("image".to_string(), "image/png".to_string(), 4)]
        );
    }
}
