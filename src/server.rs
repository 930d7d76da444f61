//! HTTP surface: `POST /api/quarrel` and `GET /health`

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use log::{debug, error, info};

use crate::error::Error;
use crate::request::{ErrorBody, QuarrelRequest, QuarrelResponse};

const MSG_MISSING_KEY: &str = "AI服务密钥未配置";
const MSG_INTERNAL: &str = "服务器内部错误";
const MSG_NO_VALID_REPLY: &str = "没有收到有效回复";
const MSG_BALANCE_DETAILS: &str = "当前使用的AI服务需要付费积分。";

/// Shared, read-only server state
pub struct AppState
{   pub config: crate::config::QuarrelConfig
  , pub client: crate::client::ProviderClient
}

impl AppState
{   pub fn new(
      config: crate::config::QuarrelConfig
    , transport: Arc<dyn crate::transport::Transport>
    ) -> Self
    {   let client = crate::client::ProviderClient::new(
          transport,
          config.site.clone()
        );
        AppState { config, client }
    }
}

/// Build the router over `state`
pub fn router(state: Arc<AppState>) -> Router
{   Router::new()
      .route("/api/quarrel", post(quarrel))
      .route("/health", get(health_check))
      .with_state(state)
}

/// Bind `config.bind_addr` and serve until the process exits
pub async fn serve(config: crate::config::QuarrelConfig)
  -> Result<(), Error>
{   let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(
      config,
      Arc::new(crate::transport::ReqwestTransport::new())
    ));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
      .await
      .map_err(|e| {
        error!("Failed to bind {}: {}", bind_addr, e);
        Error::Other(format!("bind {}: {}", bind_addr, e))
      })?;
    info!("quarrel listening on {}", bind_addr);

    axum::serve(listener, router(state))
      .await
      .map_err(|e| {
        error!("Server error: {}", e);
        Error::Other(e.to_string())
      })
}

/// Health check endpoint
pub async fn health_check(
  State(state): State<Arc<AppState>>
) -> Json<HashMap<String, String>>
{   let mut response = HashMap::new();
    response.insert("status".to_string(), "healthy".to_string());
    response.insert("service".to_string(), "quarrel".to_string());
    response.insert("provider".to_string(), state.config.provider.clone());
    Json(response)
}

/// Generate replies for a quoted remark
pub async fn quarrel(
  State(state): State<Arc<AppState>>
, body: Bytes
) -> Result<Json<QuarrelResponse>, Error>
{   let api_key = state.config.api_key.as_deref()
      .ok_or_else(|| {
        error!("AI_API_KEY not configured");
        Error::MissingApiKey
      })?;

    let raw: serde_json::Value = serde_json::from_slice(&body)
      .map_err(|e| {
        error!("Unreadable request body: {}", e);
        Error::ParseError(e.to_string())
      })?;

    let request = QuarrelRequest::from_value(&raw).map_err(|e| {
      debug!("Rejected request: {}", e);
      e
    })?;
    let band = request.intensity.band();
    info!(
      "Quarrel request: intensity {} {} {}",
      request.intensity, band.emoji(), band.label()
    );

    let prompt = crate::prompt::build_prompt(
      &request.input,
      request.intensity
    );
    let replies = state.client
      .dispatch(&state.config.provider, api_key, &prompt)
      .await?;

    Ok(Json(QuarrelResponse
    {   replies
      , timestamp: chrono::Utc::now().timestamp_millis()
      , input: request.input
      , intensity: request.intensity
      , provider: state.config.provider.clone()
    }))
}

impl Error
{   /// Status code and client-facing body for this error
    pub fn to_http(&self) -> (StatusCode, ErrorBody)
    {   match self
        {   Error::Validation(msg) => {
              (StatusCode::BAD_REQUEST, ErrorBody::new(msg.as_str()))
            }
          , Error::UnsupportedProvider(id) => {
              ( StatusCode::BAD_REQUEST
              , ErrorBody::new(format!("不支持的AI服务提供商: {}", id))
              )
            }
          , Error::MissingApiKey => {
              (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(MSG_MISSING_KEY))
            }
          , Error::InvalidCredential(provider) => {
              ( StatusCode::UNAUTHORIZED
              , ErrorBody::new(format!(
                  "🔑 {} API密钥无效，请检查密钥格式是否正确（应为 {}）",
                  provider, provider.key_format_hint()
                ))
                .with_details(format!(
                  "当前服务: {}，密钥格式: {}",
                  provider, provider.key_format_hint()
                ))
              )
            }
          , Error::InsufficientBalance(provider) => {
              ( StatusCode::PAYMENT_REQUIRED
              , ErrorBody::new(format!(
                  "💳 账户积分不足，请前往 {} 充值",
                  provider.credit_url()
                ))
                .with_details(MSG_BALANCE_DETAILS)
              )
            }
          , Error::Upstream(status) => {
              ( StatusCode::from_u16(*status)
                  .unwrap_or(StatusCode::BAD_GATEWAY)
              , ErrorBody::new(format!("API请求失败: {}", status))
              )
            }
          , Error::NoValidReply => {
              (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(MSG_NO_VALID_REPLY))
            }
          , Error::HttpError(_)
          | Error::ParseError(_)
          | Error::Other(_) => {
              (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(MSG_INTERNAL))
            }
        }
    }
}

impl IntoResponse for Error
{   fn into_response(self) -> Response
    {   let (status, body) = self.to_http();
        (status, Json(body)).into_response()
    }
}
