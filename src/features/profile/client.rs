//! 账号服务边界客户端：设备码登录与档案查询。
//!
//! 每个方法只做一次上游调用，轮询由调用方驱动；
//! 档案查询失败直接放弃整个请求，不做中途降级。

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::http::client_timeout_30s;

use super::models::{DeviceCodeStart, EpicSession};

#[derive(Deserialize)]
struct ClientCredentials {
    access_token: String,
}

/// Epic 账号/游戏服务客户端。
#[derive(Debug, Clone)]
pub struct EpicClient {
    account_base: String,
    game_base: String,
    client_token: String,
}

impl EpicClient {
    pub fn new(
        account_base: impl Into<String>,
        game_base: impl Into<String>,
        client_token: impl Into<String>,
    ) -> Self {
        Self {
            account_base: account_base.into().trim_end_matches('/').to_string(),
            game_base: game_base.into().trim_end_matches('/').to_string(),
            client_token: client_token.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.epic.account_base_url.clone(),
            config.epic.game_base_url.clone(),
            config.epic.client_token.clone(),
        )
    }

    /// 客户端凭据令牌（发起设备码授权的前置步骤）。
    async fn client_credentials(&self) -> Result<String, AppError> {
        let url = format!("{}/account/api/oauth/token", self.account_base);
        let resp = client_timeout_30s()?
            .post(&url)
            .header("Authorization", format!("basic {}", self.client_token))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(AppError::Auth(format!(
                "客户端凭据获取失败 ({})",
                resp.status()
            )));
        }
        let creds: ClientCredentials = resp.json().await?;
        Ok(creds.access_token)
    }

    /// 发起设备码授权，返回验证地址与设备码。
    pub async fn start_device_auth(&self) -> Result<DeviceCodeStart, AppError> {
        let token = self.client_credentials().await?;
        let url = format!("{}/account/api/oauth/deviceAuthorization", self.account_base);
        let resp = client_timeout_30s()?
            .post(&url)
            .header("Authorization", format!("bearer {token}"))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(AppError::Auth(format!(
                "设备码授权发起失败 ({})",
                resp.status()
            )));
        }
        Ok(resp.json().await?)
    }

    /// 单次轮询设备码授权。未完成时返回 AuthPending，由调用方继续轮询。
    pub async fn poll_device_auth(&self, device_code: &str) -> Result<EpicSession, AppError> {
        let url = format!("{}/account/api/oauth/token", self.account_base);
        let resp = client_timeout_30s()?
            .post(&url)
            .header("Authorization", format!("basic {}", self.client_token))
            .form(&[("grant_type", "device_code"), ("device_code", device_code)])
            .send()
            .await?;
        if !resp.status().is_success() {
            debug!("设备码授权未完成 ({})", resp.status());
            return Err(AppError::AuthPending("等待用户完成授权".to_string()));
        }
        Ok(resp.json().await?)
    }

    /// QueryProfile：拉取指定档案（`athena` / `common_core`）。
    pub async fn query_profile(
        &self,
        account_id: &str,
        access_token: &str,
        profile_id: &str,
    ) -> Result<Value, AppError> {
        let url = format!(
            "{}/fortnite/api/game/v2/profile/{}/client/QueryProfile?profileId={}&rvn=-1",
            self.game_base, account_id, profile_id
        );
        let resp = client_timeout_30s()?
            .post(&url)
            .header("Authorization", format!("bearer {access_token}"))
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::Auth(format!("档案访问被拒绝 ({status})")));
        }
        if !status.is_success() {
            return Err(AppError::Network(format!(
                "档案查询失败 ({status}): {profile_id}"
            )));
        }
        Ok(resp.json().await?)
    }
}
