use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use async_compression::tokio::bufread::BrotliDecoder;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use reqwest::header::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use tokio::io::AsyncReadExt;
use tokio_util::io::StreamReader;

use crate::domains::items::models::{Item, UpstreamItem};
use crate::domains::items::services::{merge_items, ItemFetcher, ItemIndex};
use crate::shared::errors::ItemError;

/// CS2 app id
const APP_ID: &str = "730";
const CURRENCY: &str = "USD";

// Skinport API 클라이언트
// 역할: tradable / non-tradable 두 목록을 동시에 받아 하나의 카탈로그로 합침
// Skinport API client
#[derive(Clone)]
pub struct SkinportClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SkinportClient {
    // 클라이언트 생성
    // Create new Skinport client instance
    // timeout: 요청 1건당 전체 제한 시간
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    // 두 목록 동시 조회 후 병합
    // Fetch both lists concurrently and merge them
    // 먼저 실패한 목록의 에러를 목록 이름과 함께 반환 (나머지 요청은 drop으로 취소)
    pub async fn fetch_catalogue(&self) -> Result<Vec<Item>, ItemError> {
        let (tradable, non_tradable) = tokio::try_join!(
            self.fetch_list("tradable", true),
            self.fetch_list("non-tradable", false),
        )?;

        let items = merge_items(tradable, non_tradable);
        tracing::debug!(count = items.len(), "skinport catalogue merged");

        Ok(items)
    }

    async fn fetch_list(&self, list: &'static str, tradable: bool) -> Result<ItemIndex, ItemError> {
        self.fetch_rows(tradable)
            .await
            .map_err(|err| ItemError::for_list(list, err))
    }

    // 목록 1개 조회
    // GET {base}/items?app_id=730&currency=USD&tradable={true|false}
    async fn fetch_rows(&self, tradable: bool) -> Result<ItemIndex, ItemError> {
        let url = format!("{}/items", self.base_url);
        let tradable = if tradable { "true" } else { "false" };

        tracing::debug!(%url, tradable, "requesting skinport items");

        // HTTP GET 요청 (Brotli 응답 요청)
        let response = self
            .http_client
            .get(&url)
            .query(&[("app_id", APP_ID), ("currency", CURRENCY), ("tradable", tradable)])
            .header(ACCEPT_ENCODING, "br")
            .header(USER_AGENT, "market-api/1.0")
            .send()
            .await
            .map_err(|e| ItemError::Request(e.to_string()))?;

        // HTTP 상태 코드 확인 (200만 허용)
        if response.status() != StatusCode::OK {
            return Err(ItemError::UpstreamStatus(response.status().as_u16()));
        }

        let is_brotli = response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().eq_ignore_ascii_case("br"))
            .unwrap_or(false);

        if !is_brotli {
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");
            if !content_type.is_empty() && !content_type.contains("json") {
                tracing::warn!(content_type, "skinport responded with non-JSON content type");
            }
        }

        let body = read_body(response, is_brotli).await?;

        // JSON 파싱: 응답은 배열, market_hash_name 기준으로 인덱싱
        let rows: Vec<UpstreamItem> =
            serde_json::from_slice(&body).map_err(|e| ItemError::Decode(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| (row.market_hash_name.clone(), row))
            .collect())
    }
}

// 응답 본문 읽기 (br이면 스트리밍 압축 해제)
async fn read_body(response: reqwest::Response, is_brotli: bool) -> Result<Vec<u8>, ItemError> {
    if !is_brotli {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ItemError::Decode(e.to_string()))?;
        return Ok(bytes.to_vec());
    }

    let stream = response
        .bytes_stream()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
    let decoder = BrotliDecoder::new(StreamReader::new(stream));
    tokio::pin!(decoder);

    let mut body = Vec::new();
    decoder
        .read_to_end(&mut body)
        .await
        .map_err(|e| ItemError::Decode(e.to_string()))?;

    Ok(body)
}

#[async_trait]
impl ItemFetcher for SkinportClient {
    async fn fetch_items(&self) -> Result<Vec<Item>, ItemError> {
        self.fetch_catalogue().await
    }
}
