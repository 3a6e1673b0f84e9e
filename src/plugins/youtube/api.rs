use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use super::error::YoutubeError;
use super::models::{
    details_by_id, ErrorResponse, SearchResponse, SearchStub, VideoDetail, VideosResponse,
};
use crate::settings::YoutubeSettings;

pub const SEARCH_TYPE_VIDEO: &str = "video";
pub const ORDER_RELEVANCE: &str = "relevance";
const DETAIL_PARTS: &str = "snippet,statistics,contentDetails";

/// Thin client for the `search` and `videos` endpoints of the Data API.
pub struct YoutubeClient {
    client: Client,
    base_url: String,
    api_key: String,
    max_results: u32,
}

/// Search hits that are videos, plus how many items the API returned in total.
#[derive(Debug, Default)]
pub struct SearchPage {
    pub total_items: usize,
    pub stubs: Vec<SearchStub>,
}

impl YoutubeClient {
    pub fn new(settings: &YoutubeSettings) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(concat!("youtube-launcher/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            api_key: settings.youtube_api_key.clone(),
            max_results: settings.max_results,
        })
    }

    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    pub fn build_search_params(
        &self,
        query: &str,
        search_type: &str,
        order: &str,
        max_results: u32,
    ) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("q", query.to_string()),
            ("part", "snippet".to_string()),
            ("type", search_type.to_string()),
            ("order", order.to_string()),
            ("maxResults", max_results.to_string()),
            ("key", self.api_key.clone()),
        ])
    }

    pub fn detail_params(&self, ids: &[String]) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("part", DETAIL_PARTS.to_string()),
            ("id", ids.join(",")),
            ("key", self.api_key.clone()),
        ])
    }

    /// Run a video search ordered by relevance.
    pub fn search(&self, query: &str) -> Result<SearchPage, YoutubeError> {
        let params =
            self.build_search_params(query, SEARCH_TYPE_VIDEO, ORDER_RELEVANCE, self.max_results);
        tracing::debug!(query, max_results = self.max_results, "youtube search");
        let resp: SearchResponse = self.get("search", &params)?;
        let total_items = resp.items.len();
        let stubs = resp
            .items
            .into_iter()
            .filter_map(|item| item.into_stub())
            .collect();
        Ok(SearchPage { total_items, stubs })
    }

    /// Fetch statistics and content details for all `ids` in one request.
    pub fn video_details(&self, ids: &[String]) -> Result<HashMap<String, VideoDetail>, YoutubeError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        tracing::debug!(count = ids.len(), "youtube video details");
        let resp: VideosResponse = self.get("videos", &self.detail_params(ids))?;
        Ok(details_by_id(resp))
    }

    fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &BTreeMap<&'static str, String>,
    ) -> Result<T, YoutubeError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let resp = self.client.get(&url).query(params).send()?;
        let resp = check_status(resp)?;
        let body = resp.text()?;
        serde_json::from_str(&body).map_err(|e| YoutubeError::Decode(e.to_string()))
    }
}

fn check_status(resp: Response) -> Result<Response, YoutubeError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp
        .text()
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorResponse>(&body).ok())
        .map(|e| e.error.message);
    tracing::warn!(%status, "youtube api request failed");
    Err(YoutubeError::from_status(status, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(key: &str) -> YoutubeClient {
        YoutubeClient::new(&YoutubeSettings {
            youtube_api_key: key.into(),
            ..YoutubeSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn build_search_params_has_fixed_fields() {
        let params = client("test_api_key").build_search_params("python tutorial", "video", "relevance", 10);
        assert_eq!(params["q"], "python tutorial");
        assert_eq!(params["part"], "snippet");
        assert_eq!(params["type"], "video");
        assert_eq!(params["order"], "relevance");
        assert_eq!(params["maxResults"], "10");
        assert_eq!(params["key"], "test_api_key");
        assert_eq!(params.len(), 6);
    }

    #[test]
    fn empty_key_is_passed_through() {
        let params = client("").build_search_params("cats", "video", "relevance", 10);
        assert_eq!(params["key"], "");
    }

    #[test]
    fn detail_params_join_ids() {
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let params = client("k").detail_params(&ids);
        assert_eq!(params["id"], "a,b,c");
        assert_eq!(params["part"], "snippet,statistics,contentDetails");
        assert_eq!(params["key"], "k");
    }

    #[test]
    fn no_ids_means_no_request() {
        let c = YoutubeClient::new(&YoutubeSettings {
            youtube_api_key: "k".into(),
            api_base_url: "http://127.0.0.1:9".into(),
            ..YoutubeSettings::default()
        })
        .unwrap();
        assert!(c.video_details(&[]).unwrap().is_empty());
    }
}
