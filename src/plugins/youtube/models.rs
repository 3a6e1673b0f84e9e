use serde::Deserialize;
use std::collections::HashMap;

use super::format;

#[derive(Debug, Deserialize, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SearchItem {
    #[serde(default)]
    pub id: Option<SearchItemId>,
    #[serde(default)]
    pub snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SearchItemId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Snippet {
    pub title: Option<String>,
    #[serde(rename = "channelTitle")]
    pub channel_title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct VideosResponse {
    #[serde(default)]
    pub items: Vec<ApiVideo>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ApiVideo {
    pub id: Option<String>,
    pub statistics: Option<VideoStatistics>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize, Default)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ContentDetails {
    pub duration: Option<String>,
}

/// Error body returned by Google APIs on failure.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

/// A search hit before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStub {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub description: String,
    pub published_at: String,
}

impl SearchItem {
    /// Convert to a stub, dropping items that are not videos.
    pub fn into_stub(self) -> Option<SearchStub> {
        let id = self.id?.video_id.filter(|id| !id.is_empty())?;
        let snippet = self.snippet.unwrap_or_default();
        Some(SearchStub {
            id,
            title: snippet.title.unwrap_or_else(|| "No Title".into()),
            channel_title: snippet
                .channel_title
                .unwrap_or_else(|| "Unknown Channel".into()),
            description: snippet.description.unwrap_or_default(),
            published_at: snippet.published_at.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoDetail {
    pub id: String,
    pub view_count: Option<u64>,
    pub duration_raw: String,
}

impl ApiVideo {
    pub fn into_detail(self) -> Option<VideoDetail> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let view_count = self
            .statistics
            .and_then(|s| s.view_count)
            .and_then(|raw| match raw.parse::<u64>() {
                Ok(n) => Some(n),
                Err(_) => {
                    tracing::warn!("video {id} has invalid view count '{raw}'");
                    None
                }
            });
        let duration_raw = self
            .content_details
            .and_then(|c| c.duration)
            .unwrap_or_default();
        Some(VideoDetail {
            id,
            view_count,
            duration_raw,
        })
    }
}

/// Index detail records by video id.
pub fn details_by_id(resp: VideosResponse) -> HashMap<String, VideoDetail> {
    resp.items
        .into_iter()
        .filter_map(ApiVideo::into_detail)
        .map(|d| (d.id.clone(), d))
        .collect()
}

/// A stub enriched with whatever detail data was found for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedItem {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub description: String,
    pub view_count: Option<u64>,
    pub duration_formatted: String,
    pub publish_date: String,
}

impl MergedItem {
    pub fn url(&self) -> String {
        video_url(&self.id)
    }

    pub fn subtitle(&self) -> String {
        let mut parts = Vec::new();
        if !self.channel_title.is_empty() {
            parts.push(format!("Channel: {}", self.channel_title));
        }
        if !self.duration_formatted.is_empty() {
            parts.push(format!("Duration: {}", self.duration_formatted));
        }
        if let Some(views) = self.view_count {
            parts.push(format!("Views: {}", format::format_number(views)));
        }
        if !self.publish_date.is_empty() {
            parts.push(format!("Published: {}", self.publish_date));
        }
        parts.join(" | ")
    }
}

pub fn video_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={id}")
}

/// Left join of stubs against details. Stubs decide which items appear and in
/// what order.
pub fn merge(stubs: Vec<SearchStub>, details: &HashMap<String, VideoDetail>) -> Vec<MergedItem> {
    stubs
        .into_iter()
        .map(|stub| {
            let detail = details.get(&stub.id);
            let duration_formatted = detail
                .map(|d| format::display_duration(&d.duration_raw))
                .unwrap_or_default();
            let publish_date = format::publish_date(&stub.published_at).to_string();
            MergedItem {
                view_count: detail.and_then(|d| d.view_count),
                duration_formatted,
                publish_date,
                id: stub.id,
                title: stub.title,
                channel_title: stub.channel_title,
                description: stub.description,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub(id: &str) -> SearchStub {
        SearchStub {
            id: id.into(),
            title: format!("title {id}"),
            channel_title: "chan".into(),
            description: String::new(),
            published_at: "2023-05-06T07:08:09Z".into(),
        }
    }

    #[test]
    fn non_video_items_are_dropped() {
        let resp: SearchResponse = serde_json::from_str(
            r#"{"items":[
                {"id":{"kind":"youtube#channel","channelId":"UC1"},"snippet":{"title":"chan"}},
                {"id":{"kind":"youtube#video","videoId":""}},
                {"id":{"kind":"youtube#video","videoId":"v1"}},
                {"snippet":{"title":"no id"}}
            ]}"#,
        )
        .unwrap();
        let stubs: Vec<_> = resp.items.into_iter().filter_map(SearchItem::into_stub).collect();
        assert_eq!(stubs.len(), 1);
        assert_eq!(stubs[0].id, "v1");
        assert_eq!(stubs[0].title, "No Title");
        assert_eq!(stubs[0].channel_title, "Unknown Channel");
    }

    #[test]
    fn invalid_view_count_is_absent() {
        let resp: VideosResponse = serde_json::from_str(
            r#"{"items":[{"id":"v1","statistics":{"viewCount":"lots"},"contentDetails":{"duration":"PT1M"}}]}"#,
        )
        .unwrap();
        let details = details_by_id(resp);
        assert_eq!(details["v1"].view_count, None);
        assert_eq!(details["v1"].duration_raw, "PT1M");
    }

    #[test]
    fn merge_is_a_left_join_in_stub_order() {
        let mut details = HashMap::new();
        details.insert(
            "b".to_string(),
            VideoDetail {
                id: "b".into(),
                view_count: Some(1_500),
                duration_raw: "PT4M5S".into(),
            },
        );
        details.insert(
            "z".to_string(),
            VideoDetail {
                id: "z".into(),
                view_count: Some(1),
                duration_raw: "PT1S".into(),
            },
        );
        let merged = merge(vec![stub("a"), stub("b")], &details);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, "a");
        assert_eq!(merged[0].view_count, None);
        assert_eq!(merged[0].duration_formatted, "");
        assert_eq!(merged[1].duration_formatted, "4:05");
        assert_eq!(merged[1].publish_date, "2023-05-06");
        assert_eq!(
            merged[1].subtitle(),
            "Channel: chan | Duration: 4:05 | Views: 1.5K | Published: 2023-05-06"
        );
        assert_eq!(merged[0].subtitle(), "Channel: chan | Published: 2023-05-06");
    }

    #[test]
    fn malformed_duration_only_affects_that_item() {
        let mut details = HashMap::new();
        for (id, raw) in [("a", "PTxM"), ("b", "PT30S")] {
            details.insert(
                id.to_string(),
                VideoDetail {
                    id: id.into(),
                    view_count: Some(10),
                    duration_raw: raw.into(),
                },
            );
        }
        let merged = merge(vec![stub("a"), stub("b")], &details);
        assert_eq!(merged[0].duration_formatted, "");
        assert_eq!(merged[0].view_count, Some(10));
        assert_eq!(merged[1].duration_formatted, "0:30");
    }
}
