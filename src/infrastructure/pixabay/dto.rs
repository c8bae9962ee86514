use serde::Deserialize;

use crate::domain::entities::{ImageRecord, ImageStats, PageResult};

/// Pixabay search response structure.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Total matches on the remote side.
    #[serde(default)]
    pub total: u64,
    /// Matches accessible through the API.
    #[serde(rename = "totalHits", default)]
    pub total_hits: u64,
    /// Hits on the requested page.
    #[serde(default)]
    pub hits: Vec<HitResponse>,
}

/// Pixabay image hit.
#[derive(Debug, Deserialize)]
pub struct HitResponse {
    pub id: u64,
    #[serde(rename = "pageURL", default)]
    pub page_url: Option<String>,
    #[serde(default)]
    pub tags: String,
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub user: Option<String>,
}

impl From<HitResponse> for ImageRecord {
    fn from(hit: HitResponse) -> Self {
        let mut record = Self::new(hit.id, hit.webformat_url, hit.large_image_url, hit.tags)
            .with_stats(ImageStats {
                likes: hit.likes,
                views: hit.views,
                comments: hit.comments,
                downloads: hit.downloads,
            });

        if let Some(url) = hit.page_url.filter(|u| !u.is_empty()) {
            record = record.with_page_url(url);
        }
        if let Some(user) = hit.user.filter(|u| !u.is_empty()) {
            record = record.with_author(user);
        }

        record
    }
}

impl From<SearchResponse> for PageResult {
    fn from(response: SearchResponse) -> Self {
        Self::new(
            response.hits.into_iter().map(ImageRecord::from).collect(),
            response.total_hits,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "total": 4692,
        "totalHits": 500,
        "hits": [
            {
                "id": 195893,
                "pageURL": "https://pixabay.com/en/blossom-bloom-flower-195893/",
                "type": "photo",
                "tags": "blossom, bloom, flower",
                "previewURL": "https://cdn.pixabay.com/photo/2013/10/15/09/12/flower-195893_150.jpg",
                "webformatURL": "https://pixabay.com/get/35bbf209e13e39d2_640.jpg",
                "webformatWidth": 640,
                "largeImageURL": "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg",
                "views": 7671,
                "downloads": 6439,
                "likes": 5,
                "comments": 2,
                "user_id": 48777,
                "user": "Josch13"
            }
        ]
    }"#;

    #[test]
    fn test_parse_search_response() {
        let response: SearchResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(response.total, 4692);

        let page = PageResult::from(response);
        assert_eq!(page.total_count, 500);
        assert_eq!(page.records.len(), 1);

        let record = &page.records[0];
        assert_eq!(record.id().0, 195_893);
        assert_eq!(record.tags(), "blossom, bloom, flower");
        assert!(record.full_url().ends_with("_1280.jpg"));
        assert!(record.display_url().ends_with("_640.jpg"));
        assert_eq!(record.author(), Some("Josch13"));
        assert_eq!(record.stats().views, 7671);
        assert_eq!(record.stats().downloads, 6439);
        assert_eq!(record.stats().likes, 5);
        assert_eq!(record.stats().comments, 2);
    }

    #[test]
    fn test_parse_empty_response() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"total":0,"totalHits":0,"hits":[]}"#).unwrap();
        let page = PageResult::from(response);
        assert!(page.is_empty());
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn test_hit_without_urls_is_rejected() {
        let result = serde_json::from_str::<SearchResponse>(r#"{"totalHits":1,"hits":[{"id":1}]}"#);
        assert!(result.is_err());
    }
}
