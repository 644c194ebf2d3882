use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tokio::time::Duration;

use shelfmark_core::{MediaRecord, RequestParams};

use crate::error::CatalogError;
use crate::service::{CatalogService, PAGE_SIZE};

const API_URL: &str = "https://graphql.anilist.co";

const SEARCH_QUERY: &str = r#"
query ($page: Int, $search: String, $genre: String, $tag: String, $sort: [MediaSort],
       $format: MediaFormat, $status: MediaStatus,
       $volumesGreater: Int, $volumesLesser: Int,
       $startGreater: FuzzyDateInt, $startLesser: FuzzyDateInt) {
    Page(page: $page, perPage: 50) {
        media(search: $search, type: MANGA, genre: $genre, tag: $tag, sort: $sort,
              format: $format, status: $status,
              volumes_greater: $volumesGreater, volumes_lesser: $volumesLesser,
              startDate_greater: $startGreater, startDate_lesser: $startLesser) {
            id
            title {
                romaji
                english
                native
            }
            coverImage {
                medium
                large
            }
            format
            status
            volumes
            chapters
            popularity
            averageScore
            favourites
        }
    }
}
"#;

const DETAIL_QUERY: &str = r#"
query ($id: Int) {
    Media(id: $id, type: MANGA) {
        id
        title {
            romaji
            english
            native
        }
        coverImage {
            medium
            large
            extraLarge
        }
        format
        status
        volumes
        chapters
        popularity
        averageScore
        favourites
        genres
        tags {
            name
            rank
        }
        staff {
            edges {
                node {
                    name {
                        full
                        native
                    }
                }
                role
            }
        }
        recommendations(sort: RATING_DESC, perPage: 10) {
            nodes {
                mediaRecommendation {
                    id
                    title {
                        romaji
                        native
                    }
                    coverImage {
                        medium
                    }
                }
            }
        }
        relations {
            edges {
                node {
                    id
                    title {
                        romaji
                        native
                    }
                    type
                    coverImage {
                        medium
                    }
                }
                relationType
            }
        }
        stats {
            statusDistribution {
                status
                amount
            }
        }
    }
}
"#;

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQLError>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    #[serde(rename = "Page")]
    page: PageData,
}

#[derive(Debug, Deserialize)]
struct PageData {
    #[serde(default)]
    media: Vec<MediaRecord>,
}

#[derive(Debug, Deserialize)]
struct DetailData {
    #[serde(rename = "Media")]
    media: Option<MediaRecord>,
}

/// HTTP client for the AniList GraphQL catalog.
pub struct AniListClient {
    http: reqwest::Client,
}

impl AniListClient {
    pub fn new() -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http })
    }

    async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, CatalogError> {
        let resp = self
            .http
            .post(API_URL)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: text.chars().take(200).collect(),
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&text)?;
        if !envelope.errors.is_empty() {
            let messages: Vec<&str> = envelope
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect();
            return Err(CatalogError::Graph(messages.join("; ")));
        }
        envelope
            .data
            .ok_or_else(|| CatalogError::Graph("response carried no data".to_string()))
    }

    /// Download an image (cover art) from a URL. Plain CDN fetch, not a
    /// GraphQL call.
    pub async fn download_image(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        let resp = self.http.get(url).send().await?;
        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }

    fn search_variables(params: &RequestParams, page: u32) -> Value {
        let mut vars = Map::new();
        vars.insert("page".into(), json!(page));
        vars.insert("sort".into(), json!([params.sort]));
        if let Some(ref q) = params.query {
            vars.insert("search".into(), json!(q));
        }
        if let Some(ref genre) = params.genre {
            vars.insert("genre".into(), json!(genre));
        }
        if let Some(ref tag) = params.tag {
            vars.insert("tag".into(), json!(tag));
        }
        if let Some(format) = params.format {
            vars.insert("format".into(), json!(format));
        }
        if let Some(status) = params.status {
            vars.insert("status".into(), json!(status));
        }
        if let Some(greater) = params.volumes_greater {
            vars.insert("volumesGreater".into(), json!(greater));
        }
        if let Some(lesser) = params.volumes_lesser {
            vars.insert("volumesLesser".into(), json!(lesser));
        }
        // The service's date bounds are exclusive on both ends; the min
        // bound is inclusive, so it is shifted down by one day-code.
        if let Some(min) = params.start_date_min {
            vars.insert("startGreater".into(), json!(min - 1));
        }
        if let Some(max) = params.start_date_max {
            vars.insert("startLesser".into(), json!(max));
        }
        Value::Object(vars)
    }
}

impl CatalogService for AniListClient {
    async fn search(
        &self,
        params: &RequestParams,
        page: u32,
    ) -> Result<Vec<MediaRecord>, CatalogError> {
        let vars = Self::search_variables(params, page);
        let data: SearchData = self.query(SEARCH_QUERY, vars).await?;
        if data.page.media.len() > PAGE_SIZE {
            log::warn!(
                "catalog returned {} records for a {}-record page",
                data.page.media.len(),
                PAGE_SIZE
            );
        }
        Ok(data.page.media)
    }

    async fn detail(&self, id: u64) -> Result<Option<MediaRecord>, CatalogError> {
        let data: DetailData = self.query(DETAIL_QUERY, json!({ "id": id })).await?;
        Ok(data.media)
    }
}
