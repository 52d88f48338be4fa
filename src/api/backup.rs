//! Backup backend: netease-compatible JSON envelopes.
//!
//! Clean enough for typed serde structs. Every payload carries a `code`
//! field; anything other than 200 is a backend-reported failure even when
//! the HTTP status was fine.

use super::error::{ApiError, ApiResult};
use super::models::{SearchPage, Source, Track};
use super::{PAGE_SIZE, check_page, page_count};
use serde::Deserialize;

const SEARCH_URL: &str = "https://api.music.imsyy.top/search";
const SONG_URL: &str = "https://api.music.imsyy.top/song/url";
const LYRIC_URL: &str = "https://api.music.imsyy.top/lyric";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    code: i64,
    msg: Option<String>,
    result: Option<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "songCount", default)]
    song_count: u64,
    #[serde(default)]
    songs: Vec<Song>,
}

#[derive(Debug, Deserialize)]
struct Song {
    id: i64,
    name: String,
    #[serde(default)]
    artists: Vec<Named>,
    album: Option<Named>,
}

#[derive(Debug, Deserialize)]
struct Named {
    #[serde(default)]
    name: String,
}

fn search_url(query: &str, page: usize) -> String {
    format!(
        "{SEARCH_URL}?keywords={}&limit={PAGE_SIZE}&offset={}",
        urlencoding::encode(query),
        page * PAGE_SIZE
    )
}

pub(super) async fn search(
    http: &reqwest::Client,
    query: &str,
    page: usize,
) -> ApiResult<SearchPage> {
    let resp: SearchResponse = http
        .get(search_url(query, page))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    normalize_search(resp, page)
}

fn normalize_search(resp: SearchResponse, page: usize) -> ApiResult<SearchPage> {
    if resp.code != 200 {
        return Err(backend_err(resp.code, resp.msg, "search"));
    }
    let result = resp
        .result
        .ok_or_else(|| ApiError::Format("search response missing result".into()))?;
    let total_pages = page_count(result.song_count);
    check_page(page, total_pages)?;

    let tracks = result
        .songs
        .into_iter()
        .map(|s| Track {
            id: s.id.to_string(),
            title: s.name,
            artist: s
                .artists
                .into_iter()
                .next()
                .map(|a| a.name)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown".into()),
            album: s.album.map(|a| a.name).filter(|n| !n.is_empty()),
            source: Source::Backup,
        })
        .collect();

    Ok(SearchPage {
        tracks,
        page_index: page,
        total_pages,
    })
}

#[derive(Debug, Deserialize)]
struct SongUrlResponse {
    code: i64,
    msg: Option<String>,
    #[serde(default)]
    data: Vec<SongUrl>,
}

#[derive(Debug, Deserialize)]
struct SongUrl {
    url: Option<String>,
}

pub(super) async fn resolve(http: &reqwest::Client, id: &str) -> ApiResult<String> {
    let resp: SongUrlResponse = http
        .get(format!("{SONG_URL}?id={}", urlencoding::encode(id)))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    extract_stream_url(resp, id)
}

fn extract_stream_url(resp: SongUrlResponse, id: &str) -> ApiResult<String> {
    if resp.code != 200 {
        return Err(backend_err(resp.code, resp.msg, "song/url"));
    }
    // An empty data array or a null/empty url means the track exists but
    // cannot be streamed (VIP or region locked), not a transport failure.
    resp.data
        .into_iter()
        .next()
        .and_then(|d| d.url)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::NotFound(format!("track {id} has no playable stream")))
}

#[derive(Debug, Deserialize)]
struct LyricResponse {
    code: i64,
    lrc: Option<Lrc>,
}

#[derive(Debug, Deserialize)]
struct Lrc {
    lyric: Option<String>,
}

pub(super) async fn lyrics(http: &reqwest::Client, id: &str) -> ApiResult<String> {
    let resp: LyricResponse = http
        .get(format!("{LYRIC_URL}?id={}", urlencoding::encode(id)))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    if resp.code != 200 {
        return Err(ApiError::NotFound(format!("no lyrics for track {id}")));
    }
    resp.lrc
        .and_then(|l| l.lyric)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::NotFound(format!("no lyrics for track {id}")))
}

fn backend_err(code: i64, msg: Option<String>, op: &str) -> ApiError {
    match msg {
        Some(m) if !m.is_empty() => ApiError::Backend(m),
        _ => ApiError::Backend(format!("{op} failed with code {code}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_search_typical_page() {
        let raw = r#"{
            "code": 200,
            "result": {
                "songCount": 41,
                "songs": [
                    { "id": 33894312, "name": "Song A",
                      "artists": [{ "name": "Artist A" }, { "name": "Feat B" }],
                      "album": { "name": "Album A" } },
                    { "id": 7, "name": "Song B", "artists": [], "album": null }
                ]
            }
        }"#;
        let resp: SearchResponse = serde_json::from_str(raw).unwrap();
        let page = normalize_search(resp, 2).unwrap();
        assert_eq!(page.page_index, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.tracks.len(), 2);
        assert_eq!(page.tracks[0].id, "33894312");
        assert_eq!(page.tracks[0].artist, "Artist A");
        assert_eq!(page.tracks[0].source, Source::Backup);
        assert_eq!(page.tracks[1].artist, "Unknown");
        assert!(page.tracks[1].album.is_none());
    }

    #[test]
    fn search_url_encodes_query_and_pages_by_offset() {
        assert_eq!(
            search_url("hello world", 2),
            "https://api.music.imsyy.top/search?keywords=hello%20world&limit=20&offset=40"
        );
    }

    #[test]
    fn normalize_search_rejects_page_past_the_end() {
        let resp: SearchResponse = serde_json::from_str(
            r#"{ "code": 200, "result": { "songCount": 41, "songs": [] } }"#,
        )
        .unwrap();
        assert!(matches!(
            normalize_search(resp, 3),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn normalize_search_error_code_is_backend_error() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{ "code": 405, "msg": "rate limited" }"#).unwrap();
        match normalize_search(resp, 0) {
            Err(ApiError::Backend(m)) => assert_eq!(m, "rate limited"),
            other => panic!("expected Backend, got {other:?}"),
        }
    }

    #[test]
    fn extract_stream_url_ok() {
        let resp: SongUrlResponse = serde_json::from_str(
            r#"{ "code": 200, "data": [{ "url": "https://cdn.example/a.mp3" }] }"#,
        )
        .unwrap();
        assert_eq!(
            extract_stream_url(resp, "7").unwrap(),
            "https://cdn.example/a.mp3"
        );
    }

    #[test]
    fn extract_stream_url_empty_data_is_not_found() {
        let resp: SongUrlResponse =
            serde_json::from_str(r#"{ "code": 200, "data": [] }"#).unwrap();
        assert!(matches!(
            extract_stream_url(resp, "7"),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn extract_stream_url_null_url_is_not_found() {
        let resp: SongUrlResponse =
            serde_json::from_str(r#"{ "code": 200, "data": [{ "url": null }] }"#).unwrap();
        assert!(matches!(
            extract_stream_url(resp, "7"),
            Err(ApiError::NotFound(_))
        ));
    }
}
