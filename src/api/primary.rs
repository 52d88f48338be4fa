//! Primary backend: kuwo-compatible endpoints.
//!
//! The search payload is messy legacy JSON (uppercase keys, numbers as
//! strings), so extraction goes through `serde_json::Value` instead of
//! typed structs. Requests need a browser Referer or the backend 403s.

use super::error::{ApiError, ApiResult};
use super::models::{SearchPage, Source, Track};
use super::{PAGE_SIZE, check_page, page_count};
use reqwest::header::REFERER;
use serde_json::Value;

const SEARCH_URL: &str = "https://www.kuwo.cn/search/searchMusicBykeyWord";
const STREAM_URL: &str = "http://www.xintuo1.cn/music/kw";
const LYRIC_URL: &str = "http://m.kuwo.cn/newh5/singles/songinfoandlrc";
const SITE_REFERER: &str = "http://www.kuwo.cn/";

fn search_url(query: &str, page: usize) -> String {
    // The fixed parameter set the endpoint expects; dropping any of them
    // changes the result shape.
    format!(
        "{SEARCH_URL}?vipver=1&client=kt&ft=music&cluster=0&strategy=2012&encoding=utf8\
         &rformat=json&mobi=1&issubtitle=1&show_copyright_off=1&pn={page}&rn={PAGE_SIZE}&all={}",
        urlencoding::encode(query)
    )
}

pub(super) async fn search(
    http: &reqwest::Client,
    query: &str,
    page: usize,
) -> ApiResult<SearchPage> {
    let v: Value = http
        .get(search_url(query, page))
        .header(REFERER, SITE_REFERER)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    parse_search(&v, page)
}

fn parse_search(v: &Value, page: usize) -> ApiResult<SearchPage> {
    let total = v
        .get("TOTAL")
        .and_then(Value::as_str)
        .and_then(|s| s.trim().parse::<u64>().ok())
        .ok_or_else(|| ApiError::Format("search response missing TOTAL".into()))?;
    let total_pages = page_count(total);
    check_page(page, total_pages)?;
    let items = v
        .get("abslist")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::Format("search response missing abslist".into()))?;

    let tracks = items
        .iter()
        .filter_map(|item| {
            let id = item.get("DC_TARGETID")?.as_str()?.to_string();
            Some(Track {
                id,
                title: field(item, "NAME").unwrap_or_else(|| "Unknown".into()),
                artist: field(item, "ARTIST").unwrap_or_else(|| "Unknown".into()),
                album: field(item, "ALBUM"),
                source: Source::Primary,
            })
        })
        .collect();

    Ok(SearchPage {
        tracks,
        page_index: page,
        total_pages,
    })
}

fn field(item: &Value, key: &str) -> Option<String> {
    item.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub(super) async fn resolve(http: &reqwest::Client, id: &str) -> ApiResult<String> {
    // The body of a 200 response is the stream URL as plain text.
    let body = http
        .get(format!("{STREAM_URL}/{id}"))
        .header(REFERER, SITE_REFERER)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let url = body.trim();
    if url.is_empty() {
        return Err(ApiError::NotFound(format!("no stream for track {id}")));
    }
    Ok(url.to_string())
}

pub(super) async fn lyrics(http: &reqwest::Client, id: &str) -> ApiResult<String> {
    let v: Value = http
        .get(format!("{LYRIC_URL}?musicId={}", urlencoding::encode(id)))
        .header(REFERER, SITE_REFERER)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let list = v
        .pointer("/data/lrclist")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::NotFound(format!("no lyrics for track {id}")))?;
    Ok(assemble_lrc(list))
}

/// The lyric endpoint returns `{time: seconds-as-string, lineLyric}`
/// fragments; rebuild the standard `[mm:ss.sss]text` transcript the LRC
/// parser expects.
fn assemble_lrc(list: &[Value]) -> String {
    let mut lrc = String::new();
    for entry in list {
        let time = entry
            .get("time")
            .and_then(Value::as_str)
            .and_then(|s| s.trim().parse::<f64>().ok());
        let text = entry.get("lineLyric").and_then(Value::as_str);
        let (Some(time), Some(text)) = (time, text) else {
            continue;
        };
        let minutes = (time / 60.0).floor() as u64;
        let seconds = time - (minutes * 60) as f64;
        lrc.push_str(&format!("[{minutes:02}:{seconds:06.3}]{text}\n"));
    }
    lrc
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture(total: &str, count: usize) -> Value {
        let items: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "NAME": format!("Song {i}"),
                    "ARTIST": format!("Artist {i}"),
                    "ALBUM": if i % 2 == 0 { format!("Album {i}") } else { String::new() },
                    "DC_TARGETID": format!("{}", 1000 + i),
                })
            })
            .collect();
        json!({ "TOTAL": total, "abslist": items })
    }

    #[test]
    fn parse_search_full_page() {
        let page = parse_search(&fixture("25", 20), 0).unwrap();
        assert_eq!(page.tracks.len(), 20);
        assert_eq!(page.page_index, 0);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.tracks[0].id, "1000");
        assert_eq!(page.tracks[0].title, "Song 0");
        assert_eq!(page.tracks[0].source, Source::Primary);
        // Empty album strings become None.
        assert!(page.tracks[1].album.is_none());
        assert_eq!(page.tracks[2].album.as_deref(), Some("Album 2"));
    }

    #[test]
    fn parse_search_no_results() {
        let page = parse_search(&fixture("0", 0), 0).unwrap();
        assert!(page.tracks.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn parse_search_rejects_page_past_the_end() {
        match parse_search(&fixture("25", 0), 99) {
            Err(ApiError::NotFound(m)) => assert!(m.contains("out of range"), "{m}"),
            other => panic!("expected NotFound, got {other:?}"),
        }
        // Any page of an empty result set is the empty zero-page result.
        let page = parse_search(&fixture("0", 0), 99).unwrap();
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn parse_search_missing_total_is_format_error() {
        let v = json!({ "abslist": [] });
        assert!(matches!(parse_search(&v, 0), Err(ApiError::Format(_))));
    }

    #[test]
    fn parse_search_skips_items_without_id() {
        let v = json!({
            "TOTAL": "2",
            "abslist": [
                { "NAME": "Keep", "ARTIST": "A", "DC_TARGETID": "1" },
                { "NAME": "Drop", "ARTIST": "B" },
            ]
        });
        let page = parse_search(&v, 0).unwrap();
        assert_eq!(page.tracks.len(), 1);
        assert_eq!(page.tracks[0].title, "Keep");
    }

    #[test]
    fn assemble_lrc_formats_timestamps() {
        let list = [
            json!({ "time": "12.34", "lineLyric": "hello" }),
            json!({ "time": "75.5", "lineLyric": "world" }),
            json!({ "lineLyric": "no time, dropped" }),
        ];
        let lrc = assemble_lrc(&list);
        assert_eq!(lrc, "[00:12.340]hello\n[01:15.500]world\n");
    }
}
