//! YouTube watch-URL validation.

use url::Url;

/// True when `raw` points at a single YouTube video: an http(s)
/// `youtube.com/watch?v=<id>` URL (any of the usual hosts) or a
/// `youtu.be/<id>` short link.
pub fn is_watch_url(raw: &str) -> bool {
    let Ok(parsed) = Url::parse(raw) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .unwrap_or(host);

    match host {
        "youtube.com" => {
            parsed.path() == "/watch"
                && parsed
                    .query_pairs()
                    .any(|(key, value)| key == "v" && !value.is_empty())
        }
        "youtu.be" => parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .is_some_and(|id| !id.is_empty()),
        _ => false,
    }
}
