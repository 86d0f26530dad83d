//! Save-name derivation for fetched media files.
//!
//! The backend reports a server-side `filePath`; the local name comes from
//! its last path segment, or from a Content-Disposition header when the file
//! endpoint provides one. Names are sanitized for Linux filesystems.

/// Fallback when neither source yields a usable name.
const DEFAULT_SAVE_NAME: &str = "download.media";

/// Derive a safe local filename for a fetched file.
///
/// Content-Disposition takes precedence over the path segment. The result is
/// never empty and never a path.
pub fn derive_save_name(file_path: &str, content_disposition: Option<&str>) -> String {
    let candidate = content_disposition
        .and_then(content_disposition_filename)
        .or_else(|| last_path_segment(file_path));

    match candidate.map(|raw| sanitize_name(&raw)) {
        Some(name) if !name.is_empty() && name != "." && name != ".." => name,
        _ => DEFAULT_SAVE_NAME.to_string(),
    }
}

/// Last segment of a server path, tolerating both `/` and `\` separators.
fn last_path_segment(path: &str) -> Option<String> {
    path.rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Extract `filename=` from a Content-Disposition value (quoted or bare).
fn content_disposition_filename(value: &str) -> Option<String> {
    for part in value.split(';') {
        let Some((key, raw)) = part.trim().split_once('=') else {
            continue;
        };
        if !key.trim().eq_ignore_ascii_case("filename") {
            continue;
        }
        let raw = raw.trim();
        let name = raw
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(raw);
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }
    None
}

/// Replace path separators and control characters, trim leading/trailing
/// dots and whitespace, and cap at 255 bytes (NAME_MAX).
fn sanitize_name(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let cleaned: String = name
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c == '\0' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let trimmed = cleaned.trim().trim_matches('.').trim();

    let mut end = trimmed.len().min(NAME_MAX);
    while end > 0 && !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_from_path_segment() {
        assert_eq!(derive_save_name("/srv/media/clip.mp4", None), "clip.mp4");
        assert_eq!(derive_save_name("clip.mp4", None), "clip.mp4");
    }

    #[test]
    fn name_from_windows_style_path() {
        assert_eq!(
            derive_save_name("C:\\media\\song.mp3", None),
            "song.mp3"
        );
    }

    #[test]
    fn content_disposition_overrides_path() {
        assert_eq!(
            derive_save_name(
                "/srv/media/tmp-1234.bin",
                Some("attachment; filename=\"Minha Música.mp3\"")
            ),
            "Minha Música.mp3"
        );
    }

    #[test]
    fn bare_token_filename() {
        assert_eq!(
            derive_save_name("/x", Some("attachment; filename=out.ogg")),
            "out.ogg"
        );
    }

    #[test]
    fn separators_in_header_are_neutralized() {
        assert_eq!(
            derive_save_name("/x", Some("attachment; filename=\"../../etc/passwd\"")),
            "_.._etc_passwd"
        );
    }

    #[test]
    fn empty_sources_fall_back() {
        assert_eq!(derive_save_name("", None), DEFAULT_SAVE_NAME);
        assert_eq!(derive_save_name("///", None), DEFAULT_SAVE_NAME);
        assert_eq!(derive_save_name("/..", None), DEFAULT_SAVE_NAME);
    }
}
