use percent_encoding::percent_decode_str;
use url::Url;

use crate::wiki::types::RawHit;

/// Substrings marking decorative files rather than photographs.
const EXCLUDED: &[&str] = &["icon", "logo", ".svg", "button", "symbol", "wikimedia"];
const RASTER_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif"];

pub fn is_photo_title(title: &str) -> bool {
    let lower = title.to_lowercase();
    !EXCLUDED.iter().any(|x| lower.contains(x))
        && RASTER_EXTENSIONS.iter().any(|ext| lower.contains(ext))
}

/// File titles worth fetching metadata for, in search order.
pub fn select_photos(hits: &[RawHit], max: usize) -> Vec<String> {
    hits.iter()
        .filter(|h| is_photo_title(&h.title))
        .take(max)
        .map(|h| h.title.clone())
        .collect()
}

/// Decoded file name from an upload URL's last path segment.
pub fn file_name_from_url(source: &str) -> Option<String> {
    let url = Url::parse(source).ok()?;
    let segment = url.path_segments()?.next_back()?;
    let name = percent_decode_str(segment).decode_utf8().ok()?;
    (!name.is_empty()).then(|| name.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(titles: &[&str]) -> Vec<RawHit> {
        titles
            .iter()
            .map(|t| RawHit {
                title: t.to_string(),
                snippet: String::new(),
            })
            .collect()
    }

    #[test]
    fn keeps_raster_photos() {
        assert!(is_photo_title("File:Golden Retriever.JPG"));
        assert!(is_photo_title("File:Dog sleeping.png"));
        assert!(is_photo_title("File:Running dog.gif"));
    }

    #[test]
    fn drops_icons_logos_and_vectors() {
        for title in [
            "File:Dog icon.png",
            "File:Kennel Club logo.jpg",
            "File:Dog.svg",
            "File:Paw button.png",
            "File:Dog symbol.jpeg",
            "File:Wikimedia dog.jpg",
            "File:Dog.webm",
        ] {
            assert!(!is_photo_title(title), "should drop {title}");
        }
    }

    #[test]
    fn select_caps_and_preserves_order() {
        let hits = hits(&[
            "File:A.jpg",
            "File:logo.png",
            "File:B.png",
            "File:C.jpeg",
            "File:D.gif",
            "File:E.jpg",
            "File:F.jpg",
        ]);
        assert_eq!(
            select_photos(&hits, 5),
            vec!["File:A.jpg", "File:B.png", "File:C.jpeg", "File:D.gif", "File:E.jpg"]
        );
    }

    #[test]
    fn file_name_is_percent_decoded() {
        assert_eq!(
            file_name_from_url("https://upload.wikimedia.org/wikipedia/commons/a/ab/Dog_%28pet%29.jpg")
                .as_deref(),
            Some("Dog_(pet).jpg")
        );
        assert_eq!(
            file_name_from_url("https://upload.wikimedia.org/x/Pies_%C5%82a%C5%BCe.jpg").as_deref(),
            Some("Pies_łaże.jpg")
        );
    }

    #[test]
    fn file_name_rejects_unusable_urls() {
        assert!(file_name_from_url("not a url").is_none());
        assert!(file_name_from_url("https://example.org/").is_none());
    }
}
