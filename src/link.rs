use crate::share::ShareReference;

/// Build the direct WebDAV download link for one file in the share.
///
/// The shape is fixed by Nextcloud's public WebDAV endpoint:
/// `<base>/public.php/dav/files/<token>[/<path>]/<file>`. A media player can
/// open these without going through the web UI. Construction is purely
/// textual, nothing is fetched to validate the result.
pub fn direct_link(reference: &ShareReference, filename: &str) -> String {
    let encoded_file = urlencoding::encode(filename);
    let path = normalize_path(&reference.path);

    if path.is_empty() {
        format!(
            "{}/public.php/dav/files/{}/{}",
            reference.base_url, reference.token, encoded_file
        )
    } else {
        format!(
            "{}/public.php/dav/files/{}{}/{}",
            reference.base_url,
            reference.token,
            encode_path(&path),
            encoded_file
        )
    }
}

// A usable subfolder has exactly one leading slash and no trailing one.
// Empty stays empty, so the caller can tell "share root" apart.
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

// Percent-encode a path segment by segment, keeping the slashes that
// separate segments.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(path: &str) -> ShareReference {
        ShareReference::new("https://c.com".into(), "T1".into(), path.into())
    }

    #[test]
    fn link_at_share_root() {
        assert_eq!(
            direct_link(&reference(""), "My Movie.mkv"),
            "https://c.com/public.php/dav/files/T1/My%20Movie.mkv"
        );
    }

    #[test]
    fn link_inside_subfolder() {
        assert_eq!(
            direct_link(&reference("Season 1"), "My Movie.mkv"),
            "https://c.com/public.php/dav/files/T1/Season%201/My%20Movie.mkv"
        );
    }

    #[test]
    fn nested_subfolder_keeps_separators() {
        assert_eq!(
            direct_link(&reference("Shows/Season 1"), "ep.mp4"),
            "https://c.com/public.php/dav/files/T1/Shows/Season%201/ep.mp4"
        );
    }

    #[test]
    fn slashes_around_the_path_are_normalized() {
        let with_both = direct_link(&reference("/Season 1/"), "a.mkv");
        let bare = direct_link(&reference("Season 1"), "a.mkv");
        assert_eq!(with_both, bare);
    }

    #[test]
    fn lone_slash_path_means_share_root() {
        assert_eq!(
            direct_link(&reference("/"), "a.mkv"),
            direct_link(&reference(""), "a.mkv")
        );
    }

    #[test]
    fn unicode_filename_is_percent_encoded() {
        assert_eq!(
            direct_link(&reference(""), "Küste.mkv"),
            "https://c.com/public.php/dav/files/T1/K%C3%BCste.mkv"
        );
    }
}
