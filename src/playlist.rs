use std::fs;
use std::path::Path;

use crate::error::Error;

/// Render an M3U playlist: the `#EXTM3U` marker, then one `#EXTINF` line and
/// one link line per file, in the order the files were given. Every line is
/// newline-terminated. An empty file list is an error, not an empty-but-valid
/// playlist.
pub fn render<F>(video_files: &[String], mut link: F) -> Result<String, Error>
where
    F: FnMut(&str) -> String,
{
    if video_files.is_empty() {
        return Err(Error::EmptyPlaylist);
    }

    let mut content = String::from("#EXTM3U\n");
    for filename in video_files {
        content.push_str(&format!("#EXTINF:-1,{}\n", display_name(filename)));
        content.push_str(&format!("{}\n", link(filename)));
    }
    Ok(content)
}

/// Render and write the playlist. Playlists are small, so the whole file
/// goes out in a single write.
pub fn write_playlist<F>(destination: &Path, video_files: &[String], link: F) -> Result<(), Error>
where
    F: FnMut(&str) -> String,
{
    let content = render(video_files, link)?;
    fs::write(destination, content)?;
    Ok(())
}

/// Filename shown in the player: the final extension segment is dropped,
/// earlier dots stay. A name whose only dot leads (".hidden") is kept whole.
pub fn display_name(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(index) if index > 0 => &filename[..index],
        _ => filename,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub_link(filename: &str) -> String {
        format!("L({filename})")
    }

    #[test]
    fn renders_exact_m3u_bytes() {
        let files = vec!["a.mkv".to_string(), "b.mp4".to_string()];
        let content = render(&files, stub_link).unwrap();
        assert_eq!(
            content,
            "#EXTM3U\n#EXTINF:-1,a\nL(a.mkv)\n#EXTINF:-1,b\nL(b.mp4)\n"
        );
    }

    #[test]
    fn preserves_input_order() {
        let files = vec!["z.mkv".to_string(), "a.mkv".to_string()];
        let content = render(&files, stub_link).unwrap();
        let z_at = content.find("z").unwrap();
        let a_at = content.find("a.mkv").unwrap();
        assert!(z_at < a_at);
    }

    #[test]
    fn empty_input_is_refused() {
        assert!(matches!(render(&[], stub_link), Err(Error::EmptyPlaylist)));
    }

    #[test]
    fn written_file_matches_rendered_bytes_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec!["a.mkv".to_string(), "b.mp4".to_string()];

        let first = dir.path().join("one.m3u");
        let second = dir.path().join("two.m3u");
        write_playlist(&first, &files, stub_link).unwrap();
        write_playlist(&second, &files, stub_link).unwrap();

        let first_bytes = fs::read(&first).unwrap();
        let second_bytes = fs::read(&second).unwrap();
        assert_eq!(first_bytes, second_bytes);
        assert_eq!(first_bytes, render(&files, stub_link).unwrap().into_bytes());
    }

    #[test]
    fn display_name_strips_only_the_last_suffix() {
        assert_eq!(display_name("Movie.mkv"), "Movie");
        assert_eq!(display_name("S01E02.1080p.mkv"), "S01E02.1080p");
        assert_eq!(display_name("noextension"), "noextension");
        assert_eq!(display_name(".hidden"), ".hidden");
    }
}
