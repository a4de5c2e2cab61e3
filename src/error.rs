use thiserror::Error;

// Errors produced by the share/extract/link/playlist pipeline. Everything
// interactive (prompting for a manual token or file list) lives in main.rs;
// these only say what went wrong.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no share token found in URL")]
    TokenNotFound,

    #[error("share URL is not a valid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("no video files found")]
    NoVideosFound,

    #[error("playlist would be empty, nothing to write")]
    EmptyPlaylist,

    #[error("could not write playlist: {0}")]
    Io(#[from] std::io::Error),
}
