use thiserror::Error;

/// Errors from talking to the story API or interpreting its data.
///
/// The API does not distinguish auth failures from validation failures in a
/// way worth modeling; a failed request is a failed request.
#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("story url is not a parseable absolute url: {0}")]
    BadStoryUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
