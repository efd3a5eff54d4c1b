use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    ImageNotFound(String),
    ImageDecodeError(String, image::ImageError),
    InvalidChannelIndex(usize, usize),
    InvalidChannelSelection(String),
    TooManyClusters(usize),
    EmptyImage,
    TooFewPixels(usize, usize),
    ClusteringFailure(String),
    OutputWriteFailure(String, image::ImageError),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageNotFound(path) => {
                write!(f, "Input image '{}' not found", path)
            }
            Self::ImageDecodeError(path, error) => {
                write!(f, "Unable to decode input image '{}': {}", path, error)
            }
            Self::InvalidChannelIndex(index, channel_count) => {
                write!(
                    f,
                    "Channel index {} out of range. Image has {} channels.",
                    index, channel_count
                )
            }
            Self::InvalidChannelSelection(selection) => {
                write!(
                    f,
                    "Invalid channel selection '{}'. Expected 'all' or a string of channel digits.",
                    selection
                )
            }
            Self::TooManyClusters(count) => {
                write!(
                    f,
                    "{} clusters requested, but at most 256 can be shown as distinct gray levels",
                    count
                )
            }
            Self::EmptyImage => write!(f, "Image does not contain any pixels"),
            Self::TooFewPixels(pixels, clusters) => {
                write!(
                    f,
                    "Image has {} pixels, but {} clusters were requested",
                    pixels, clusters
                )
            }
            Self::ClusteringFailure(reason) => write!(f, "Clustering failed: {}", reason),
            Self::OutputWriteFailure(path, error) => {
                write!(f, "Unable to write output image '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecodeError(_, error) | Self::OutputWriteFailure(_, error) => Some(error),
            _ => None,
        }
    }
}
