use std::fmt::Display;
use std::str::FromStr;

use crate::error::Error;

const ALL_CHANNELS: &str = "all";

/// Channels of the color converted image that take part in clustering.
///
/// Indices keep their order and may repeat, the order defines the layout of
/// the feature vectors.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ChannelSelection {
    #[default]
    All,
    Indices(Vec<usize>),
}

impl ChannelSelection {
    /// Resolves the selection against an image with `channel_count` channels.
    pub fn indices(&self, channel_count: usize) -> crate::Result<Vec<usize>> {
        match self {
            Self::All => Ok((0..channel_count).collect()),
            Self::Indices(indices) => {
                if let Some(&index) = indices.iter().find(|&&index| index >= channel_count) {
                    return Err(Error::InvalidChannelIndex(index, channel_count));
                }
                Ok(indices.clone())
            }
        }
    }
}

impl FromStr for ChannelSelection {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == ALL_CHANNELS {
            return Ok(Self::All);
        }
        if value.is_empty() {
            return Err(Error::InvalidChannelSelection(value.to_owned()));
        }
        value
            .chars()
            .map(|character| {
                character
                    .to_digit(10)
                    .map(|digit| digit as usize)
                    .ok_or_else(|| Error::InvalidChannelSelection(value.to_owned()))
            })
            .collect::<crate::Result<Vec<usize>>>()
            .map(Self::Indices)
    }
}

/// Renders the selection the way it was written on the command line.
impl Display for ChannelSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "{}", ALL_CHANNELS),
            Self::Indices(indices) => indices
                .iter()
                .try_for_each(|index| write!(f, "{}", index)),
        }
    }
}
