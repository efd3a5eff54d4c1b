use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};

use crate::channels::ChannelSelection;
use crate::color::ColorSpace;

/// Minute resolution point in time used for output file names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl Timestamp {
    pub fn now() -> Self {
        Self::from(Local::now())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(value: DateTime<Tz>) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
            day: value.day(),
            hour: value.hour(),
            minute: value.minute(),
        }
    }
}

/// `{year}{month}{day}{hour}{minute}{space}_c{channels}n{k}.{format}`, no zero
/// padding. Runs within the same minute and with equal parameters collide.
pub fn output_filename(
    timestamp: &Timestamp,
    color_space: ColorSpace,
    channels: &ChannelSelection,
    cluster_count: usize,
    format: &str,
) -> String {
    format!(
        "{}{}{}{}{}{}_c{}n{}.{}",
        timestamp.year,
        timestamp.month,
        timestamp.day,
        timestamp.hour,
        timestamp.minute,
        color_space,
        channels,
        cluster_count,
        format
    )
}
