use std::fs;
use std::path::PathBuf;

pub use cli::CLIParser;
use cluster::{ClusterCount, KMeans, KMeansOptions};
use color::ColorSpace;
use grid::{reader::FileImageReader, writer::FileImageWriter, ImageReader, ImageWriter, PixelGrid};
use naming::{output_filename, Timestamp};
pub use segmenter::Segmentation;
use segmenter::{SegmentationOptions, Segmenter};

pub mod canonical;
pub mod channels;
mod cli;
pub mod cluster;
pub mod color;
pub mod compositor;
mod error;
pub mod features;
pub mod grid;
mod logger;
pub mod naming;
pub mod segmenter;

pub use error::Error;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    image: PathBuf,
    width: u32,
    color_space: String,
    channels: channels::ChannelSelection,
    num_clusters: i64,
    output_file: bool,
    output_format: String,
    output_dir: PathBuf,
    composite: Option<PathBuf>,
    seed: u64,
    restarts: usize,
    max_iterations: usize,
}

impl TryFrom<&Arguments> for SegmentationOptions {
    type Error = Error;

    fn try_from(value: &Arguments) -> Result<Self> {
        Ok(SegmentationOptions::new(
            ColorSpace::resolve(&value.color_space),
            value.channels.clone(),
            ClusterCount::new(value.num_clusters)?,
        ))
    }
}

impl From<&Arguments> for KMeansOptions {
    fn from(value: &Arguments) -> Self {
        Self {
            restarts: value.restarts,
            max_iterations: value.max_iterations,
            seed: value.seed,
            ..Default::default()
        }
    }
}

pub fn segment_image(arguments: &Arguments) -> Result<Segmentation> {
    segment_image_at(arguments, &Timestamp::now())
}

/// Runs the whole pipeline, naming the optional output file after `timestamp`.
pub fn segment_image_at(arguments: &Arguments, timestamp: &Timestamp) -> Result<Segmentation> {
    let options = SegmentationOptions::try_from(arguments)?;
    let clustering = KMeans::new(KMeansOptions::from(arguments));
    let original = FileImageReader::new(&arguments.image, arguments.width).read_image()?;
    log::info!(
        "Loaded '{}' with {}x{} pixels",
        arguments.image.display(),
        original.width(),
        original.height()
    );

    let mut segmentation = Segmenter::new(&options, &clustering).segment(&original)?;

    let mut outputs: Vec<(PathBuf, &PixelGrid<u8>)> = Vec::new();
    if let Some(path) = &arguments.composite {
        outputs.push((path.clone(), &segmentation.composite));
    }
    let label_file = arguments.output_file.then(|| {
        let file_name = output_filename(
            timestamp,
            options.color_space,
            &options.channels,
            segmentation.cluster_count,
            &arguments.output_format,
        );
        arguments.output_dir.join(file_name)
    });
    if let Some(path) = &label_file {
        outputs.push((path.clone(), segmentation.labels.grid()));
    }
    write_outputs(&outputs)?;

    segmentation.output_file = label_file;
    Ok(segmentation)
}

/// Writes every grid to its path. When one write fails, the files already
/// written by this call are removed again.
fn write_outputs(outputs: &[(PathBuf, &PixelGrid<u8>)]) -> Result<()> {
    for (index, (path, grid)) in outputs.iter().enumerate() {
        if let Err(e) = FileImageWriter::new(path).write_image(grid) {
            for (written, _) in &outputs[..index] {
                if let Err(remove_error) = fs::remove_file(written) {
                    log::warn!(
                        "Unable to remove '{}' after failed run: {}",
                        written.display(),
                        remove_error
                    );
                }
            }
            return Err(e);
        }
    }
    Ok(())
}
