use std::path::PathBuf;

use crate::canonical::CanonicalLabels;
use crate::channels::ChannelSelection;
use crate::cluster::{ClusterCount, Clustering, LabelGrid};
use crate::color::ColorSpace;
use crate::compositor::{Compositor, DEFAULT_SEPARATOR_FRACTION};
use crate::error::Error;
use crate::features::FeatureSet;
use crate::grid::PixelGrid;
use crate::logger::log_cluster_sizes;

pub struct SegmentationOptions {
    pub color_space: ColorSpace,
    pub channels: ChannelSelection,
    pub cluster_count: ClusterCount,
    pub separator_fraction: f64,
}

impl SegmentationOptions {
    pub fn new(
        color_space: ColorSpace,
        channels: ChannelSelection,
        cluster_count: ClusterCount,
    ) -> Self {
        Self {
            color_space,
            channels,
            cluster_count,
            separator_fraction: DEFAULT_SEPARATOR_FRACTION,
        }
    }
}

pub struct Segmentation {
    pub color_space: ColorSpace,
    pub cluster_count: usize,
    pub labels: CanonicalLabels,
    pub composite: PixelGrid<u8>,
    pub output_file: Option<PathBuf>,
}

/// Runs color conversion, channel selection, clustering, canonicalization and
/// composition on an already loaded BGR image.
pub struct Segmenter<'a, C: ?Sized> {
    options: &'a SegmentationOptions,
    clustering: &'a C,
}

impl<'a, C> Segmenter<'a, C>
where
    C: Clustering + ?Sized,
{
    pub fn new(options: &'a SegmentationOptions, clustering: &'a C) -> Self {
        Segmenter {
            options,
            clustering,
        }
    }

    pub fn segment(&self, original: &PixelGrid<u8>) -> crate::Result<Segmentation> {
        if original.is_empty() {
            return Err(Error::EmptyImage);
        }
        let converted = original.convert_color_space(self.options.color_space);
        let selected = converted.select_channels(&self.options.channels)?;
        log::info!(
            "Clustering {}x{} pixels on {} {} channel(s) into {} clusters",
            selected.width(),
            selected.height(),
            selected.channels(),
            self.options.color_space,
            self.options.cluster_count.get()
        );

        let features = FeatureSet::from_grid(&selected);
        let labels = LabelGrid::assign(
            self.clustering,
            &features,
            selected.width(),
            selected.height(),
            self.options.cluster_count,
        )?;
        let canonical = CanonicalLabels::from_label_grid(&labels);
        log_cluster_sizes(canonical.counts());

        let composite =
            Compositor::new(self.options.separator_fraction).compose(original, &canonical);
        Ok(Segmentation {
            color_space: self.options.color_space,
            cluster_count: self.options.cluster_count.get(),
            labels: canonical,
            composite,
            output_file: None,
        })
    }
}

#[cfg(test)]
mod test {
    use super::{SegmentationOptions, Segmenter};
    use crate::channels::ChannelSelection;
    use crate::cluster::{ClusterCount, KMeans};
    use crate::color::ColorSpace;
    use crate::error::Error;
    use crate::grid::PixelGrid;

    const COLOR_A: [u8; 3] = [200, 30, 30];
    const COLOR_B: [u8; 3] = [10, 220, 90];

    fn create_two_color_image() -> PixelGrid<u8> {
        let samples = [COLOR_A, COLOR_B, COLOR_A, COLOR_A].concat();
        PixelGrid::new(2, 2, 3, samples)
    }

    fn create_striped_image(width: usize, height: usize) -> PixelGrid<u8> {
        let samples = (0..width * height)
            .flat_map(|index| {
                let column_index = index % width;
                match column_index * 3 / width {
                    0 => [250, 10, 10],
                    1 => [10, 250, 10],
                    _ => [10, 10, 250],
                }
            })
            .collect();
        PixelGrid::new(width, height, 3, samples)
    }

    fn options(color_space: &str, channels: &str, cluster_count: i64) -> SegmentationOptions {
        SegmentationOptions::new(
            ColorSpace::resolve(color_space),
            channels.parse().unwrap(),
            ClusterCount::new(cluster_count).unwrap(),
        )
    }

    #[test]
    fn majority_color_becomes_black() {
        let image = create_two_color_image();
        let options = options("bgr", "all", 2);
        let clustering = KMeans::default();
        let segmentation = Segmenter::new(&options, &clustering)
            .segment(&image)
            .unwrap();
        assert_eq!(segmentation.labels.grid().samples(), &[0, 255, 0, 0]);
    }

    #[test]
    fn clamped_cluster_count_is_used() {
        let image = create_two_color_image();
        let options = options("hsv", "0", 1);
        let clustering = KMeans::default();
        let segmentation = Segmenter::new(&options, &clustering)
            .segment(&image)
            .unwrap();
        assert_eq!(segmentation.cluster_count, 2);
    }

    #[test]
    fn unknown_color_space_matches_bgr() {
        let image = create_striped_image(12, 4);
        let clustering = KMeans::default();
        let unknown = options("xyz", "all", 3);
        let explicit = options("bgr", "all", 3);
        let first = Segmenter::new(&unknown, &clustering).segment(&image).unwrap();
        let second = Segmenter::new(&explicit, &clustering).segment(&image).unwrap();
        assert_eq!(first.color_space, ColorSpace::Bgr);
        assert_eq!(first.labels, second.labels);
        assert_eq!(first.composite, second.composite);
    }

    #[test]
    fn stripes_get_three_gray_levels() {
        let image = create_striped_image(12, 4);
        let options = options("lab", "all", 3);
        let clustering = KMeans::default();
        let segmentation = Segmenter::new(&options, &clustering)
            .segment(&image)
            .unwrap();
        let labels = &segmentation.labels;
        for row_index in 0..4 {
            assert_eq!(labels.intensity(0, row_index), labels.intensity(3, row_index));
            assert_eq!(labels.intensity(4, row_index), labels.intensity(7, row_index));
        }
        let mut levels: Vec<u8> = labels.grid().samples().to_vec();
        levels.sort_unstable();
        levels.dedup();
        assert_eq!(levels, vec![0, 127, 254]);
        assert_eq!(segmentation.composite.width(), 24);
    }

    #[test]
    fn out_of_range_channel_fails() {
        let image = create_two_color_image();
        let options = options("ycc", "3", 2);
        let clustering = KMeans::default();
        let result = Segmenter::new(&options, &clustering).segment(&image);
        assert!(matches!(result, Err(Error::InvalidChannelIndex(3, 3))));
    }

    #[test]
    fn empty_image_fails() {
        let image = PixelGrid::new(0, 0, 3, Vec::new());
        let options = options("bgr", "all", 2);
        let clustering = KMeans::default();
        let result = Segmenter::new(&options, &clustering).segment(&image);
        assert!(matches!(result, Err(Error::EmptyImage)));
    }

    #[test]
    fn selection_is_kept_in_options() {
        let options = options("bgr", "21", 2);
        assert_eq!(options.channels, ChannelSelection::Indices(vec![2, 1]));
    }
}
