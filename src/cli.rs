use crate::channels::ChannelSelection;
use crate::error::Error;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgAction, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_image_argument(command);
        let command = Self::register_width_argument(command);
        let command = Self::register_color_space_argument(command);
        let command = Self::register_channels_argument(command);
        let command = Self::register_num_clusters_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_output_format_argument(command);
        let command = Self::register_output_dir_argument(command);
        let command = Self::register_composite_argument(command);
        Self::register_clustering_arguments(command)
    }

    fn register_image_argument(command: Command) -> Command {
        command.arg(Self::create_image_argument())
    }

    fn register_width_argument(command: Command) -> Command {
        command.arg(Self::create_width_argument())
    }

    fn register_color_space_argument(command: Command) -> Command {
        command.arg(Self::create_color_space_argument())
    }

    fn register_channels_argument(command: Command) -> Command {
        command.arg(Self::create_channels_argument())
    }

    fn register_num_clusters_argument(command: Command) -> Command {
        command.arg(Self::create_num_clusters_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_output_format_argument(command: Command) -> Command {
        command.arg(Self::create_output_format_argument())
    }

    fn register_output_dir_argument(command: Command) -> Command {
        command.arg(Self::create_output_dir_argument())
    }

    fn register_composite_argument(command: Command) -> Command {
        command.arg(Self::create_composite_argument())
    }

    fn register_clustering_arguments(command: Command) -> Command {
        command
            .arg(Self::create_seed_argument())
            .arg(Self::create_restarts_argument())
            .arg(Self::create_max_iterations_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_image_argument() -> Arg {
        Arg::new("image")
            .short('i')
            .long("image")
            .value_name("PATH")
            .help("Path to image file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_width_argument() -> Arg {
        arg!(-w --width <WIDTH> "Width to resize image to in pixels, 0 keeps the original size")
            .default_value("0")
            .required(false)
            .value_parser(value_parser!(u32))
    }

    fn create_color_space_argument() -> Arg {
        Arg::new("color_space")
            .short('s')
            .long("color-space")
            .value_name("SPACE")
            .help("Color space to use: BGR (default), HSV, Lab, YCrCb (YCC). Unknown names fall back to BGR")
            .default_value("bgr")
    }

    fn create_channels_argument() -> Arg {
        Arg::new("channels")
            .short('c')
            .long("channels")
            .value_name("CHANNELS")
            .help("Channel indices to use for clustering, e.g. \"02\" selects the first and third channel (default \"all\")")
            .default_value("all")
            .value_parser(parse_channel_selection)
    }

    fn create_num_clusters_argument() -> Arg {
        Arg::new("num_clusters")
            .short('n')
            .long("num-clusters")
            .value_name("K")
            .help("Number of clusters for k-means clustering (default 3, min 2)")
            .default_value("3")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i64))
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .short('o')
            .long("output-file")
            .help("Save the clustering result to disk under a timestamped name")
            .action(ArgAction::SetTrue)
    }

    fn create_output_format_argument() -> Arg {
        Arg::new("output_format")
            .short('f')
            .long("output-format")
            .value_name("FORMAT")
            .help("File extension for the output image")
            .default_value("png")
    }

    fn create_output_dir_argument() -> Arg {
        Arg::new("output_dir")
            .short('d')
            .long("output-dir")
            .value_name("DIR")
            .help("Directory the output image is written to")
            .default_value(".")
            .value_parser(value_parser!(PathBuf))
    }

    fn create_composite_argument() -> Arg {
        Arg::new("composite")
            .long("composite")
            .value_name("PATH")
            .help("Also save the side-by-side comparison of original and clustering result")
            .value_parser(value_parser!(PathBuf))
    }

    fn create_seed_argument() -> Arg {
        arg!(--seed <SEED> "Seed for the k-means initialization")
            .default_value("0")
            .required(false)
            .value_parser(value_parser!(u64))
    }

    fn create_restarts_argument() -> Arg {
        arg!(--restarts <RUNS> "Number of k-means runs, the best one is kept")
            .default_value("40")
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn create_max_iterations_argument() -> Arg {
        Arg::new("max_iterations")
            .long("max-iterations")
            .value_name("ITERATIONS")
            .help("Maximum number of iterations per k-means run")
            .default_value("500")
            .value_parser(value_parser!(usize))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            image: Self::extract_image_argument(matches),
            width: Self::extract_width_argument(matches),
            color_space: Self::extract_color_space_argument(matches),
            channels: Self::extract_channels_argument(matches),
            num_clusters: Self::extract_num_clusters_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            output_format: Self::extract_output_format_argument(matches),
            output_dir: Self::extract_output_dir_argument(matches),
            composite: Self::extract_composite_argument(matches),
            seed: Self::extract_seed_argument(matches),
            restarts: Self::extract_restarts_argument(matches),
            max_iterations: Self::extract_max_iterations_argument(matches),
        }
    }

    fn extract_image_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("image")
            .expect("Required argument image not provided")
            .clone()
    }

    fn extract_width_argument(matches: &ArgMatches) -> u32 {
        matches
            .get_one::<u32>("width")
            .expect("Width must be provided, but was unset.")
            .to_owned()
    }

    fn extract_color_space_argument(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("color_space")
            .expect("Color space must be provided, but was unset.")
            .clone()
    }

    fn extract_channels_argument(matches: &ArgMatches) -> ChannelSelection {
        matches
            .get_one::<ChannelSelection>("channels")
            .expect("Channels must be provided, but were unset.")
            .clone()
    }

    fn extract_num_clusters_argument(matches: &ArgMatches) -> i64 {
        matches
            .get_one::<i64>("num_clusters")
            .expect("Number of clusters must be provided, but was unset.")
            .to_owned()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("output_file")
    }

    fn extract_output_format_argument(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("output_format")
            .expect("Output format must be provided, but was unset.")
            .clone()
    }

    fn extract_output_dir_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_dir")
            .expect("Output directory must be provided, but was unset.")
            .clone()
    }

    fn extract_composite_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("composite").cloned()
    }

    fn extract_seed_argument(matches: &ArgMatches) -> u64 {
        matches
            .get_one::<u64>("seed")
            .expect("Seed must be provided, but was unset.")
            .to_owned()
    }

    fn extract_restarts_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("restarts")
            .expect("Number of restarts must be provided, but was unset.")
            .to_owned()
    }

    fn extract_max_iterations_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("max_iterations")
            .expect("Maximum iterations must be provided, but were unset.")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_channel_selection(value: &str) -> Result<ChannelSelection, Error> {
    value.parse()
}
