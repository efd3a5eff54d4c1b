use std::env::args_os;
use std::process::ExitCode;

use kmeans_segmenter::{segment_image, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match segment_image(&arguments) {
        Ok(segmentation) => {
            println!(
                "Segmentation successful: {} clusters in {} color space",
                segmentation.cluster_count, segmentation.color_space
            );
            if let Some(path) = &segmentation.output_file {
                println!("Clustering result written to '{}'", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Segmentation failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
