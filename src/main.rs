use std::env::args_os;
use std::process::ExitCode;

use image_array_tools::{
    export_image, format_shape, view_array, Action, CLIParser, ViewOutcome,
};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    match cli_parser.parse(args_os()) {
        Action::Export(arguments) => match export_image(&arguments) {
            Ok(report) => {
                println!(
                    "Conversion done! Files saved in: {}",
                    report.output_directory().display()
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Conversion failed because of: {}", e);
                ExitCode::FAILURE
            }
        },
        Action::View(arguments) => match view_array(&arguments) {
            Ok(ViewOutcome::Rendered(path)) => {
                println!("Rendered image saved to: {}", path.display());
                ExitCode::SUCCESS
            }
            Ok(ViewOutcome::UnexpectedShape(shape)) => {
                eprintln!("Warning: Unexpected data shape: {}", format_shape(&shape));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to load file:\n{}", e);
                ExitCode::FAILURE
            }
        },
    }
}
