use crate::view::DEFAULT_CANVAS_SIZE;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgAction, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

const EXPORT_SUBCOMMAND: &str = "export";
const VIEW_SUBCOMMAND: &str = "view";

pub struct ExportArguments {
    pub(crate) image_file: PathBuf,
    pub(crate) output_directory: PathBuf,
    pub(crate) grayscale: bool,
}

pub struct ViewArguments {
    pub(crate) array_file: PathBuf,
    pub(crate) output_file: Option<PathBuf>,
    pub(crate) canvas_size: u32,
}

pub enum Action {
    Export(ExportArguments),
    View(ViewArguments),
}

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_subcommands(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Action
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_action(&matches)
    }

    fn register_subcommands(command: Command) -> Command {
        command
            .subcommand(Self::create_export_subcommand())
            .subcommand(Self::create_view_subcommand())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
            .subcommand_required(true)
            .arg_required_else_help(true)
    }

    fn create_export_subcommand() -> Command {
        let command = Command::new(EXPORT_SUBCOMMAND)
            .about("Export an image as numerical arrays, archives and pixel tables");
        let command = Self::register_image_file_argument(command);
        let command = Self::register_output_directory_argument(command);
        Self::register_grayscale_argument(command)
    }

    fn create_view_subcommand() -> Command {
        let command =
            Command::new(VIEW_SUBCOMMAND).about("Render a numerical array file as an image");
        let command = Self::register_array_file_argument(command);
        let command = Self::register_output_file_argument(command);
        Self::register_canvas_size_argument(command)
    }

    fn register_image_file_argument(command: Command) -> Command {
        command.arg(Self::create_image_file_argument())
    }

    fn register_output_directory_argument(command: Command) -> Command {
        command.arg(Self::create_output_directory_argument())
    }

    fn register_grayscale_argument(command: Command) -> Command {
        command.arg(Self::create_grayscale_argument())
    }

    fn register_array_file_argument(command: Command) -> Command {
        command.arg(Self::create_array_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_canvas_size_argument(command: Command) -> Command {
        command.arg(Self::create_canvas_size_argument())
    }

    fn create_image_file_argument() -> Arg {
        Arg::new("image_file")
            .help("Path to PNG, JPEG, BMP or TIFF input image")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_directory_argument() -> Arg {
        Arg::new("output_directory")
            .help("Directory receiving the exported files, created if missing")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_grayscale_argument() -> Arg {
        arg!(grayscale: -g --grayscale "Also export a grayscale array and pixel table")
            .action(ArgAction::SetTrue)
    }

    fn create_array_file_argument() -> Arg {
        Arg::new("array_file")
            .help("Path to a .json, .npy, .txt or .csv array file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        arg!(output_file: -o --output <PNG> "Where to save the rendered image")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn create_canvas_size_argument() -> Arg {
        arg!(canvas_size: -s --size <PIXELS> "Edge length of the square canvas")
            .default_value(DEFAULT_CANVAS_SIZE.to_string())
            .required(false)
            .value_parser(value_parser!(u32).range(1..))
    }

    fn extract_action(matches: &ArgMatches) -> Action {
        match matches.subcommand() {
            Some((VIEW_SUBCOMMAND, matches)) => Action::View(Self::extract_view_arguments(matches)),
            Some((EXPORT_SUBCOMMAND, matches)) => {
                Action::Export(Self::extract_export_arguments(matches))
            }
            _ => unreachable!("A subcommand is required"),
        }
    }

    fn extract_export_arguments(matches: &ArgMatches) -> ExportArguments {
        ExportArguments {
            image_file: Self::extract_image_file_argument(matches),
            output_directory: Self::extract_output_directory_argument(matches),
            grayscale: Self::extract_grayscale_argument(matches),
        }
    }

    fn extract_view_arguments(matches: &ArgMatches) -> ViewArguments {
        ViewArguments {
            array_file: Self::extract_array_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            canvas_size: Self::extract_canvas_size_argument(matches),
        }
    }

    fn extract_image_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("image_file")
            .expect("Required argument image_file not provided")
            .clone()
    }

    fn extract_output_directory_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_directory")
            .expect("Required argument output_directory not provided")
            .clone()
    }

    fn extract_grayscale_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("grayscale")
    }

    fn extract_array_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("array_file")
            .expect("Required argument array_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("output_file").cloned()
    }

    fn extract_canvas_size_argument(matches: &ArgMatches) -> u32 {
        matches
            .get_one::<u32>("canvas_size")
            .expect("Canvas size must be provided, but was unset.")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}
