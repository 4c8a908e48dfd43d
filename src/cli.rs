use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use clap_complete::{generate, shells};

use crate::error::GostError;

/// Options for a single run, parsed once from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub file: Option<PathBuf>,
    pub clip: bool,
    pub name: Option<String>,
    pub description: String,
    pub token: Option<String>,
    pub public: bool,
    pub paste: bool,    // accepted, has no effect
    pub copy_url: bool, // also write the created URL to the clipboard
}

impl Config {
    /// Parse the process arguments. `--help`, `--version` and `--completions`
    /// print their output and exit 0 here; any other parse failure is returned.
    pub fn from_args() -> Result<Self, GostError> {
        let matches = match Self::build_cli().try_get_matches() {
            Ok(matches) => matches,
            Err(e) => return Err(Self::handle_parse_error(e)),
        };

        if let Some(shell) = matches.get_one::<String>("completions") {
            Self::handle_completions(shell);
            std::process::exit(0);
        }

        Ok(Self::from_matches(&matches))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            file: matches.get_one::<PathBuf>("file").cloned(),
            clip: matches.get_flag("clip"),
            name: matches.get_one::<String>("name").cloned(),
            description: matches
                .get_one::<String>("description")
                .cloned()
                .unwrap_or_default(),
            token: matches.get_one::<String>("token").cloned(),
            public: matches.get_flag("public"),
            paste: matches.get_flag("paste"),
            copy_url: matches.get_flag("copy-url"),
        }
    }

    fn handle_parse_error(e: clap::Error) -> GostError {
        use clap::error::ErrorKind;

        match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                std::process::exit(0);
            }
            _ => GostError::ArgumentParse(e.render().to_string().trim_end().to_string()),
        }
    }

    pub(crate) fn build_cli() -> Command {
        Command::new("gost")
            .version(env!("GOST_VERSION"))
            .about("Gost - A simple command line utility for easily creating Gists for Github")
            .disable_version_flag(true)
            .next_help_heading("Input Options")
            .arg(
                Arg::new("file")
                    .short('f')
                    .long("file")
                    .help("Create a Gist from file")
                    .value_name("FILE")
                    .value_parser(clap::value_parser!(PathBuf))
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("clip")
                    .short('c')
                    .long("clip")
                    .help("Create a Gist from the contents of your clipboard")
                    .action(ArgAction::SetTrue),
            )
            .next_help_heading("Gist Options")
            .arg(
                Arg::new("name")
                    .short('n')
                    .long("name")
                    .help("Optional name for your new Gist")
                    .value_name("NAME")
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("description")
                    .short('d')
                    .long("description")
                    .help("Optional description for your new Gist")
                    .value_name("DESCRIPTION")
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("token")
                    .short('t')
                    .long("token")
                    .help("Optional Github API authentication token. Falls back to the GOST environment variable. If both are absent, your Gist will be created anonymously")
                    .value_name("TOKEN")
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("public")
                    .short('p')
                    .long("public")
                    .help("Make this Gist public [default: false]")
                    .action(ArgAction::SetTrue),
            )
            .next_help_heading("Other Options")
            .arg(
                Arg::new("paste")
                    .short('P')
                    .long("paste")
                    .help("Reserved; currently has no effect")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("copy-url")
                    .long("copy-url")
                    .help("Also copy the new Gist URL to your clipboard. On X11/Wayland the copy outlives gost only when a clipboard manager is running")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("completions")
                    .long("completions")
                    .help("Generate shell completion script")
                    .value_name("SHELL")
                    .value_parser(["bash", "zsh", "fish", "powershell"])
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("version")
                    .short('v')
                    .long("version")
                    .help("Displays the current version of Gost")
                    .action(ArgAction::Version),
            )
    }

    fn handle_completions(shell: &str) {
        let mut cmd = Self::build_cli();
        let bin_name = "gost";

        match shell {
            "bash" => generate(shells::Bash, &mut cmd, bin_name, &mut std::io::stdout()),
            "zsh" => generate(shells::Zsh, &mut cmd, bin_name, &mut std::io::stdout()),
            "fish" => generate(shells::Fish, &mut cmd, bin_name, &mut std::io::stdout()),
            "powershell" => generate(
                shells::PowerShell,
                &mut cmd,
                bin_name,
                &mut std::io::stdout(),
            ),
            _ => eprintln!("Unsupported shell: {}", shell),
        }
    }
}
