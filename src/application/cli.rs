use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::HistoryStore;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

fn hotkeys_text() -> String {
    let text = r#"
HOTKEYS:
- Enter - Submit your prompt.
- CTRL+N - Start a new conversation. Press twice to confirm; the saved history is cleared.
- CTRL+C - Exit.
- Up arrow / Down arrow - Scroll.
- CTRL+U / CTRL+D - Page up, page down.
    "#;

    return text.trim().to_string();
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_history() -> Command {
    return Command::new("history")
        .about("Manage the saved conversation.")
        .arg_required_else_help(true)
        .subcommand(Command::new("path").about("Print the path of the saved conversation file."))
        .subcommand(Command::new("clear").about("Delete the saved conversation."));
}

fn arg_model() -> Arg {
    return Arg::new(ConfigKey::Model.to_string())
        .short('m')
        .long(ConfigKey::Model.to_string())
        .env("FCI_MODEL")
        .num_args(1)
        .help(format!(
            "The Gemini model answering the chat. [default: {}]",
            Config::default(ConfigKey::Model)
        ));
}

fn arg_username() -> Arg {
    return Arg::new(ConfigKey::Username.to_string())
        .short('u')
        .long(ConfigKey::Username.to_string())
        .env("FCI_USERNAME")
        .num_args(1)
        .help("Your name as displayed in chat bubbles. Defaults to your system username.");
}

fn arg_gemini_token() -> Arg {
    return Arg::new(ConfigKey::GeminiToken.to_string())
        .long(ConfigKey::GeminiToken.to_string())
        .env("GEMINI_API_KEY")
        .num_args(1)
        .help("Gemini API key. Required to chat.");
}

fn arg_gemini_url() -> Arg {
    return Arg::new(ConfigKey::GeminiURL.to_string())
        .long(ConfigKey::GeminiURL.to_string())
        .env("FCI_GEMINI_URL")
        .num_args(1)
        .help(format!(
            "Gemini API URL. Can be swapped to a compatible proxy. [default: {}]",
            Config::default(ConfigKey::GeminiURL)
        ));
}

fn arg_history_dir() -> Arg {
    return Arg::new(ConfigKey::HistoryDir.to_string())
        .long(ConfigKey::HistoryDir.to_string())
        .env("FCI_HISTORY_DIR")
        .num_args(1)
        .help(format!(
            "Directory the conversation history is saved to. [default: {}]",
            Config::default(ConfigKey::HistoryDir)
        ))
        .global(true);
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("fci-assistant")
        .about(about)
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(hotkeys_text())
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_history())
        .arg(arg_model())
        .arg(arg_username())
        .arg(arg_gemini_token())
        .arg(arg_gemini_url())
        .arg(arg_history_dir())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("FCI_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("history", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            match subcmd_matches.subcommand() {
                Some(("path", _)) => {
                    let file_path = HistoryStore::default()
                        .file_path()
                        .to_string_lossy()
                        .to_string();
                    println!("{file_path}");
                }
                Some(("clear", _)) => {
                    HistoryStore::default().clear().await?;
                    println!("Cleared the saved conversation.");
                }
                _ => {
                    subcommand_history().print_long_help()?;
                }
            }
            return Ok(false);
        }
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
