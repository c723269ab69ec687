use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sonos_sdk::logging::{self, LoggingMode};
use sonos_sdk::{Action, DefaultRemote, RemoteConfig, STATUS_OK};
use tracing::{error, info};

/// Sonos remote
///
/// Drives one player, found by its identity. The address of the player is
/// cached between runs and rediscovered when it stops answering.
#[derive(Parser, Debug)]
#[command(name = "sonos-remote")]
#[command(about = "Control a single Sonos player from the command line")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (JSON); defaults to <config dir>/sonos-remote/config.json
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Identity of the player to control, e.g. RINCON_000E58A0123456
    #[arg(short, long, global = true)]
    pub uid: Option<String>,

    /// Session cache file
    #[arg(long, global = true)]
    pub cache: Option<PathBuf>,

    /// Logging mode (silent, development, debug); SONOS_LOG_MODE when unset
    #[arg(long, global = true)]
    pub log_mode: Option<String>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pause if playing, otherwise play
    #[command(alias = "play-pause")]
    Toggle,
    /// Skip to the next track
    #[command(alias = "skip")]
    Next,
    /// Raise the volume by one step
    #[command(alias = "up")]
    VolumeUp,
    /// Lower the volume by one step
    #[command(alias = "down")]
    VolumeDown,
    /// Resolve the player now and print its address
    Discover,
    /// Drop the cached address
    Forget,
}

impl Command {
    /// The remote action behind this command, if it is one
    pub fn action(self) -> Option<Action> {
        match self {
            Command::Toggle => Some(Action::TogglePlayback),
            Command::Next => Some(Action::Next),
            Command::VolumeUp => Some(Action::VolumeUp),
            Command::VolumeDown => Some(Action::VolumeDown),
            Command::Discover | Command::Forget => None,
        }
    }
}

impl Args {
    /// Layer the config file, the environment and then these flags
    pub fn config(&self) -> Result<RemoteConfig> {
        let mut config = RemoteConfig::load(self.config.as_deref())
            .context("Failed to load configuration")?
            .with_env();

        if let Some(uid) = &self.uid {
            config.target_uid = uid.trim().to_string();
        }
        if let Some(cache) = &self.cache {
            config.cache_path = Some(cache.clone());
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn init_tracing(args: &Args) -> Result<()> {
    let result = match &args.log_mode {
        Some(mode) => logging::init_logging(logging::mode_from_str(mode)),
        None => logging::init_logging_from_env(LoggingMode::Silent),
    };
    result.context("Failed to initialize logging")
}

/// Run `command`; the returned code is 0 on success
fn run(command: Command, config: &RemoteConfig) -> Result<i32> {
    let remote = DefaultRemote::from_config(config).context("Failed to start remote")?;

    match command {
        Command::Discover => match remote.ensure_resolved() {
            Ok(address) => {
                println!("{}", address);
                Ok(STATUS_OK)
            }
            Err(e) => {
                eprintln!("Discovery failed: {}", e);
                Ok(e.status_code())
            }
        },
        Command::Forget => {
            remote.forget().context("Failed to clear the session cache")?;
            info!("Session cache cleared");
            Ok(STATUS_OK)
        }
        Command::Toggle | Command::Next | Command::VolumeUp | Command::VolumeDown => {
            let action = command.action().context("Command has no action")?;
            match remote.dispatch(action) {
                Ok(outcome) => {
                    println!("{}", outcome);
                    Ok(STATUS_OK)
                }
                Err(e) => {
                    error!(%action, error = %e, "Action failed");
                    eprintln!("{} failed: {}", action, e);
                    Ok(e.status_code())
                }
            }
        }
    }
}

/// Exit statuses are a byte; HTTP statuses above 255 report as 1
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_tracing(&args) {
        eprintln!("{:#}", e);
    }

    let outcome = args.config().and_then(|config| run(args.command, &config));
    match outcome {
        Ok(code) => ExitCode::from(exit_status(code)),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_status(sonos_sdk::CONNECT_FAILURE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&["sonos-remote", "toggle"], Command::Toggle)]
    #[case(&["sonos-remote", "play-pause"], Command::Toggle)]
    #[case(&["sonos-remote", "skip"], Command::Next)]
    #[case(&["sonos-remote", "volume-up"], Command::VolumeUp)]
    #[case(&["sonos-remote", "down"], Command::VolumeDown)]
    #[case(&["sonos-remote", "discover"], Command::Discover)]
    #[case(&["sonos-remote", "forget"], Command::Forget)]
    fn test_parse_command(#[case] argv: &[&str], #[case] expected: Command) {
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.command, expected);
    }

    #[test]
    fn test_global_flags_after_command() {
        let argv = ["sonos-remote", "next", "--uid", "RINCON_B", "--cache", "/tmp/s.json"];
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.uid.as_deref(), Some("RINCON_B"));
        assert_eq!(args.cache, Some(PathBuf::from("/tmp/s.json")));
    }

    #[test]
    fn test_actions() {
        assert_eq!(Command::Toggle.action(), Some(Action::TogglePlayback));
        assert_eq!(Command::VolumeDown.action(), Some(Action::VolumeDown));
        assert_eq!(Command::Discover.action(), None);
        assert_eq!(Command::Forget.action(), None);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(11, 11)]
    #[case(404, 1)]
    #[case(500, 1)]
    fn test_exit_status(#[case] code: i32, #[case] expected: u8) {
        assert_eq!(exit_status(code), expected);
    }

    #[test]
    fn test_missing_command_is_rejected() {
        assert!(Args::try_parse_from(["sonos-remote"]).is_err());
    }
}
