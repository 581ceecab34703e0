use clap::Arg;
use clap::ArgAction;
use clap::Command;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

fn arg_backend_url() -> Arg {
    return Arg::new(ConfigKey::BackendUrl.to_string())
        .long(ConfigKey::BackendUrl.to_string())
        .short('b')
        .env("ARAMA_BACKEND_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the chat backend. Requests go to <URL>/api/chat [default: {}]",
            Config::default(ConfigKey::BackendUrl)
        ));
}

fn arg_request_timeout() -> Arg {
    return Arg::new(ConfigKey::RequestTimeout.to_string())
        .long(ConfigKey::RequestTimeout.to_string())
        .env("ARAMA_REQUEST_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Seconds to wait for the backend before a message counts as failed [default: {}]",
            Config::default(ConfigKey::RequestTimeout)
        ));
}

fn arg_log_level() -> Arg {
    return Arg::new(ConfigKey::LogLevel.to_string())
        .long(ConfigKey::LogLevel.to_string())
        .env("ARAMA_LOG_LEVEL")
        .num_args(1)
        .value_parser(["error", "warn", "info", "debug", "trace"])
        .help(format!(
            "Log verbosity written to the log file [default: {}]",
            Config::default(ConfigKey::LogLevel)
        ));
}

fn arg_config_file() -> Arg {
    return Arg::new(ConfigKey::ConfigFile.to_string())
        .long(ConfigKey::ConfigFile.to_string())
        .short('c')
        .env("ARAMA_CONFIG_FILE")
        .num_args(1)
        .help(format!(
            "Path to configuration file [default: {}]",
            Config::default(ConfigKey::ConfigFile)
        ));
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options")
        .subcommand(Command::new("default").about("Outputs the default configuration file"))
        .subcommand(Command::new("path").about("Outputs the path of the configuration file"))
        .arg_required_else_help(true);
}

pub fn build() -> Command {
    let about = "Chat with the arama search assistant from your terminal.";

    return Command::new("arama")
        .about(about)
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .arg(arg_backend_url())
        .arg(arg_request_timeout())
        .arg(arg_log_level())
        .arg(arg_config_file())
        .arg(
            Arg::new("ask")
                .long("ask")
                .short('a')
                .num_args(1)
                .action(ArgAction::Set)
                .help("Send a single message, print the reply and exit"),
        )
        .subcommand(subcommand_config());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_valid() {
        build().debug_assert();
    }

    #[test]
    fn test_parses_ask_mode() {
        let matches = build()
            .try_get_matches_from(vec!["arama", "--ask", "Weather?", "-b", "http://x:1"])
            .unwrap();

        assert_eq!(matches.get_one::<String>("ask").unwrap(), "Weather?");
        assert_eq!(
            matches.get_one::<String>("backend-url").unwrap(),
            "http://x:1"
        );
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let res = build().try_get_matches_from(vec!["arama", "--log-level", "loud"]);
        assert!(res.is_err());
    }
}
