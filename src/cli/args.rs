//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Forward desktop notifications to FCM, Pushbullet and ntfy
#[derive(Parser, Debug)]
#[command(name = "notify-forwarder")]
#[command(version)]
#[command(about = "Forward desktop notifications to FCM, Pushbullet and ntfy")]
#[command(long_about = None)]
pub struct Cli {
    /// Use this config file instead of the XDG default
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Run a single poll cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Poll interval (e.g., 500ms, 2s, 1m)
    #[arg(short = 'i', long, value_name = "TIME")]
    pub interval: Option<String>,

    /// Ignore notifications already in the store at startup
    #[arg(long)]
    pub skip_backlog: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Test the connection of every configured provider
    Test {
        /// Only test this provider (fcm, pushbullet, ntfy)
        #[arg(long, value_name = "NAME")]
        provider: Option<String>,
    },
    /// Send a message through every configured provider
    Send {
        /// Message title
        title: String,
        /// Message body
        #[arg(default_value = "")]
        body: String,
        /// Source application shown to providers
        #[arg(long, value_name = "NAME")]
        app: Option<String>,
    },
    /// Check the config, notification source and providers
    Diagnose,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "poll_interval",
    "seen_capacity",
    "skip_backlog",
    "source.kind",
    "source.snapshot_path",
    "source.dunst_command",
    "filter.whitelist_apps",
    "filter.ignored_apps",
    "fcm.enabled",
    "fcm.service_account_file",
    "fcm.topic",
    "pushbullet.enabled",
    "pushbullet.api_token",
    "ntfy.enabled",
    "ntfy.server_url",
    "ntfy.topic",
    "ntfy.username",
    "ntfy.password",
    "log.level",
    "log.file",
];

/// Keys whose values are masked when displayed
pub const SECRET_CONFIG_KEYS: &[&str] = &["pushbullet.api_token", "ntfy.password"];

pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["notify-forwarder"]);
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
        assert!(!cli.once);
        assert!(cli.interval.is_none());
        assert!(!cli.skip_backlog);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_loop_flags() {
        let cli = Cli::parse_from([
            "notify-forwarder",
            "--once",
            "-i",
            "2s",
            "--skip-backlog",
            "-v",
        ]);
        assert!(cli.once);
        assert_eq!(cli.interval.as_deref(), Some("2s"));
        assert!(cli.skip_backlog);
        assert!(cli.verbose);
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["notify-forwarder", "test", "--config", "/tmp/c.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(cli.command, Some(Commands::Test { provider: None })));
    }

    #[test]
    fn cli_parses_send() {
        let cli = Cli::parse_from(["notify-forwarder", "send", "Hello", "--app", "Shell"]);
        match cli.command {
            Some(Commands::Send { title, body, app }) => {
                assert_eq!(title, "Hello");
                assert_eq!(body, "");
                assert_eq!(app.as_deref(), Some("Shell"));
            }
            other => panic!("Expected Send command, got {:?}", other),
        }
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["notify-forwarder", "config", "set", "ntfy.topic", "laptop"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "ntfy.topic");
            assert_eq!(value, "laptop");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("poll_interval"));
        assert!(is_valid_config_key("ntfy.password"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
