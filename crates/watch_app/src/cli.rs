use std::path::PathBuf;

use clap::Parser;

/// Watches the listing page and announces newly published episodes on Discord.
#[derive(Parser, Debug)]
#[command(name = "anime_watch", version)]
pub struct Cli {
    /// Settings file (RON).
    #[arg(short, long, default_value = "settings.ron")]
    pub config: PathBuf,

    /// Run a single check and exit instead of polling.
    #[arg(long)]
    pub once: bool,

    /// Also write the log to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_polling_with_local_settings() {
        let cli = Cli::try_parse_from(["anime_watch"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("settings.ron"));
        assert!(!cli.once);
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn accepts_one_shot_run() {
        let cli = Cli::try_parse_from(["anime_watch", "-c", "prod.ron", "--once", "--log-file", "w.log"])
            .unwrap();
        assert_eq!(cli.config, PathBuf::from("prod.ron"));
        assert!(cli.once);
        assert_eq!(cli.log_file, Some(PathBuf::from("w.log")));
    }
}
