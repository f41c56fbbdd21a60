use academy_application::AdminConsole;
use academy_core::config::AcademyConfig;
use academy_infrastructure::ConfigService;
use anyhow::{Context, Result, bail};
use clap::Subcommand;
use colored::Colorize;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Print where files are kept
    Paths,
    /// Write a config file with the defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(console: &AdminConsole, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let rendered = toml::to_string_pretty(console.config())
                .context("Failed to render configuration")?;
            println!("{}", format!("# {}", console.config_path().display()).bright_black());
            println!("{}", rendered.trim_end());
            println!(
                "{}",
                format!("# effective base_url = {}", console.base_url()).bright_black()
            );
        }
        ConfigCommand::Paths => {
            let paths = console.paths();
            println!("{:<8} {}", "config", console.config_path().display());
            println!("{:<8} {}", "session", paths.session_dir().display());
            println!("{:<8} {}", "logs", paths.logs_dir().display());
            println!("{:<8} {}", "exports", console.export_dir().display());
        }
        ConfigCommand::Init { force } => {
            let path = console.config_path();
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            ConfigService::new(path.to_path_buf()).save(&AcademyConfig::default())?;
            println!("{}", format!("Wrote {}", path.display()).green());
        }
    }
    Ok(())
}
