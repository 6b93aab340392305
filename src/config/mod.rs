pub mod toml_config;

pub use toml_config::{AppConfig, LoggingConfig, StorageConfig, UploadsConfig};

#[cfg(feature = "cli")]
pub use cli::{Cli, Command, RenderFormat};

/// 參數值先當 JSON 解析，失敗時視為純文字
pub fn parse_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

#[cfg(feature = "cli")]
mod cli {
    use clap::{Parser, Subcommand, ValueEnum};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "casefolio")]
    #[command(about = "Author portfolio case studies section by section")]
    pub struct Cli {
        #[arg(long, global = true, default_value = "casefolio.toml")]
        pub config: PathBuf,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Create a new project with every section disabled
        New {
            id: String,
            #[arg(long)]
            title: Option<String>,
            #[arg(long)]
            short_description: Option<String>,
            #[arg(long, help = "Replace an existing project with the same id")]
            force: bool,
        },
        /// Print the normalized document, or the value at a path
        Show {
            id: String,
            path: Option<String>,
        },
        /// Set the value at a path (JSON, or plain text)
        Set {
            id: String,
            path: String,
            value: String,
        },
        /// Append an item to a list
        Append {
            id: String,
            path: String,
            value: String,
        },
        /// Replace the item at an index
        Replace {
            id: String,
            path: String,
            index: usize,
            value: String,
        },
        /// Remove the item at an index
        Remove {
            id: String,
            path: String,
            index: usize,
        },
        /// Apply a JSON array of edits all-or-nothing
        Apply {
            id: String,
            #[arg(long)]
            edits: PathBuf,
        },
        /// Upload an image and attach it at a path
        Upload {
            id: String,
            path: String,
            file: PathBuf,
        },
        /// Render enabled sections
        Render {
            id: String,
            #[arg(long, value_enum, default_value = "json")]
            format: RenderFormat,
            #[arg(long)]
            section: Option<String>,
        },
        /// List stored project ids
        List,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum RenderFormat {
        Json,
        Markdown,
    }

    impl Command {
        pub fn project_id(&self) -> Option<&str> {
            match self {
                Command::New { id, .. }
                | Command::Show { id, .. }
                | Command::Set { id, .. }
                | Command::Append { id, .. }
                | Command::Replace { id, .. }
                | Command::Remove { id, .. }
                | Command::Apply { id, .. }
                | Command::Upload { id, .. }
                | Command::Render { id, .. } => Some(id),
                Command::List => None,
            }
        }
    }
}
