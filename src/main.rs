use casefolio::config::{parse_value, Cli, Command, RenderFormat};
use casefolio::core::mutation;
use casefolio::utils::error::{CaseStudyError, ErrorSeverity, Result};
use casefolio::utils::{logger, validation::Validate};
use casefolio::{
    to_markdown, AppConfig, DocPath, Edit, EditSession, LocalDocumentStore, LocalImageUploader,
    Renderer,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            exit_with(e);
        }
    };

    // 初始化日誌
    if config.logging.json {
        let level = if cli.verbose {
            "debug"
        } else {
            config.logging.level.as_str()
        };
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting casefolio");
    tracing::debug!("Config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(e);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        exit_with(e);
    }
}

async fn run(command: Command, config: &AppConfig) -> Result<()> {
    let store = LocalDocumentStore::new(&config.storage.documents_dir);

    match command {
        Command::New {
            id,
            title,
            short_description,
            force,
        } => {
            let mut session = if force {
                EditSession::create(&id)
            } else {
                EditSession::create_new(&store, &id).await?
            };
            let mut edits = Vec::new();
            if let Some(title) = title {
                edits.push(Edit::Set {
                    path: DocPath::parse("title")?,
                    value: title.into(),
                });
            }
            if let Some(short_description) = short_description {
                edits.push(Edit::Set {
                    path: DocPath::parse("shortDescription")?,
                    value: short_description.into(),
                });
            }
            session.apply_all(&edits)?;
            session.save(&store).await?;
            println!("✅ Created project '{}'", id);
        }
        Command::Show { id, path } => {
            let session = EditSession::open(&store, &id).await?;
            let value = match path {
                Some(path) => mutation::get(session.document(), &DocPath::parse(&path)?)?,
                None => session.document().to_value()?,
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Set { id, path, value } => {
            let edit = Edit::Set {
                path: DocPath::parse(&path)?,
                value: parse_value(&value),
            };
            edit_and_save(&store, &id, &[edit]).await?;
        }
        Command::Append { id, path, value } => {
            let edit = Edit::Append {
                path: DocPath::parse(&path)?,
                item: parse_value(&value),
            };
            edit_and_save(&store, &id, &[edit]).await?;
        }
        Command::Replace {
            id,
            path,
            index,
            value,
        } => {
            let edit = Edit::ReplaceAt {
                path: DocPath::parse(&path)?,
                index,
                item: parse_value(&value),
            };
            edit_and_save(&store, &id, &[edit]).await?;
        }
        Command::Remove { id, path, index } => {
            let edit = Edit::RemoveAt {
                path: DocPath::parse(&path)?,
                index,
            };
            edit_and_save(&store, &id, &[edit]).await?;
        }
        Command::Apply { id, edits } => {
            let content = tokio::fs::read_to_string(&edits).await?;
            let edits: Vec<Edit> = serde_json::from_str(&content)?;
            edit_and_save(&store, &id, &edits).await?;
        }
        Command::Upload { id, path, file } => {
            let path = DocPath::parse(&path)?;
            let content = tokio::fs::read(&file).await?;
            let filename = file
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| CaseStudyError::upload_failure("file name is not valid UTF-8"))?;

            let uploader = LocalImageUploader::new(&config.uploads);
            let mut session = EditSession::open(&store, &id).await?;
            let image = session.attach_image(&uploader, &path, &content, filename).await?;
            session.save(&store).await?;
            println!("✅ Attached {} at {}", image.url, path);
        }
        Command::Render {
            id,
            format,
            section,
        } => {
            let session = EditSession::open(&store, &id).await?;
            let renderer = Renderer::new();
            let sections = match section {
                Some(key) => {
                    let data = session
                        .document()
                        .section(&key)
                        .ok_or_else(|| CaseStudyError::UnknownSection { key: key.clone() })?;
                    renderer
                        .render(&key, data, session.document())
                        .into_iter()
                        .collect()
                }
                None => session.render(&renderer),
            };
            tracing::debug!("Rendered {} section(s)", sections.len());
            match format {
                RenderFormat::Json => println!("{}", serde_json::to_string_pretty(&sections)?),
                RenderFormat::Markdown => print!("{}", to_markdown(&sections)),
            }
        }
        Command::List => {
            for id in store.list_ids().await? {
                println!("{}", id);
            }
        }
    }
    Ok(())
}

async fn edit_and_save(store: &LocalDocumentStore, id: &str, edits: &[Edit]) -> Result<()> {
    let mut session = EditSession::open(store, id).await?;
    let applied = session.apply_all(edits)?;
    if session.is_dirty() {
        session.save(store).await?;
        println!("✅ Applied {} edit(s) to '{}'", applied, id);
    } else {
        println!("ℹ️  No changes to '{}'", id);
    }
    Ok(())
}

fn exit_with(e: CaseStudyError) -> ! {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
