mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use config::AppConfig;
use pdfpreview_adapters::{
    load_settings, present_artifact, present_source_row, AsciiTransliterator, FsPreviewStorage,
    FsSourceFileStore, HtmlPresenter, ImageCrateProbe, ImageMagickRasterizer, SchemeRoots,
    SqliteFileCatalog, WalkdirPdfScanner,
};
use pdfpreview_application::{
    ApplicationError, ApplicationService, CacheOptions, DeleteFileCommand, ImportFolderCommand,
    ListFilesCommand, PreviewCacheService, PreviewFileCommand, RenderFilesCommand,
    SettingsSummaryQuery, TouchFileCommand,
};
use pdfpreview_domain::SourceId;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::init_logging();
    let args: Vec<String> = std::env::args().collect();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("invalid configuration: {msg}");
            return ExitCode::from(2);
        }
    };

    let service = match build_application_service(&config) {
        Ok(service) => service,
        Err(error) => {
            eprintln!("failed to start pdfpreview: {error}");
            return ExitCode::from(1);
        }
    };
    if let Err(error) = service.bootstrap() {
        eprintln!("failed to bootstrap pdfpreview: {error}");
        return ExitCode::from(1);
    }

    let command = parse_command(&args);
    match run_command(command, &service, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            print_usage();
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn build_application_service(config: &AppConfig) -> Result<ApplicationService, ApplicationError> {
    let settings = load_settings(&config.settings_path)?;
    let schemes = SchemeRoots::new().with_root("public", config.public_root.clone());
    let sources = Arc::new(FsSourceFileStore::new(schemes.clone(), config.hash_content));

    let cache = Arc::new(PreviewCacheService::new(
        sources.clone(),
        Arc::new(FsPreviewStorage::new(schemes)),
        Arc::new(ImageMagickRasterizer::new(
            config.converter.clone(),
            config.engine_timeout,
        )),
        Arc::new(AsciiTransliterator),
        Arc::new(ImageCrateProbe),
        CacheOptions {
            scheme: "public".to_string(),
            langcode: config.langcode.clone(),
            settings,
        },
    ));

    Ok(ApplicationService::new(
        Box::new(SqliteFileCatalog::new(config.catalog_path.clone())),
        Box::new(WalkdirPdfScanner),
        sources,
        cache,
    ))
}

#[derive(Debug, Clone)]
enum Command {
    Import { folder: String },
    List,
    Preview { source_id: SourceId },
    Render { source_ids: Vec<SourceId> },
    Touch { source_id: SourceId, new_path: Option<PathBuf> },
    Delete { source_id: SourceId },
    Summary,
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn parse_command(args: &[String]) -> Result<Command, CommandError> {
    let Some(name) = args.get(1) else {
        return Err(CommandError::Usage("missing command".to_string()));
    };

    match name.as_str() {
        "import" => {
            let folder = args
                .get(2)
                .ok_or_else(|| CommandError::Usage("missing folder path".to_string()))?;
            Ok(Command::Import {
                folder: folder.clone(),
            })
        }
        "list" => Ok(Command::List),
        "preview" => Ok(Command::Preview {
            source_id: parse_source_id(args.get(2))?,
        }),
        "render" => {
            if args.len() < 3 {
                return Err(CommandError::Usage("missing file id".to_string()));
            }
            let source_ids = args[2..]
                .iter()
                .map(|arg| parse_source_id(Some(arg)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Command::Render { source_ids })
        }
        "touch" => Ok(Command::Touch {
            source_id: parse_source_id(args.get(2))?,
            new_path: args.get(3).map(PathBuf::from),
        }),
        "delete" => Ok(Command::Delete {
            source_id: parse_source_id(args.get(2))?,
        }),
        "summary" => Ok(Command::Summary),
        other => Err(CommandError::Usage(format!("unknown command: {other}"))),
    }
}

fn parse_source_id(arg: Option<&String>) -> Result<SourceId, CommandError> {
    let arg = arg.ok_or_else(|| CommandError::Usage("missing file id".to_string()))?;
    let value = arg
        .parse::<i64>()
        .map_err(|_| CommandError::Usage(format!("invalid file id: {arg}")))?;
    SourceId::new(value).map_err(|error| CommandError::Usage(format!("invalid file id: {error}")))
}

fn run_command(
    command: Result<Command, CommandError>,
    service: &ApplicationService,
    config: &AppConfig,
) -> Result<(), CommandError> {
    match command? {
        Command::Import { folder } => {
            let report = service
                .import_folder(ImportFolderCommand { folder })
                .map_err(|error| CommandError::Runtime(format!("import failed: {error}")))?;
            println!(
                "import finished: scanned={}, pdf={}, newly_registered={}, invalidated={}",
                report.scanned_files, report.pdf_files, report.newly_registered, report.invalidated
            );
            Ok(())
        }
        Command::List => {
            let files = service
                .list_files(ListFilesCommand)
                .map_err(|error| CommandError::Runtime(format!("list failed: {error}")))?;
            if files.is_empty() {
                println!("no files in catalog");
                return Ok(());
            }
            for file in files {
                println!("{}", present_source_row(&file));
            }
            Ok(())
        }
        Command::Preview { source_id } => {
            let artifact = service
                .preview_file(PreviewFileCommand { source_id })
                .map_err(|error| CommandError::Runtime(format!("preview failed: {error}")))?;
            println!("{}", present_artifact(&artifact));
            Ok(())
        }
        Command::Render { source_ids } => {
            let elements = service
                .render_files(RenderFilesCommand { source_ids })
                .map_err(|error| CommandError::Runtime(format!("render failed: {error}")))?;
            let presenter = HtmlPresenter::new(config.public_base_url.clone());
            println!("{}", presenter.present_elements(&elements));
            Ok(())
        }
        Command::Touch {
            source_id,
            new_path,
        } => {
            let report = service
                .touch_file(TouchFileCommand {
                    source_id,
                    new_path,
                })
                .map_err(|error| CommandError::Runtime(format!("touch failed: {error}")))?;
            match report.invalidated {
                Some(reason) => println!("{}: preview invalidated ({reason:?})", report.source.uri),
                None => println!("{}: unchanged", report.source.uri),
            }
            Ok(())
        }
        Command::Delete { source_id } => {
            let report = service
                .delete_file(DeleteFileCommand { source_id })
                .map_err(|error| CommandError::Runtime(format!("delete failed: {error}")))?;
            println!(
                "file {} deleted (preview removed: {})",
                source_id.get(),
                report.preview_removed
            );
            Ok(())
        }
        Command::Summary => {
            for line in service.settings_summary(SettingsSummaryQuery) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

fn print_usage() {
    println!("usage:");
    println!("  pdfpreview import <folder>");
    println!("  pdfpreview list");
    println!("  pdfpreview preview <file_id>");
    println!("  pdfpreview render <file_id>...");
    println!("  pdfpreview touch <file_id> [<new_path>]");
    println!("  pdfpreview delete <file_id>");
    println!("  pdfpreview summary");
}
