use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stowage_core::impls::{MemoryRecord, MemoryUploadSource};
use stowage_core::ports::input_name;
use stowage_core::{
    ByteSource, FileUploadStore, PathAliases, PersistOutcome, StoreConfig, StoreSettings,
    UploadedFile,
};

mod args;

use args::{Cli, Command};

#[derive(Debug, Serialize)]
struct StoredFile {
    source: String,
    stored: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    outcome: PersistOutcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut settings = match &cli.config {
        Some(path) => StoreSettings::from_json_file(path)?,
        None => StoreSettings::default(),
    };
    if let Some(base_dir) = &cli.base_dir {
        settings.base_directory = base_dir.clone();
    }
    if let Some(depth) = cli.depth {
        settings.shard_depth = depth;
    }

    let mut aliases = PathAliases::default();
    if let Some(runtime_dir) = &cli.runtime_dir {
        aliases.set("@runtime", runtime_dir);
    }
    Ok(StoreConfig::from_settings(&settings, &aliases)?)
}

fn pick_attribute(config: &StoreConfig, attribute: Option<String>) -> anyhow::Result<String> {
    match attribute {
        Some(attribute) => Ok(attribute),
        None => match config.tracked_attributes().first() {
            Some(attribute) => Ok(attribute.clone()),
            None => bail!("no tracked attributes configured"),
        },
    }
}

/// `--replace` names one previous path, so it only makes sense for one file.
fn check_replace(files: &[PathBuf], replace: Option<&str>) -> anyhow::Result<()> {
    if replace.is_some() && files.len() > 1 {
        bail!("--replace takes a single file, got {}", files.len());
    }
    Ok(())
}

fn store_file(
    config: &StoreConfig,
    form: &str,
    attribute: &str,
    replace: Option<&str>,
    path: &Path,
) -> anyhow::Result<StoredFile> {
    let name = path
        .file_name()
        .with_context(|| format!("{} has no file name", path.display()))?
        .to_string_lossy();
    let file = UploadedFile::from_client_name(&name, ByteSource::TempFile(path.to_path_buf()));
    let size = file.source().size().ok();

    let mut uploads = MemoryUploadSource::new();
    uploads.insert(input_name(form, attribute), file);
    let store = FileUploadStore::new(
        config.clone().with_attributes([attribute]),
        Arc::new(uploads),
    );

    let mut record = match replace {
        Some(previous) => MemoryRecord::persisted(form, [(attribute, previous)]),
        None => MemoryRecord::new(form),
    };

    let mut cycle = store.begin();
    cycle.on_before_validate(&mut record);
    let accepted = cycle.on_before_save(&mut record);
    if accepted {
        record.commit();
        cycle.on_after_commit(&record);
    }

    Ok(StoredFile {
        source: path.display().to_string(),
        stored: record.path(attribute).map(str::to_string),
        size,
        outcome: if accepted {
            PersistOutcome::Success
        } else {
            PersistOutcome::Failure
        },
        errors: record.errors(attribute).to_vec(),
    })
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::PathFor { filenames } => {
            let store = FileUploadStore::new(config, Arc::new(MemoryUploadSource::new()));
            for filename in filenames {
                println!("{}", store.path_for(&filename).join(&filename).display());
            }
        }
        Command::Store {
            files,
            form,
            attribute,
            replace,
        } => {
            check_replace(&files, replace.as_deref())?;
            let attribute = pick_attribute(&config, attribute)?;
            let mut failed = false;
            for path in &files {
                let stored = store_file(&config, &form, &attribute, replace.as_deref(), path)?;
                failed |= stored.outcome == PersistOutcome::Failure;
                println!("{}", serde_json::to_string(&stored)?);
            }
            if failed {
                bail!("some files could not be stored");
            }
        }
        Command::Remove { paths, attribute } => {
            let attribute = pick_attribute(&config, attribute)?;
            let store = FileUploadStore::new(
                config.with_attributes([attribute.as_str()]),
                Arc::new(MemoryUploadSource::new()),
            );
            for path in paths {
                let mut record = MemoryRecord::persisted("", [(attribute.as_str(), path.as_str())]);
                let mut cycle = store.begin();
                cycle.on_before_delete(&record);
                record.delete();
                cycle.on_after_commit(&record);
                info!(%path, "released stored file");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_is_limited_to_one_file() {
        let one = [PathBuf::from("a.jpg")];
        let two = [PathBuf::from("a.jpg"), PathBuf::from("b.jpg")];

        assert!(check_replace(&one, Some("/u/72/old.jpg")).is_ok());
        assert!(check_replace(&two, None).is_ok());
        assert!(check_replace(&two, Some("/u/72/old.jpg")).is_err());
    }

    #[test]
    fn store_reports_size_of_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("photo.jpg");
        std::fs::write(&source, b"jpeg bytes").unwrap();
        let config = StoreConfig::new(dir.path().join("upload"));

        let stored = store_file(&config, "Upload", "file", None, &source).unwrap();
        assert_eq!(stored.outcome, PersistOutcome::Success);
        assert_eq!(stored.size, Some(10));
        let expected = dir.path().join("upload").join("72").join("photo.jpg");
        assert_eq!(stored.stored, Some(expected.display().to_string()));
        assert_eq!(std::fs::read(&expected).unwrap(), b"jpeg bytes");
    }
}
