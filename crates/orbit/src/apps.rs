use crown::item::ItemKey;
use derive_more::{AsRef, Deref, Display, From, Into};
use freedesktop_entry_parser::parse_entry;
use fs_err as fs;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct AppName(String);

crown::impl_key_newtype!(AppName);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct ExecCommand(String);

crown::impl_key_newtype!(ExecCommand);

/// One launchable entry. The key is the desktop file id.
#[derive(Debug, Clone, PartialEq)]
pub struct AppEntry {
    pub key: ItemKey,
    pub name: AppName,
    pub exec: ExecCommand,
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("entry '{0}' has no command")]
    EmptyExec(ItemKey),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

static ENTRIES: OnceLock<RwLock<Vec<AppEntry>>> = OnceLock::new();

pub fn refresh_cache() {
    let apps = scan_entries();
    log::info!("found {} desktop entries", apps.len());
    let lock = ENTRIES.get_or_init(|| RwLock::new(Vec::new()));
    *lock.write() = apps;
}

/// Cached entries, sorted by name.
pub fn all_entries() -> Vec<AppEntry> {
    let lock = ENTRIES.get_or_init(|| RwLock::new(scan_entries()));
    lock.read().clone()
}

pub fn find_entry(key: &ItemKey) -> Option<AppEntry> {
    let lock = ENTRIES.get_or_init(|| RwLock::new(scan_entries()));
    lock.read().iter().find(|e| &e.key == key).cloned()
}

fn desktop_directories() -> Vec<PathBuf> {
    let xdg = xdg::BaseDirectories::new();
    let mut dirs = Vec::new();

    if let Some(home) = xdg.get_data_home() {
        dirs.push(home.join("applications"));
    }

    dirs.extend(
        xdg.get_data_dirs()
            .into_iter()
            .map(|p| p.join("applications")),
    );
    dirs
}

/// Desktop files by id; earlier directories shadow later ones.
fn collect_desktop_files() -> HashMap<String, PathBuf> {
    let mut entries = HashMap::new();

    for dir in desktop_directories().iter().rev() {
        let Ok(read_dir) = fs::read_dir(dir) else {
            continue;
        };
        for entry in read_dir.flatten() {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("desktop")
                && let Some(id) = path.file_name().and_then(|s| s.to_str())
            {
                entries.insert(id.to_string(), path);
            }
        }
    }
    entries
}

pub fn scan_entries() -> Vec<AppEntry> {
    let mut apps: Vec<AppEntry> = collect_desktop_files()
        .into_iter()
        .filter_map(|(id, path)| parse_desktop_file(&id, &path))
        .collect();
    sort_entries(&mut apps);
    apps
}

fn sort_entries(apps: &mut [AppEntry]) {
    apps.sort_by_cached_key(|a| (a.name.to_lowercase(), a.key.to_string()));
}

pub fn parse_desktop_file(id: &str, path: &Path) -> Option<AppEntry> {
    let entry = parse_entry(path).ok()?;
    let section = entry.section("Desktop Entry")?;

    if section.attr("Type").first()? != "Application" {
        return None;
    }
    for hidden in ["NoDisplay", "Hidden"] {
        if section.attr(hidden).first().is_some_and(|v| v == "true") {
            return None;
        }
    }

    let name = section.attr("Name").first()?.to_string();
    let exec = strip_field_codes(section.attr("Exec").first()?);

    Some(AppEntry {
        key: ItemKey::new(id),
        name: AppName::new(name),
        exec: ExecCommand::new(exec),
    })
}

fn strip_field_codes(exec: &str) -> String {
    shell_words::split(exec)
        .map(|args| {
            let clean_args: Vec<_> = args
                .into_iter()
                .filter(|arg| !arg.starts_with('%'))
                .collect();
            shell_words::join(clean_args)
        })
        .unwrap_or_else(|_| exec.to_string())
}

pub fn launch(entry: &AppEntry) -> Result<(), LaunchError> {
    if entry.exec.trim().is_empty() {
        return Err(LaunchError::EmptyExec(entry.key.clone()));
    }
    log::info!("launching {} ({})", entry.name, entry.exec);
    Command::new("sh")
        .arg("-c")
        .arg(entry.exec.as_str())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}
