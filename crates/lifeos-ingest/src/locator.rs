//! Source Locator - finds journal files, export files and transcripts

use crate::IngestError;
use chrono::NaiveDate;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of looking for an optional source
#[derive(Debug, Clone, PartialEq)]
pub enum Located<T> {
    /// The source exists
    Found(T),
    /// The source is absent; the phase that needs it is skipped
    Missing(PathBuf),
}

/// A daily journal file and the day it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyFile {
    /// Day parsed from the filename
    pub date: NaiveDate,
    /// Path of the file
    pub path: PathBuf,
}

/// Enumerates input files by naming convention
#[derive(Debug, Clone)]
pub struct SourceLocator {
    daily_name: Regex,
}

impl SourceLocator {
    /// Locator for daily files named `YYYY-MM-DD.<extension>`
    pub fn new(extension: &str) -> Result<Self, IngestError> {
        let extension = regex::escape(extension.trim_start_matches('.'));
        Ok(Self {
            daily_name: Regex::new(&format!(r"^([0-9]{{4}}-[0-9]{{2}}-[0-9]{{2}})\.{}$", extension))?,
        })
    }

    /// Day encoded in a daily filename, if the name follows the convention
    ///
    /// Names that fit the pattern but are not calendar dates are rejected.
    pub fn parse_daily_name(&self, name: &str) -> Option<NaiveDate> {
        let captures = self.daily_name.captures(name)?;
        NaiveDate::parse_from_str(captures.get(1)?.as_str(), "%Y-%m-%d").ok()
    }

    /// Daily journal files in ascending date order
    pub fn daily_files(&self, dir: &Path) -> Result<Located<Vec<DailyFile>>, IngestError> {
        if !dir.is_dir() {
            return Ok(Located::Missing(dir.to_path_buf()));
        }

        let mut files: Vec<DailyFile> = read_dir_names(dir)?
            .into_iter()
            .filter_map(|(name, path)| {
                self.parse_daily_name(&name)
                    .map(|date| DailyFile { date, path })
            })
            .collect();
        files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        Ok(Located::Found(files))
    }

    /// A fixed-name export file inside `dir`
    pub fn export_file(&self, dir: &Path, name: &str) -> Located<PathBuf> {
        let path = dir.join(name);
        if path.is_file() {
            Located::Found(path)
        } else {
            Located::Missing(path)
        }
    }

    /// Transcript files (`.txt` or `.md`) in filename order
    pub fn transcript_files(&self, dir: &Path) -> Result<Located<Vec<PathBuf>>, IngestError> {
        if !dir.is_dir() {
            return Ok(Located::Missing(dir.to_path_buf()));
        }

        let mut files: Vec<PathBuf> = read_dir_names(dir)?
            .into_iter()
            .filter(|(name, path)| {
                (name.ends_with(".txt") || name.ends_with(".md")) && path.is_file()
            })
            .map(|(_, path)| path)
            .collect();
        files.sort();
        Ok(Located::Found(files))
    }
}

/// File names (UTF-8 only) and paths of a directory's entries
fn read_dir_names(dir: &Path) -> Result<Vec<(String, PathBuf)>, IngestError> {
    let entries = fs::read_dir(dir).map_err(|e| IngestError::io(dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IngestError::io(dir, e))?;
        if let Ok(name) = entry.file_name().into_string() {
            names.push((name, entry.path()));
        }
    }
    Ok(names)
}
