//! Reads the list and template, writes the generated header.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::Builder;

use crate::config::GenConfig;
use crate::list::{ParseSummary, RuleList};
use crate::{Error, Result};

/// Outcome of a generator run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub rules: usize,
    pub bytes_written: usize,
    pub summary: ParseSummary,
}

/// Result of comparing a fresh render with the header on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    UpToDate,
    Stale,
    Missing,
}

/// Header generator for one configuration.
pub struct Generator {
    config: GenConfig,
}

impl Generator {
    pub fn new(config: GenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Compile the header without writing it.
    pub fn render(&self) -> Result<(String, ParseSummary)> {
        self.config.validate()?;

        let rule_path = self.config.rule_list_path();
        let rule_text = read_input(&rule_path)?;
        log::info!("Read rule list: {:?} ({} bytes)", rule_path, rule_text.len());

        let template_path = self.config.template_path();
        let template = read_input(&template_path)?;
        log::debug!("Read template: {:?} ({} bytes)", template_path, template.len());

        let list = RuleList::parse(&rule_text);
        let summary = list.summary();
        let header = self.config.compiler().compile_rules(list.rules(), &template)?;
        Ok((header, summary))
    }

    /// Compile and write the header.
    pub fn run(&self) -> Result<GenerateReport> {
        let (header, summary) = self.render()?;
        let output = self.config.output_path();
        write_atomic(&output, header.as_bytes())?;
        log::info!(
            "Wrote {} rules to {:?} ({} bytes)",
            summary.rules,
            output,
            header.len()
        );

        Ok(GenerateReport {
            output,
            rules: summary.rules,
            bytes_written: header.len(),
            summary,
        })
    }

    /// Compare a fresh render with the existing output without writing.
    pub fn check(&self) -> Result<CheckStatus> {
        let (header, _) = self.render()?;
        let output = self.config.output_path();
        if !output.exists() {
            return Ok(CheckStatus::Missing);
        }

        let existing = fs::read(&output).map_err(|source| Error::Read {
            path: output.clone(),
            source,
        })?;
        if existing == header.as_bytes() {
            Ok(CheckStatus::UpToDate)
        } else {
            log::debug!("{:?} differs from a fresh render", output);
            Ok(CheckStatus::Stale)
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `contents` to `path` through a temp file in the same directory,
/// then rename it into place. Missing parent directories are created.
///
/// An existing file keeps its permissions; a new one gets 0o644 less the
/// umask, like a plain `fs::write`.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let wrap = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(wrap)?;

    let existing = fs::metadata(path).ok().map(|meta| meta.permissions());

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if existing.is_none() {
            // Applied at open(2), so the umask still masks it.
            builder.permissions(fs::Permissions::from_mode(0o644));
        }
    }

    let mut temp_file = builder.tempfile_in(dir).map_err(wrap)?;
    if let Some(permissions) = existing {
        temp_file.as_file().set_permissions(permissions).map_err(wrap)?;
    }
    temp_file.write_all(contents).map_err(wrap)?;
    temp_file.as_file().sync_all().map_err(wrap)?;
    temp_file.persist(path).map_err(|e| wrap(e.error))?;
    Ok(())
}
