use anyhow::{Context, Result};
use daily_juz_core::JuzNumber;
use daily_juz_core::manifest::{MANIFEST_FILE, Manifest};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Canonical page filename
pub const INDEX_FILE: &str = "index.html";

/// Paths written by a successful publish
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedSite {
    pub juz_page: PathBuf,
    pub index_page: PathBuf,
    pub manifest: PathBuf,
}

/// Writes rendered pages into the output directory
pub struct SiteWriter {
    output_dir: PathBuf,
}

impl SiteWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the archival page, the manifest and the canonical page.
    ///
    /// All three are written to temp files first; nothing is renamed into
    /// place until every write has succeeded. Renames run page, manifest,
    /// index, so the canonical page never links to a page that is missing.
    pub fn publish(
        &self,
        juz: JuzNumber,
        juz_html: &str,
        manifest: &Manifest,
        index_html: &str,
    ) -> Result<PublishedSite> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.output_dir.display()
            )
        })?;

        let manifest_json = manifest.to_json()?;

        let site = PublishedSite {
            juz_page: self.output_dir.join(juz.page_file_name()),
            index_page: self.output_dir.join(INDEX_FILE),
            manifest: self.output_dir.join(MANIFEST_FILE),
        };

        let staged = [
            (stage(&site.juz_page, juz_html)?, &site.juz_page),
            (stage(&site.manifest, &manifest_json)?, &site.manifest),
            (stage(&site.index_page, index_html)?, &site.index_page),
        ];
        for (tmp, path) in staged {
            tmp.persist(path)
                .map_err(|e| e.error)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }

        tracing::debug!(dir = %self.output_dir.display(), juz = juz.get(), "site published");
        Ok(site)
    }
}

/// Write `contents` to a temp file beside `path`, ready to be renamed over it
fn stage(path: &Path, contents: &str) -> Result<NamedTempFile> {
    if path.is_dir() {
        anyhow::bail!("Cannot write {}: a directory is in the way", path.display());
    }
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    // Temp files are created owner-only; pages must be readable by the web server
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
    }

    Ok(tmp)
}
