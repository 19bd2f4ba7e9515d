use std::{
    fs, io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{
    config::{CopyPolicy, SiteConfig},
    errors::{FailureRecord, FileOperation},
    hidden::{HiddenConvention, HiddenPolicy},
    report::CopyReport,
    utils::mirror_path,
};

/// Mirrors a project's asset folder into the build output.
///
/// The copier never fails as a whole: every entry that cannot be listed,
/// created or copied becomes a [`FailureRecord`] and the walk moves on to
/// the next entry. Callers inspect [`AssetCopier::errors`] afterwards.
///
/// # Example
///
/// ```no_run
/// use assetkiln::{AssetCopier, SiteConfig};
///
/// let mut copier = AssetCopier::new("site", "site/output", SiteConfig::default());
/// copier.copy("site/assets");
///
/// for failure in copier.errors() {
///     eprintln!("{failure}");
/// }
/// ```
#[derive(Debug)]
pub struct AssetCopier<H: HiddenPolicy = HiddenConvention> {
    source_root: PathBuf,
    destination_root: PathBuf,
    config: SiteConfig,
    hidden: H,
    report: CopyReport,
}

impl AssetCopier<HiddenConvention> {
    /// Binds a copier to a project root, an output root and a config
    /// snapshot. Hidden entries are detected with the host convention.
    pub fn new(
        source_root: impl Into<PathBuf>,
        destination_root: impl Into<PathBuf>,
        config: SiteConfig,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            destination_root: destination_root.into(),
            config,
            hidden: HiddenConvention::Host,
            report: CopyReport::default(),
        }
    }
}

impl<H: HiddenPolicy> AssetCopier<H> {
    /// Replaces the hidden-entry check, e.g. to simulate another platform.
    pub fn with_hidden_policy<P: HiddenPolicy>(self, hidden: P) -> AssetCopier<P> {
        AssetCopier {
            source_root: self.source_root,
            destination_root: self.destination_root,
            config: self.config,
            hidden,
            report: self.report,
        }
    }

    /// `<source_root>/<asset folder>`.
    pub fn asset_directory(&self) -> PathBuf {
        self.source_root.join(self.config.asset_folder())
    }

    /// Whether `path` lies inside the configured asset folder.
    pub fn is_asset_file(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref().starts_with(self.asset_directory())
    }

    /// Failures recorded so far, in discovery order.
    pub fn errors(&self) -> &[FailureRecord] {
        &self.report.errors
    }

    pub fn report(&self) -> &CopyReport {
        &self.report
    }

    pub fn into_report(self) -> CopyReport {
        self.report
    }

    /// Copies the configured asset folder.
    pub fn copy_assets(&mut self) {
        let directory = self.asset_directory();

        self.copy(directory);
    }

    /// Mirrors `directory` into the destination root.
    ///
    /// Entries are visited depth-first in file-name order. Paths inside the
    /// asset folder keep their position relative to it; any other directory
    /// is mirrored relative to itself.
    pub fn copy(&mut self, directory: impl AsRef<Path>) {
        let directory = directory.as_ref();
        let policy = self.config.policy();

        log::debug!(
            "copying assets from {} to {}",
            directory.display(),
            self.destination_root.display()
        );

        let mut run = CopyReport::default();
        self.walk(directory, &policy, &mut run);

        log::debug!("{}", run.format(&format!("[{}]", directory.display())));

        self.report.merge(run);
    }

    /// Copies one asset file to its mirrored location.
    pub fn copy_single(&mut self, file: impl AsRef<Path>) {
        let file = file.as_ref();
        let policy = self.config.policy();
        let mut run = CopyReport::default();

        if !file.is_file() {
            let error = io::Error::new(io::ErrorKind::NotFound, "not a regular file");
            self.record(&mut run, FailureRecord::new(FileOperation::Copy, file.into(), &error));
            self.report.merge(run);
            return;
        }

        let base = match file.parent() {
            Some(_) if self.is_asset_file(file) => self.asset_directory(),
            Some(parent) => parent.to_path_buf(),
            None => PathBuf::new(),
        };

        if policy.ignore_hidden && self.is_hidden_below(file, &base) {
            log::debug!("skipping hidden asset {}", file.display());
            run.skipped_hidden += 1;
        } else if let Some(target) = mirror_path(file, &base, &self.destination_root) {
            self.copy_file(file, &target, &mut run);
        }

        self.report.merge(run);
    }

    /// Whether `path` or any directory between `base` and `path` is hidden,
    /// matching what the walk would have skipped.
    fn is_hidden_below(&self, path: &Path, base: &Path) -> bool {
        path.ancestors()
            .take_while(|ancestor| *ancestor != base && ancestor.starts_with(base))
            .any(|ancestor| self.hidden.is_hidden(ancestor))
    }

    fn mirror_base(&self, directory: &Path, policy: &CopyPolicy) -> PathBuf {
        let asset_directory = self.source_root.join(&policy.asset_folder);

        if directory.starts_with(&asset_directory) {
            asset_directory
        } else {
            directory.to_path_buf()
        }
    }

    fn walk(&self, directory: &Path, policy: &CopyPolicy, run: &mut CopyReport) {
        match fs::metadata(directory) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                let error = io::Error::other("not a directory");
                self.record(run, FailureRecord::new(FileOperation::List, directory.into(), &error));
                return;
            }
            Err(error) => {
                self.record(run, FailureRecord::new(FileOperation::List, directory.into(), &error));
                return;
            }
        }

        let base = self.mirror_base(directory, policy);
        let mut skipped_hidden = 0;

        {
            let mut entries = WalkDir::new(directory)
                .min_depth(1)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| {
                    let hidden = policy.ignore_hidden && self.hidden.is_hidden(entry.path());
                    if hidden {
                        log::debug!("skipping hidden entry {}", entry.path().display());
                        skipped_hidden += 1;
                    }
                    !hidden
                });

            while let Some(next) = entries.next() {
                let entry = match next {
                    Ok(entry) => entry,
                    Err(error) => {
                        self.record(run, FailureRecord::from_walk(&error, directory));
                        continue;
                    }
                };

                // walked paths always start with `directory`, and so with `base`
                let Some(target) = mirror_path(entry.path(), &base, &self.destination_root)
                else {
                    continue;
                };

                if entry.file_type().is_dir() {
                    match fs::create_dir_all(&target) {
                        Ok(()) => {
                            log::debug!("created directory {}", target.display());
                            run.directories += 1;
                        }
                        Err(error) => {
                            self.record(run, FailureRecord::new(FileOperation::Mkdir, target, &error));
                            entries.skip_current_dir();
                        }
                    }
                } else if entry.file_type().is_file() {
                    self.copy_file(entry.path(), &target, run);
                }
            }
        }

        run.skipped_hidden += skipped_hidden;
    }

    fn copy_file(&self, source: &Path, target: &Path, run: &mut CopyReport) {
        match write_asset(source, target) {
            Ok(bytes) => {
                log::info!("copying [{}]... done ({bytes} bytes)", source.display());
                run.copied += 1;
            }
            Err(failure) => self.record(run, failure),
        }
    }

    fn record(&self, run: &mut CopyReport, failure: FailureRecord) {
        log::error!("{failure}");
        run.errors.push(failure);
    }
}

/// Writes `source`'s bytes to `target`, replacing its content.
///
/// Write-protected targets are refused even when the process could override
/// the permission bits. The target keeps its own permissions.
fn write_asset(source: &Path, target: &Path) -> Result<u64, FailureRecord> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .map_err(|error| FailureRecord::new(FileOperation::Mkdir, parent.into(), &error))?;
    }

    if let Ok(meta) = fs::metadata(target) {
        if meta.is_file() && meta.permissions().readonly() {
            let error = io::Error::new(
                io::ErrorKind::PermissionDenied,
                "destination file is write-protected",
            );
            return Err(FailureRecord::new(FileOperation::Copy, target.into(), &error));
        }
    }

    let mut reader = fs::File::open(source)
        .map_err(|error| FailureRecord::new(FileOperation::Copy, source.into(), &error))?;
    let mut writer = fs::File::create(target)
        .map_err(|error| FailureRecord::new(FileOperation::Copy, target.into(), &error))?;

    io::copy(&mut reader, &mut writer)
        .map_err(|error| FailureRecord::new(FileOperation::Copy, target.into(), &error))
}
