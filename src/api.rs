use std::path::Path;

use crate::{
    asset::AssetCopier,
    config::{ConfigError, SiteConfig},
    errors::FailureRecord,
    report::CopyReport,
};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum AssetkilnError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("asset copy finished with {} failure(s): {summary}", .failures.len())]
    #[diagnostic(
        code(assetkiln::copy::incomplete),
        help("Every other asset was copied; see the failures below.")
    )]
    Incomplete {
        summary: String,
        #[related]
        failures: Vec<FailureRecord>,
    },
}

/// Copies the asset folder of the project at `source` into `destination`.
///
/// # Errors
///
/// Returns an [`AssetkilnError`] if:
///
/// - The configuration fails validation (nothing is copied).
/// - Any asset could not be listed or copied. The rest of the tree is still
///   copied before this is reported.
pub fn copy_site_assets(
    source: &Path,
    destination: &Path,
    config: &SiteConfig,
) -> Result<CopyReport, AssetkilnError> {
    config.validate()?;

    log::debug!(
        "asset folder '{}', ignore hidden: {}",
        config.asset.folder,
        config.asset.ignore_hidden
    );

    let mut copier = AssetCopier::new(source, destination, config.clone());

    copier.copy_assets();

    let report = copier.into_report();

    log::info!("{report}");

    if report.is_clean() {
        Ok(report)
    } else {
        Err(AssetkilnError::Incomplete {
            summary: report.to_string(),
            failures: report.errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn clean_copy_returns_the_report() {
        let project = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::create_dir_all(project.path().join("assets/css")).unwrap();
        fs::write(project.path().join("assets/css/site.css"), "body {}").unwrap();

        let report =
            copy_site_assets(project.path(), output.path(), &SiteConfig::default()).unwrap();

        assert_eq!(report.copied, 1);
        assert!(output.path().join("css/site.css").is_file());
    }

    #[test]
    fn failures_become_an_incomplete_error() {
        let project = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        let error =
            copy_site_assets(project.path(), output.path(), &SiteConfig::default()).unwrap_err();

        match error {
            AssetkilnError::Incomplete { failures, .. } => assert_eq!(failures.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_config_copies_nothing() {
        let project = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::create_dir_all(project.path().join("assets")).unwrap();
        fs::write(project.path().join("assets/app.js"), "").unwrap();
        let mut config = SiteConfig::default();
        config.output.extension = "html".to_string();

        let error = copy_site_assets(project.path(), output.path(), &config).unwrap_err();

        assert!(matches!(error, AssetkilnError::Config(_)));
        assert!(!output.path().join("app.js").exists());
    }
}
