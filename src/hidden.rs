use std::path::Path;

/// Decides whether a filesystem entry counts as hidden.
///
/// The copier asks this once per entry while walking, so implementations
/// must not cache answers across calls.
pub trait HiddenPolicy {
    fn is_hidden(&self, path: &Path) -> bool;
}

/// Built-in hidden-file conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HiddenConvention {
    /// Unix-like: the file name starts with a dot.
    DotPrefix,
    /// Windows-like: the `FILE_ATTRIBUTE_HIDDEN` bit is set.
    /// Nothing is hidden by this convention on platforms without the bit.
    Attribute,
    /// Whatever the current platform uses.
    #[default]
    Host,
}
impl HiddenPolicy for HiddenConvention {
    fn is_hidden(&self, path: &Path) -> bool {
        match self {
            Self::DotPrefix => has_dot_prefix(path),
            Self::Attribute => has_hidden_attribute(path),
            Self::Host => {
                if cfg!(windows) {
                    has_hidden_attribute(path)
                } else {
                    has_dot_prefix(path)
                }
            }
        }
    }
}
impl<F> HiddenPolicy for F
where
    F: Fn(&Path) -> bool,
{
    fn is_hidden(&self, path: &Path) -> bool {
        self(path)
    }
}

fn has_dot_prefix(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

#[cfg(windows)]
fn has_hidden_attribute(path: &Path) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

    std::fs::metadata(path)
        .map(|meta| meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(not(windows))]
fn has_hidden_attribute(_path: &Path) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_prefix_only_looks_at_the_file_name() {
        let convention = HiddenConvention::DotPrefix;

        assert!(convention.is_hidden(Path::new("assets/.test.txt")));
        assert!(convention.is_hidden(Path::new(".git")));
        assert!(!convention.is_hidden(Path::new("assets/test.txt")));
        assert!(!convention.is_hidden(Path::new(".hidden/visible.txt")));
        assert!(!convention.is_hidden(Path::new("/")));
    }

    #[cfg(not(windows))]
    #[test]
    fn host_convention_is_dot_prefix_off_windows() {
        assert!(HiddenConvention::Host.is_hidden(Path::new("css/.keep")));
        assert!(!HiddenConvention::Attribute.is_hidden(Path::new("css/.keep")));
    }

    #[test]
    fn closures_act_as_policies() {
        let flagged = |path: &Path| path.ends_with("img/secret.png");

        assert!(flagged.is_hidden(Path::new("assets/img/secret.png")));
        assert!(!flagged.is_hidden(Path::new("assets/img/.dotted.png")));
    }
}
