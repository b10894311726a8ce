use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised while assembling report artifacts.
#[derive(Debug)]
pub enum ReportError {
    /// Reading or writing a report file failed.
    Io { path: PathBuf, source: io::Error },
    /// The combiner was given no figures to write.
    NoFigures,
    /// The height override list does not match the figure count.
    HeightCountMismatch { figures: usize, heights: usize },
    /// A sankey link references a label missing from the node list.
    UnknownNodeLabel(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReportError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            ReportError::NoFigures => write!(f, "no figures supplied"),
            ReportError::HeightCountMismatch { figures, heights } => write!(
                f,
                "got {} height overrides for {} figures",
                heights, figures
            ),
            ReportError::UnknownNodeLabel(label) => {
                write!(f, "sankey link references unknown node label {:?}", label)
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl ReportError {
    pub(crate) fn io(path: &std::path::Path, source: io::Error) -> Self {
        ReportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
