// src/gate/mapping.rs

//! Source -> destination path derivation.
//!
//! Destinations are a pure function of the source path and the mapping;
//! nothing here touches the filesystem.

use std::path::{Path, PathBuf};

use crate::errors::{LessgateError, Result};
use crate::types::{is_stylesheet_source, WorkItem, SOURCE_EXTENSION, TARGET_EXTENSION};

/// Which source -> destination policy a project uses.
///
/// Exactly one variant is active per project; the three are alternatives,
/// never combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMapping {
    /// Find `<root_name>.less` anywhere in the project, compile next to it.
    Discover { root_name: String },
    /// Compile each listed source into `out_dir`, or next to it when unset.
    List {
        sources: Vec<PathBuf>,
        out_dir: Option<PathBuf>,
    },
    /// Compile one source into one destination, both taken verbatim.
    Pair {
        source: Option<PathBuf>,
        destination: Option<PathBuf>,
    },
}

impl SourceMapping {
    /// Short name used in logs and error messages.
    pub fn mode_name(&self) -> &'static str {
        match self {
            SourceMapping::Discover { .. } => "discover",
            SourceMapping::List { .. } => "list",
            SourceMapping::Pair { .. } => "pair",
        }
    }
}

/// Same directory, extension replaced with the target extension.
///
/// Applying this to its own output is a no-op.
pub fn sibling_destination(source: &Path) -> PathBuf {
    source.with_extension(TARGET_EXTENSION)
}

/// `out_dir/<basename with target extension>`, regardless of how deep the
/// source lives.
pub fn out_dir_destination(source: &Path, out_dir: &Path) -> Result<PathBuf> {
    let name = source.file_name().ok_or_else(|| {
        LessgateError::ConfigError(format!("source {:?} has no file name", source))
    })?;
    Ok(sibling_destination(&out_dir.join(name)))
}

/// Work items for the `List` mapping, in configured order.
pub fn list_work_items(sources: &[PathBuf], out_dir: Option<&Path>) -> Result<Vec<WorkItem>> {
    if sources.is_empty() {
        return Err(LessgateError::ConfigError(
            "source mode 'list' needs at least one entry in [source].sources".to_string(),
        ));
    }

    sources
        .iter()
        .map(|source| {
            ensure_source_extension(source)?;
            let destination = match out_dir {
                Some(dir) => out_dir_destination(source, dir)?,
                None => sibling_destination(source),
            };
            Ok(WorkItem::new(source.clone(), destination))
        })
        .collect()
}

/// The single work item for the `Pair` mapping.
pub fn pair_work_item(source: Option<&Path>, destination: Option<&Path>) -> Result<WorkItem> {
    match (source, destination) {
        (Some(source), Some(destination)) => {
            ensure_source_extension(source)?;
            Ok(WorkItem::new(source, destination))
        }
        (None, _) => Err(LessgateError::ConfigError(
            "source mode 'pair' needs [source].source".to_string(),
        )),
        (_, None) => Err(LessgateError::ConfigError(
            "source mode 'pair' needs [source].destination".to_string(),
        )),
    }
}

fn ensure_source_extension(source: &Path) -> Result<()> {
    if is_stylesheet_source(source) {
        Ok(())
    } else {
        Err(LessgateError::ConfigError(format!(
            "configured source {:?} does not have the .{} extension",
            source, SOURCE_EXTENSION
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_replaces_extension_in_place() {
        assert_eq!(
            sibling_destination(Path::new("src/app.less")),
            PathBuf::from("src/app.css")
        );
        let once = sibling_destination(Path::new("a/b.c.less"));
        assert_eq!(once, PathBuf::from("a/b.c.css"));
        assert_eq!(sibling_destination(&once), once);
    }

    #[test]
    fn list_with_out_dir_flattens_into_it() {
        let items = list_work_items(
            &[PathBuf::from("a/x.less"), PathBuf::from("b/y.less")],
            Some(Path::new("dist")),
        )
        .unwrap();
        assert_eq!(
            items,
            vec![
                WorkItem::new("a/x.less", "dist/x.css"),
                WorkItem::new("b/y.less", "dist/y.css"),
            ]
        );
    }

    #[test]
    fn list_without_out_dir_compiles_next_to_source() {
        let items = list_work_items(&[PathBuf::from("theme/dark.less")], None).unwrap();
        assert_eq!(items, vec![WorkItem::new("theme/dark.less", "theme/dark.css")]);
    }

    #[test]
    fn list_rejects_non_less_and_empty() {
        assert!(matches!(
            list_work_items(&[PathBuf::from("a/x.scss")], None),
            Err(LessgateError::ConfigError(_))
        ));
        assert!(matches!(
            list_work_items(&[], Some(Path::new("dist"))),
            Err(LessgateError::ConfigError(_))
        ));
    }

    #[test]
    fn pair_needs_both_paths() {
        let ok = pair_work_item(Some(Path::new("in/main.less")), Some(Path::new("out/site.css")));
        assert_eq!(ok.unwrap(), WorkItem::new("in/main.less", "out/site.css"));

        assert!(matches!(
            pair_work_item(None, Some(Path::new("out.css"))),
            Err(LessgateError::ConfigError(msg)) if msg.contains("[source].source")
        ));
        assert!(matches!(
            pair_work_item(Some(Path::new("in.less")), None),
            Err(LessgateError::ConfigError(msg)) if msg.contains("destination")
        ));
    }
}
