use std::path::Path;
use std::sync::Arc;
use anyhow::Context;
use regex::Regex;
use crate::utils;

/// Label used when a class index has no entry in the table.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Ordered class names, indexed by class id. Cloning shares the same storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelTable {
    names: Arc<[String]>,
}

impl LabelTable {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads one label per line. Blank lines are kept so line N stays class N.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let lines = utils::file_to_vec(path)
            .with_context(|| format!("Failed to read label file {}", path.display()))?;
        let table = Self::from_lines(lines.into_iter().map(|l| l.trim_end().to_string()));
        log::info!("Loaded {} labels from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parses class names out of model metadata, placing each name at its key.
    /// String format: `{0: 'person', 1: 'bicycle', 2: 'sports ball', ..., 27: "yellow_lady's_slipper"}`
    ///
    /// Keys missing from the metadata become blank entries.
    pub fn from_metadata(names: &str) -> anyhow::Result<Self> {
        let re = Regex::new(r#"(\d+)\s*:\s*(['"])([-()\w '"]+)(['"])"#)?;
        let mut names_: Vec<String> = vec![];
        for (_, [key, _, name, _]) in re.captures_iter(names).map(|x| x.extract()) {
            let id: usize = key
                .parse()
                .with_context(|| format!("Invalid class key {} in model metadata", key))?;
            if id >= names_.len() {
                names_.resize(id + 1, String::new());
            }
            names_[id] = name.to_string();
        }
        Ok(Self::from_lines(names_))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Resolves a float class index as emitted by the model.
    ///
    /// The index is truncated toward zero. Anything that does not land on an entry
    /// resolves to `(None, UNKNOWN_LABEL)`.
    pub fn get(&self, class_index: f32) -> (Option<usize>, &str) {
        let t = class_index.trunc();
        if !t.is_finite() || t < 0. {
            return (None, UNKNOWN_LABEL);
        }
        let id = t as usize;
        match self.names.get(id) {
            Some(name) => (Some(id), name.as_str()),
            None => (None, UNKNOWN_LABEL),
        }
    }
}
