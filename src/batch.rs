//! Many images at once, one rayon task per image.
//!
//! Images share nothing, so each runs to completion on its own worker.
//! A bad image only ever affects its own entry in the results.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::PipelineConfig;
use crate::error::TraceError;
use crate::export;
use crate::pipeline::{process_image, CurveSet};
use crate::render::{render_png, RenderOptions};

/// One processed image.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub source: PathBuf,
    pub curves: CurveSet,
}

impl BatchItem {
    /// Output file stem: the source stem, or `image` if it has none.
    pub fn stem(&self) -> String {
        self.source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string())
    }
}

/// Regular files with an extension directly inside `dir`, sorted by name.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, TraceError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Process every source in parallel. Results keep the input order.
pub fn process_all(sources: &[PathBuf], config: &PipelineConfig) -> Vec<BatchItem> {
    sources
        .par_iter()
        .map(|source| BatchItem {
            source: source.clone(),
            curves: process_image(source, config),
        })
        .collect()
}

/// Distinct output names, one per item, in order.
///
/// An item keeps its stem unless another item shares it, in which case
/// the full file name is used (`glyph.png`, `glyph.bmp`). Names still
/// taken after that get a `-2`, `-3`, ... suffix.
pub fn output_names(items: &[BatchItem]) -> Vec<String> {
    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for item in items {
        *stem_counts.entry(item.stem()).or_default() += 1;
    }

    let mut taken = HashSet::new();
    items
        .iter()
        .map(|item| {
            let stem = item.stem();
            let base = match item.source.file_name() {
                Some(name) if stem_counts[&stem] > 1 => name.to_string_lossy().into_owned(),
                _ => stem,
            };
            let mut name = base.clone();
            let mut n = 2;
            while !taken.insert(name.clone()) {
                name = format!("{}-{}", base, n);
                n += 1;
            }
            name
        })
        .collect()
}

/// Write `<name>.json` into `json_dir` and `<name>.png` into `preview_dir`.
pub fn export_item(
    item: &BatchItem,
    name: &str,
    json_dir: &Path,
    preview_dir: &Path,
    options: &RenderOptions,
) -> Result<(), TraceError> {
    std::fs::create_dir_all(json_dir)?;
    std::fs::create_dir_all(preview_dir)?;
    export::write_json(&json_dir.join(format!("{}.json", name)), &item.curves.expressions)?;
    let png = render_png(&item.curves.previews, options)?;
    std::fs::write(preview_dir.join(format!("{}.png", name)), png)?;
    Ok(())
}

/// Export every item in parallel under its [`output_names`] entry; one
/// result per item, in order.
pub fn export_all(
    items: &[BatchItem],
    json_dir: &Path,
    preview_dir: &Path,
    options: &RenderOptions,
) -> Vec<Result<(), TraceError>> {
    let names = output_names(items);
    items
        .par_iter()
        .zip(names.par_iter())
        .map(|(item, name)| {
            let result = export_item(item, name, json_dir, preview_dir, options);
            if let Err(e) = &result {
                log::warn!("{}: export failed: {}", item.source.display(), e);
            }
            result
        })
        .collect()
}
