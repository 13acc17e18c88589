//! Gallery assets: labels recovered from file names and parallel batch rendering.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    encoding::{identifier::Identifier, name::IdentityName},
    export::still::{StillFormat, save_frame},
    foundation::error::{SyntropyError, SyntropyResult},
    render::{
        backend::{RenderBackend, RenderSettings},
        compose::compose_frame,
        cpu::CpuBackend,
        options::DisplayOptions,
    },
};

const GALLERY_PREFIX: &str = "syntropy-";

/// Identifier embedded in a gallery file name as `syntropy-<digits>`.
///
/// Only the file name component is inspected; the first `syntropy-` followed by at least one digit
/// wins. Values above the identifier range yield `None`.
pub fn parse_gallery_identifier(name: &str) -> Option<Identifier> {
    gallery_digits(name).map(|(_, id)| id)
}

/// Accessible label for a gallery image: `#<digits> <NAME>`.
///
/// The digits are echoed as written, so `syntropy-0042.jpg` is labelled `#0042`.
pub fn gallery_label(name: &str) -> Option<String> {
    gallery_digits(name).map(|(digits, id)| format!("#{digits} {}", IdentityName::of(id)))
}

fn gallery_digits(name: &str) -> Option<(&str, Identifier)> {
    let file = Path::new(name)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or(name);
    file.match_indices(GALLERY_PREFIX).find_map(|(at, _)| {
        let rest = &file[at + GALLERY_PREFIX.len()..];
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        let digits = &rest[..end];
        Identifier::parse_decimal(digits).map(|id| (digits, id))
    })
}

#[derive(Clone, Debug, Default)]
pub struct GalleryOptions {
    pub display: DisplayOptions,
    pub format: StillFormat,
    /// Worker thread count; `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Render one composition per distinct identifier into `dir`, in parallel.
///
/// Repeated identifiers are rendered once, at their first position. Each worker owns its own
/// [`CpuBackend`]. Output paths come back in that first-seen order.
#[tracing::instrument(skip(ids, settings, opts), fields(count = ids.len()))]
pub fn render_gallery(
    ids: &[Identifier],
    dir: &Path,
    settings: &RenderSettings,
    opts: &GalleryOptions,
) -> SyntropyResult<Vec<PathBuf>> {
    settings.validate()?;
    std::fs::create_dir_all(dir).map_err(|e| {
        SyntropyError::encode(format!(
            "failed to create gallery directory '{}': {e}",
            dir.display()
        ))
    })?;

    let mut seen = HashSet::with_capacity(ids.len());
    let ids: Vec<Identifier> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

    let pool = build_thread_pool(opts.threads)?;
    let ext = opts.format.extension();
    let results = pool.install(|| {
        ids.par_iter()
            .map_init(
                || CpuBackend::new(settings.clone()),
                |worker_backend, id| -> SyntropyResult<PathBuf> {
                    let backend = worker_backend.as_mut().map_err(|e| {
                        SyntropyError::render(format!("failed to create worker backend: {e}"))
                    })?;
                    let frame = backend.render_scene(&compose_frame(*id, &opts.display))?;
                    let path = dir.join(format!("{GALLERY_PREFIX}{}.{ext}", id.value()));
                    save_frame(&frame, &path, opts.format)?;
                    Ok(path)
                },
            )
            .collect::<Vec<_>>()
    });

    let paths = results.into_iter().collect::<SyntropyResult<Vec<_>>>()?;
    tracing::info!(count = paths.len(), dir = %dir.display(), "gallery rendered");
    Ok(paths)
}

fn build_thread_pool(threads: Option<usize>) -> SyntropyResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SyntropyError::validation(
            "gallery 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SyntropyError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/export/gallery.rs"]
mod tests;
