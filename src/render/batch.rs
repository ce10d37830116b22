use rayon::prelude::*;

use crate::{
    atlas::texture::OverlayHint,
    foundation::error::{IsoskinError, IsoskinResult},
    render::avatar::{AvatarCanvas, RenderMode, render_skin},
};

/// One independent render request, e.g. a leaderboard row.
#[derive(Clone, Debug)]
pub struct BatchJob {
    pub id: String,
    pub bytes: Vec<u8>,
    pub slim: bool,
    pub overlay: OverlayHint,
    pub mode: RenderMode,
    pub scale: u32,
}

/// Threading configuration for [`render_batch`].
#[derive(Clone, Debug, Default)]
pub struct BatchOpts {
    /// Override rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

#[derive(Debug)]
pub struct BatchOutput {
    pub id: String,
    pub result: IsoskinResult<AvatarCanvas>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub jobs: usize,
    pub rendered: usize,
    pub failed: usize,
}

impl BatchStats {
    pub fn from_outputs(outputs: &[BatchOutput]) -> Self {
        let rendered = outputs.iter().filter(|o| o.result.is_ok()).count();
        Self {
            jobs: outputs.len(),
            rendered,
            failed: outputs.len() - rendered,
        }
    }
}

/// Render every job on a dedicated thread pool.
///
/// Output order matches `jobs`. A failing job only fails its own entry; the outer error is
/// reserved for thread-pool setup.
#[tracing::instrument(skip(jobs), fields(jobs = jobs.len()))]
pub fn render_batch(jobs: &[BatchJob], opts: &BatchOpts) -> IsoskinResult<Vec<BatchOutput>> {
    let pool = build_thread_pool(opts.threads)?;
    let outputs: Vec<BatchOutput> = pool.install(|| {
        jobs.par_iter()
            .map(|job| BatchOutput {
                id: job.id.clone(),
                result: render_skin(&job.bytes, job.slim, job.overlay, job.mode, job.scale),
            })
            .collect()
    });

    for out in &outputs {
        if let Err(e) = &out.result {
            tracing::warn!(id = %out.id, error = %e, "batch job failed");
        }
    }
    let stats = BatchStats::from_outputs(&outputs);
    tracing::debug!(rendered = stats.rendered, failed = stats.failed, "batch done");
    Ok(outputs)
}

fn build_thread_pool(threads: Option<usize>) -> IsoskinResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(IsoskinError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| IsoskinError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/batch.rs"]
mod tests;
