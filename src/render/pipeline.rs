use rayon::prelude::*;

use crate::{
    assets::store::SourceImages,
    effects::scan::Uniforms,
    encode::sink::{FrameSink, SinkConfig},
    eval::clock::FrameClock,
    eval::pointer::PointerPath,
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{ScanError, ScanResult},
    render::backend::FrameRGBA,
    render::cpu::CpuRasterizer,
};

/// Everything needed to render any frame of an offline sequence.
///
/// Frame `n` is rendered at elapsed time `n / fps`, with the pointer taken from `pointer`.
#[derive(Clone, Copy, Debug)]
pub struct RenderJob<'a> {
    /// Configured rasterizer.
    pub rasterizer: &'a CpuRasterizer,
    /// Resolved source images.
    pub images: &'a SourceImages,
    /// Pointer over time.
    pub pointer: PointerPath,
    /// Timeline frame rate.
    pub fps: Fps,
}

impl RenderJob<'_> {
    /// Uniforms for `frame`.
    pub fn uniforms_at(&self, frame: FrameIndex) -> Uniforms {
        let clock = FrameClock::at_frame(self.fps, frame);
        Uniforms {
            pointer: self.pointer.sample(clock.elapsed_secs()),
            progress: clock.progress(),
        }
    }
}

/// Render a single frame.
///
/// Returns a [`FrameRGBA`] containing **premultiplied** RGBA8 pixels.
#[tracing::instrument(skip_all, fields(frame = frame.0))]
pub fn render_frame(job: &RenderJob<'_>, frame: FrameIndex) -> ScanResult<FrameRGBA> {
    job.rasterizer
        .render(job.images, job.uniforms_at(frame), None)
}

/// Render a range of frames (inclusive start, exclusive end) sequentially.
pub fn render_frames(job: &RenderJob<'_>, range: FrameRange) -> ScanResult<Vec<FrameRGBA>> {
    render_frames_with_stats(job, range, &RenderThreading::default()).map(|(frames, _)| frames)
}

/// Threading and chunking for range renders.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Render frames of a chunk in parallel on a dedicated pool.
    pub parallel: bool,
    /// Frames rendered (and held in memory) per chunk.
    pub chunk_size: usize,
    /// Worker thread count; `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames rendered.
    pub frames_rendered: u64,
    /// Chunks the range was split into.
    pub chunks: u64,
}

/// Like [`render_frames`], with explicit threading and statistics.
///
/// Output is identical whether or not `threading.parallel` is set.
pub fn render_frames_with_stats(
    job: &RenderJob<'_>,
    range: FrameRange,
    threading: &RenderThreading,
) -> ScanResult<(Vec<FrameRGBA>, RenderStats)> {
    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    let stats = for_each_chunk(job, range, threading, |frames| {
        out.extend(frames.into_iter().map(|(_, f)| f));
        Ok(())
    })?;
    Ok((out, stats))
}

/// Render `range` and stream it into `sink` in timeline order.
#[tracing::instrument(skip_all, fields(start = range.start.0, end = range.end.0))]
pub fn render_to_sink(
    job: &RenderJob<'_>,
    range: FrameRange,
    threading: &RenderThreading,
    sink: &mut dyn FrameSink,
) -> ScanResult<RenderStats> {
    let canvas = job.rasterizer.canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: job.fps,
    })?;
    let stats = for_each_chunk(job, range, threading, |frames| {
        for (idx, frame) in &frames {
            sink.push_frame(*idx, frame)?;
        }
        Ok(())
    })?;
    sink.end()?;
    tracing::debug!(frames = stats.frames_rendered, "range written to sink");
    Ok(stats)
}

fn for_each_chunk(
    job: &RenderJob<'_>,
    range: FrameRange,
    threading: &RenderThreading,
    mut consume: impl FnMut(Vec<(FrameIndex, FrameRGBA)>) -> ScanResult<()>,
) -> ScanResult<RenderStats> {
    if range.is_empty() {
        return Err(ScanError::validation("render range must be non-empty"));
    }

    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };
    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let mut stats = RenderStats::default();

    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))?;
        let started = std::time::Instant::now();

        let frames = match &pool {
            Some(pool) => render_chunk_parallel(job, chunk, pool)?,
            None => render_chunk_sequential(job, chunk)?,
        };

        tracing::debug!(
            start = chunk_start,
            end = chunk_end,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "chunk rendered"
        );
        stats.frames_rendered += frames.len() as u64;
        stats.chunks += 1;
        consume(frames)?;
        chunk_start = chunk_end;
    }

    Ok(stats)
}

fn render_chunk_sequential(
    job: &RenderJob<'_>,
    range: FrameRange,
) -> ScanResult<Vec<(FrameIndex, FrameRGBA)>> {
    range
        .iter()
        .map(|idx| Ok((idx, render_frame(job, idx)?)))
        .collect()
}

fn render_chunk_parallel(
    job: &RenderJob<'_>,
    range: FrameRange,
    pool: &rayon::ThreadPool,
) -> ScanResult<Vec<(FrameIndex, FrameRGBA)>> {
    let indices: Vec<FrameIndex> = range.iter().collect();
    let rendered = pool.install(|| {
        indices
            .par_iter()
            .map(|&idx| -> ScanResult<(FrameIndex, FrameRGBA)> {
                Ok((idx, render_frame(job, idx)?))
            })
            .collect::<Vec<_>>()
    });
    rendered.into_iter().collect()
}

/// Dedicated rayon pool; `Some(0)` threads is rejected.
pub fn build_thread_pool(threads: Option<usize>) -> ScanResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ScanError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ScanError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
