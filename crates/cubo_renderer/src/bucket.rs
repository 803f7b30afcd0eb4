//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use crate::renderer::{ImageBuffer, RenderContext, TraceStats};
use cubo_core::Color;
use rayon::prelude::*;

/// Default bucket edge length in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// A rectangular tile of the image, clipped to the image edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Left column
    pub x: u32,
    /// Top row
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bucket {
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Squared distance between the bucket center and the image center,
    /// in half-pixel units so it stays integral.
    fn center_distance(&self, width: u32, height: u32) -> u64 {
        let dx = i64::from(2 * self.x + self.width) - i64::from(width);
        let dy = i64::from(2 * self.y + self.height) - i64::from(height);
        (dx * dx + dy * dy) as u64
    }
}

/// Tile an image into buckets, nearest the image center first.
///
/// Buckets at the same distance keep row-major order. A `bucket_size` of
/// zero is treated as one.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(size as usize)
        .flat_map(|y| {
            (0..width).step_by(size as usize).map(move |x| Bucket {
                x,
                y,
                width: size.min(width - x),
                height: size.min(height - y),
            })
        })
        .collect();

    buckets.sort_by_key(|bucket| bucket.center_distance(width, height));
    buckets
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
    pub stats: TraceStats,
}

/// Render a single bucket.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(bucket: &Bucket, ctx: &RenderContext) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);
    let mut stats = TraceStats::default();

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = ctx.render_pixel(bucket.x + local_x, bucket.y + local_y, &mut stats);
            pixels.push(color);
        }
    }

    BucketResult {
        bucket: *bucket,
        pixels,
        stats,
    }
}

/// Render the whole image, one rayon task per bucket.
///
/// The context is only read, so buckets need no synchronization; results
/// are copied into the image once all buckets finish.
pub fn render_parallel(ctx: &RenderContext, bucket_size: u32) -> (ImageBuffer, TraceStats) {
    let width = ctx.rays.image_width;
    let height = ctx.rays.image_height;
    let buckets = generate_buckets(width, height, bucket_size);
    log::debug!(
        "Rendering {}x{} in {} buckets of {} px",
        width,
        height,
        buckets.len(),
        bucket_size
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, ctx))
        .collect();

    let mut image = ImageBuffer::new(width, height);
    let mut stats = TraceStats::default();
    for result in results {
        let bucket = result.bucket;
        for (i, color) in result.pixels.into_iter().enumerate() {
            let i = i as u32;
            image.set(bucket.x + i % bucket.width, bucket.y + i / bucket.width, color);
        }
        stats.merge(result.stats);
    }

    (image, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render, RayGenerator};
    use cubo_core::SceneDescription;

    /// Count how many buckets cover each pixel.
    fn coverage(buckets: &[Bucket], width: u32, height: u32) -> Vec<u32> {
        let mut hits = vec![0; (width * height) as usize];
        for b in buckets {
            for y in b.y..b.y + b.height {
                for x in b.x..b.x + b.width {
                    hits[(y * width + x) as usize] += 1;
                }
            }
        }
        hits
    }

    #[test]
    fn test_buckets_cover_image_once() {
        for (width, height, size) in [(128, 128, 64), (100, 70, 64), (37, 23, 8), (5, 3, 16)] {
            let buckets = generate_buckets(width, height, size);
            assert!(coverage(&buckets, width, height).iter().all(|&n| n == 1));
            assert!(buckets.iter().all(|b| b.width <= size && b.height <= size));
        }
    }

    #[test]
    fn test_partial_buckets_are_clipped() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4);
        assert!(buckets.contains(&Bucket { x: 64, y: 64, width: 36, height: 6 }));
    }

    #[test]
    fn test_center_bucket_first() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9);
        assert_eq!((buckets[0].x, buckets[0].y), (64, 64));

        let distances: Vec<u64> = buckets.iter().map(|b| b.center_distance(192, 192)).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        // The four edge neighbours tie and stay in row-major order
        assert_eq!((buckets[1].x, buckets[1].y), (64, 0));
        assert_eq!((buckets[2].x, buckets[2].y), (0, 64));
    }

    #[test]
    fn test_zero_bucket_size_uses_single_pixels() {
        let buckets = generate_buckets(3, 2, 0);
        assert_eq!(buckets.len(), 6);
        assert!(buckets.iter().all(|b| b.pixel_count() == 1));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let rays = RayGenerator::new().with_resolution(37, 23);
        let ctx = crate::RenderContext::from_description(&SceneDescription::demo())
            .unwrap()
            .with_rays(rays);

        let (sequential, seq_stats) = render(&ctx);
        let (parallel, par_stats) = render_parallel(&ctx, 8);

        assert_eq!(sequential.pixels, parallel.pixels);
        assert_eq!(seq_stats, par_stats);
    }
}
