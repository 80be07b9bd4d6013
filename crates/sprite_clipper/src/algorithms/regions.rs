use tracing::trace;
use crate::{
    error::Result,
    traits::{PixelMask, RegionFinder},
    types::Region,
};

/// Width × height grid of visited flags; a mark is never cleared
#[derive(Debug, Clone)]
pub struct VisitedGrid {
    width: usize,
    cells: Vec<bool>,
}

impl VisitedGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as usize,
            cells: vec![false; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width + x as usize
    }

    #[inline]
    pub fn is_visited(&self, x: u32, y: u32) -> bool {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn mark(&mut self, x: u32, y: u32) {
        let index = self.index(x, y);
        self.cells[index] = true;
    }
}

/// Region finder using an explicit-stack flood fill over 4-neighbours.
///
/// Pixels are scanned column by column (x outer, y inner); each unvisited
/// opaque pixel seeds a new region, so regions come out ordered by the scan
/// position of their first pixel.
#[derive(Debug, Clone, Default)]
pub struct FloodFillRegionFinder;

impl RegionFinder for FloodFillRegionFinder {
    fn find_regions(&self, mask: &dyn PixelMask) -> Result<Vec<Region>> {
        let (width, height) = mask.dimensions();
        let mut visited = VisitedGrid::new(width, height);
        let mut regions = Vec::new();

        for x in 0..width {
            for y in 0..height {
                if !visited.is_visited(x, y) && mask.is_opaque(x, y) {
                    let region = flood_fill(mask, &mut visited, [x, y]);
                    trace!(
                        index = regions.len() + 1,
                        seed_x = x,
                        seed_y = y,
                        pixels = region.len(),
                        boundary = region.boundary().len(),
                        "found region"
                    );
                    regions.push(region);
                }
            }
        }

        Ok(regions)
    }
}

/// In-bounds 4-neighbours of a pixel: left, right, up, down
fn neighbours(x: u32, y: u32, width: u32, height: u32) -> impl Iterator<Item = [u32; 2]> {
    [
        x.checked_sub(1).map(|nx| [nx, y]),
        (x + 1 < width).then(|| [x + 1, y]),
        y.checked_sub(1).map(|ny| [x, ny]),
        (y + 1 < height).then(|| [x, y + 1]),
    ]
    .into_iter()
    .flatten()
}

/// Collect the component containing `seed`, marking every member visited.
///
/// A pixel is marked when pushed, so it enters the stack and the region at
/// most once.
fn flood_fill(mask: &dyn PixelMask, visited: &mut VisitedGrid, seed: [u32; 2]) -> Region {
    let (width, height) = mask.dimensions();
    let mut stack = vec![seed];
    let mut pixels = Vec::new();
    let mut boundary = Vec::new();
    visited.mark(seed[0], seed[1]);

    while let Some([x, y]) = stack.pop() {
        pixels.push([x, y]);

        let mut opaque_neighbours = 0;
        for [nx, ny] in neighbours(x, y, width, height) {
            if !mask.is_opaque(nx, ny) {
                continue;
            }
            opaque_neighbours += 1;
            if !visited.is_visited(nx, ny) {
                visited.mark(nx, ny);
                stack.push([nx, ny]);
            }
        }

        if opaque_neighbours < 4 {
            boundary.push([x, y]);
        }
    }

    Region::new(seed, pixels, boundary)
}
