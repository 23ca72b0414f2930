//! Exact squared Euclidean distance transform
//!
//! Felzenszwalb & Huttenlocher: a 1-D transform along every column, then
//! along every row. Columns are transposed into rows first so both passes
//! walk contiguous memory and can be split across threads.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Stand-in for "no seed anywhere near"
pub const INF: f64 = 1e20;

/// Transform `grid` (row-major, `width * height`) in place
pub fn transform(grid: &mut [f64], width: usize, height: usize) {
    let mut columns = transpose(grid, width, height);
    rows(&mut columns, height);
    let back = transpose(&columns, height, width);
    grid.copy_from_slice(&back);
    rows(grid, width);
}

fn transpose(grid: &[f64], width: usize, height: usize) -> Vec<f64> {
    let mut out = vec![0.0; grid.len()];
    for y in 0..height {
        for x in 0..width {
            out[x * height + y] = grid[y * width + x];
        }
    }
    out
}

#[cfg(feature = "parallel")]
fn rows(grid: &mut [f64], len: usize) {
    grid.par_chunks_mut(len)
        .for_each_init(|| Scratch::new(len), |scratch, row| line(row, scratch));
}

#[cfg(not(feature = "parallel"))]
fn rows(grid: &mut [f64], len: usize) {
    let mut scratch = Scratch::new(len);
    for row in grid.chunks_mut(len) {
        line(row, &mut scratch);
    }
}

/// Buffers reused across lines of one pass
struct Scratch {
    f: Vec<f64>,
    v: Vec<usize>,
    z: Vec<f64>,
}

impl Scratch {
    fn new(len: usize) -> Self {
        Self {
            f: vec![0.0; len],
            v: vec![0; len],
            z: vec![0.0; len + 1],
        }
    }
}

/// 1-D transform: lower envelope of parabolas rooted at every sample
fn line(data: &mut [f64], scratch: &mut Scratch) {
    let len = data.len();
    if len == 0 {
        return;
    }
    let Scratch { f, v, z } = scratch;

    f[..len].copy_from_slice(data);
    v[0] = 0;
    z[0] = -INF;
    z[1] = INF;

    let mut k: isize = 0;
    for q in 1..len {
        let q2 = (q * q) as f64;
        let mut s;
        loop {
            let r = v[k as usize];
            s = (f[q] - f[r] + q2 - (r * r) as f64) / (2.0 * (q - r) as f64);
            if s <= z[k as usize] {
                k -= 1;
                if k < 0 {
                    break;
                }
            } else {
                break;
            }
        }
        k += 1;
        let k_idx = k as usize;
        v[k_idx] = q;
        z[k_idx] = s;
        z[k_idx + 1] = INF;
    }

    let mut k = 0;
    for (q, out) in data.iter_mut().enumerate() {
        while z[k + 1] < q as f64 {
            k += 1;
        }
        let r = v[k];
        let qr = q.abs_diff(r) as f64;
        *out = f[r] + qr * qr;
    }
}
