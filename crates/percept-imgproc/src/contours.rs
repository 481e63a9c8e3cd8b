use std::collections::HashMap;

use percept_image::Image;

/// A disjoint-set (union-find) data structure over pixel indices.
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    /// Creates a new UnionFind structure with length `len`.
    pub fn new(len: usize) -> Self {
        Self {
            parent: vec![usize::MAX; len],
            size: vec![1; len],
        }
    }

    /// Returns the representative (root) of the set containing `id`, with path compression.
    pub fn get_representative(&mut self, mut id: usize) -> usize {
        let mut root = self.parent[id];

        if root == usize::MAX {
            self.parent[id] = id;
            return id;
        }

        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[id] != root {
            let tmp = self.parent[id];
            self.parent[id] = root;
            id = tmp;
        }

        root
    }

    /// Unites the sets containing `aid` and `bid`, returning the representative of the resulting set.
    pub fn connect(&mut self, aid: usize, bid: usize) -> usize {
        let aroot = self.get_representative(aid);
        let broot = self.get_representative(bid);

        if aroot == broot {
            return aroot;
        }

        if self.size[aroot] > self.size[broot] {
            self.parent[broot] = aroot;
            self.size[aroot] += self.size[broot];
            aroot
        } else {
            self.parent[aroot] = broot;
            self.size[broot] += self.size[aroot];
            broot
        }
    }
}

/// A connected region of foreground pixels in a binary mask.
#[derive(Clone, Debug)]
pub struct Region {
    /// Number of foreground pixels in the region.
    pub area: usize,
    /// The x-coordinate of the top-left corner of the bounding rectangle.
    pub x: usize,
    /// The y-coordinate of the top-left corner of the bounding rectangle.
    pub y: usize,
    /// The width of the bounding rectangle.
    pub width: usize,
    /// The height of the bounding rectangle.
    pub height: usize,
    /// The boundary of the region as an ordered sequence of pixel
    /// coordinates, traced clockwise from the topmost-leftmost pixel.
    pub contour: Vec<(usize, usize)>,
}

/// Neighbor offsets in clockwise order starting west.
const OFFSETS: [(i64, i64); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

/// Find the connected foreground regions of a binary mask.
///
/// Pixels with a non-zero value are foreground; connectivity is
/// 8-directional. Each region carries its pixel area, bounding rectangle and
/// traced boundary contour. Regions are returned in scan order of their
/// topmost-leftmost pixel, so the output is deterministic for a given mask.
///
/// # Arguments
///
/// * `src` - The input binary mask.
pub fn find_regions(src: &Image<u8, 1>) -> Vec<Region> {
    let width = src.width();
    let height = src.height();
    let data = src.as_slice();

    let mut uf = UnionFind::new(data.len());

    // union each foreground pixel with its forward neighbors; the four
    // forward directions cover all eight adjacencies over the full scan
    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            if data[i] == 0 {
                continue;
            }

            if x + 1 < width && data[i + 1] != 0 {
                uf.connect(i, i + 1);
            }
            if y + 1 < height {
                let below = i + width;
                if data[below] != 0 {
                    uf.connect(i, below);
                }
                if x > 0 && data[below - 1] != 0 {
                    uf.connect(i, below - 1);
                }
                if x + 1 < width && data[below + 1] != 0 {
                    uf.connect(i, below + 1);
                }
            }
        }
    }

    struct Acc {
        area: usize,
        min_x: usize,
        min_y: usize,
        max_x: usize,
        max_y: usize,
        seed: usize,
    }

    let mut accs: HashMap<usize, Acc> = HashMap::new();
    let mut order: Vec<usize> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            if data[i] == 0 {
                continue;
            }

            let root = uf.get_representative(i);
            match accs.get_mut(&root) {
                Some(acc) => {
                    acc.area += 1;
                    acc.min_x = acc.min_x.min(x);
                    acc.min_y = acc.min_y.min(y);
                    acc.max_x = acc.max_x.max(x);
                    acc.max_y = acc.max_y.max(y);
                }
                None => {
                    accs.insert(
                        root,
                        Acc {
                            area: 1,
                            min_x: x,
                            min_y: y,
                            max_x: x,
                            max_y: y,
                            seed: i,
                        },
                    );
                    order.push(root);
                }
            }
        }
    }

    order
        .into_iter()
        .map(|root| {
            let acc = &accs[&root];
            let seed = (acc.seed % width, acc.seed / width);
            Region {
                area: acc.area,
                x: acc.min_x,
                y: acc.min_y,
                width: acc.max_x - acc.min_x + 1,
                height: acc.max_y - acc.min_y + 1,
                contour: trace_boundary(src, seed, acc.area),
            }
        })
        .collect()
}

/// Moore-neighbor boundary tracing with Jacob's stopping criterion.
///
/// `start` must be the topmost-leftmost pixel of its region, which guarantees
/// the west neighbor is background.
fn trace_boundary(src: &Image<u8, 1>, start: (usize, usize), area: usize) -> Vec<(usize, usize)> {
    let width = src.width() as i64;
    let height = src.height() as i64;
    let data = src.as_slice();

    let is_fg = |x: i64, y: i64| -> bool {
        x >= 0 && y >= 0 && x < width && y < height && data[(y * width + x) as usize] != 0
    };

    let p0 = (start.0 as i64, start.1 as i64);
    let b0 = (p0.0 - 1, p0.1);

    let mut contour = vec![start];
    let mut p = p0;
    let mut b = b0;

    // a simple closed boundary visits each boundary pixel at most a few
    // times; the cap only guards against pathological masks
    let max_steps = 8 * area + 8;

    for _ in 0..max_steps {
        let back_dir = OFFSETS
            .iter()
            .position(|&(dx, dy)| (p.0 + dx, p.1 + dy) == b)
            .unwrap_or(0);

        let mut prev = b;
        let mut next = None;
        for step in 1..=8 {
            let (dx, dy) = OFFSETS[(back_dir + step) % 8];
            let q = (p.0 + dx, p.1 + dy);
            if is_fg(q.0, q.1) {
                next = Some(q);
                break;
            }
            prev = q;
        }

        let Some(q) = next else {
            break; // isolated pixel
        };

        b = prev;
        p = q;

        if p == p0 && b == b0 {
            break;
        }

        contour.push((p.0 as usize, p.1 as usize));
    }

    contour
}
