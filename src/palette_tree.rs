//! k-d tree over palette colors for nearest-color lookup.
//!
//! Used to check how far the lossy fixture drifts: a decoded JPEG pixel
//! "hits" when its nearest palette color is still the one laid out there.

use crate::models::{ColorEntry, Rgb};

const AXES: usize = 3;

#[derive(Debug, Clone)]
struct Node {
    entry: ColorEntry,
    axis: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Static 3-d tree keyed on (R, G, B).
#[derive(Debug, Clone, Default)]
pub struct RgbTree {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl RgbTree {
    /// Build a balanced tree by median split, cycling R, G, B by depth.
    pub fn build<'a>(entries: impl IntoIterator<Item = &'a ColorEntry>) -> Self {
        let mut items: Vec<ColorEntry> = entries.into_iter().cloned().collect();
        let mut tree = Self {
            nodes: Vec::with_capacity(items.len()),
            root: None,
        };
        tree.root = tree.build_subtree(&mut items, 0);
        tree
    }

    fn build_subtree(&mut self, items: &mut [ColorEntry], depth: usize) -> Option<usize> {
        if items.is_empty() {
            return None;
        }

        let axis = depth % AXES;
        // Stable sort keeps equal keys in input order, so ties stay predictable
        items.sort_by_key(|e| e.rgb.axis(axis));
        let median = items.len() / 2;

        let (lower, rest) = items.split_at_mut(median);
        let (pivot, upper) = rest.split_at_mut(1);

        let idx = self.nodes.len();
        self.nodes.push(Node {
            entry: pivot[0].clone(),
            axis,
            left: None,
            right: None,
        });

        let left = self.build_subtree(lower, depth + 1);
        let right = self.build_subtree(upper, depth + 1);
        self.nodes[idx].left = left;
        self.nodes[idx].right = right;

        Some(idx)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nearest entry to `target` and its squared distance.
    ///
    /// Returns `None` only for an empty tree.
    pub fn nearest(&self, target: Rgb) -> Option<(&ColorEntry, u32)> {
        let root = self.root?;
        let mut best = (root, u32::MAX);
        self.search(root, target, &mut best);
        Some((&self.nodes[best.0].entry, best.1))
    }

    fn search(&self, idx: usize, target: Rgb, best: &mut (usize, u32)) {
        let node = &self.nodes[idx];
        let split = node.entry.rgb.axis(node.axis);
        let value = target.axis(node.axis);

        let (nearer, farther) = if value < split {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(n) = nearer {
            self.search(n, target, best);
        }

        let distance = target.distance_squared(node.entry.rgb);
        if distance < best.1 {
            *best = (idx, distance);
        }

        if let Some(f) = farther {
            let plane = value.abs_diff(split) as u32;
            if plane * plane < best.1 {
                self.search(f, target, best);
            }
        }
    }
}
