//! Editor panes: picking where to open a drawing, and an in-memory pane
//! layout implementing the host's workspace calls.

use crate::settings::Settings;
use serde::{Deserialize, Serialize};

/// Identifier of a pane (leaf) in the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeafId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Right,
    Left,
    Bottom,
    Top,
}

impl Direction {
    /// Order in which neighbours are tried when reusing a pane.
    pub const SEARCH_ORDER: [Direction; 4] =
        [Direction::Right, Direction::Left, Direction::Bottom, Direction::Top];
}

/// Pane operations of the host workspace.
pub trait Workspace {
    fn adjacent_leaf_in_direction(&self, leaf: LeafId, direction: Direction) -> Option<LeafId>;

    /// Split `leaf` and return the new pane, or `None` when `leaf` is unknown.
    fn create_leaf_by_split(&mut self, leaf: LeafId) -> Option<LeafId>;

    fn open_file(&mut self, leaf: LeafId, path: &str);
}

/// Pick the pane a drawing opened from `leaf` should use.
///
/// With `open_in_adjacent_pane` the first neighbour found (right, left,
/// bottom, top) is reused; otherwise, or when `leaf` has no neighbour, a new
/// pane is split off `leaf`. `None` when the split fails.
pub fn get_new_or_adjacent_leaf<W: Workspace>(
    settings: &Settings,
    workspace: &mut W,
    leaf: LeafId,
) -> Option<LeafId> {
    if settings.open_in_adjacent_pane {
        if let Some(adjacent) = Direction::SEARCH_ORDER
            .iter()
            .find_map(|dir| workspace.adjacent_leaf_in_direction(leaf, *dir))
        {
            return Some(adjacent);
        }
    }
    workspace.create_leaf_by_split(leaf)
}

/// Open `path` in the pane chosen by [`get_new_or_adjacent_leaf`].
///
/// Returns the pane used, or `None` when no pane could be chosen and
/// nothing was opened.
pub fn open_in_new_or_adjacent_leaf<W: Workspace>(
    settings: &Settings,
    workspace: &mut W,
    leaf: LeafId,
    path: &str,
) -> Option<LeafId> {
    let Some(target) = get_new_or_adjacent_leaf(settings, workspace, leaf) else {
        crate::log_warn!("workspace", "no pane to open {} from leaf {:?}", path, leaf);
        return None;
    };
    crate::log_debug!("workspace", "opening {} in leaf {:?}", path, target);
    workspace.open_file(target, path);
    Some(target)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    fn right(&self) -> f64 {
        self.x + self.width
    }

    fn bottom(&self) -> f64 {
        self.y + self.height
    }

    fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.y < other.bottom() - EPS && other.y < self.bottom() - EPS
    }

    fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.x < other.right() - EPS && other.x < self.right() - EPS
    }
}

const EPS: f64 = 1e-9;

fn touches(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

#[derive(Debug, Clone)]
struct Pane {
    id: LeafId,
    rect: Rect,
    file: Option<String>,
}

/// In-memory workspace: panes tile the unit square.
#[derive(Debug, Clone)]
pub struct PaneLayout {
    panes: Vec<Pane>,
    next_id: usize,
}

impl Default for PaneLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl PaneLayout {
    /// A layout with a single pane covering the whole workspace.
    pub fn new() -> Self {
        Self {
            panes: vec![Pane {
                id: LeafId(0),
                rect: Rect { x: 0.0, y: 0.0, width: 1.0, height: 1.0 },
                file: None,
            }],
            next_id: 1,
        }
    }

    pub fn root(&self) -> LeafId {
        self.panes[0].id
    }

    pub fn leaves(&self) -> Vec<LeafId> {
        self.panes.iter().map(|p| p.id).collect()
    }

    /// File currently shown in `leaf`
    pub fn file_in(&self, leaf: LeafId) -> Option<&str> {
        self.pane(leaf).and_then(|p| p.file.as_deref())
    }

    /// Split `leaf` horizontally: the new pane takes the bottom half.
    pub fn split_horizontal(&mut self, leaf: LeafId) -> Option<LeafId> {
        self.split(leaf, false)
    }

    fn pane(&self, leaf: LeafId) -> Option<&Pane> {
        self.panes.iter().find(|p| p.id == leaf)
    }

    fn split(&mut self, leaf: LeafId, vertical: bool) -> Option<LeafId> {
        let id = LeafId(self.next_id);
        let Some(pane) = self.panes.iter_mut().find(|p| p.id == leaf) else {
            crate::log_warn!("workspace", "split of unknown leaf {:?}", leaf);
            return None;
        };
        self.next_id += 1;

        let rect = if vertical {
            pane.rect.width /= 2.0;
            Rect { x: pane.rect.right(), ..pane.rect }
        } else {
            pane.rect.height /= 2.0;
            Rect { y: pane.rect.bottom(), ..pane.rect }
        };
        self.panes.push(Pane { id, rect, file: None });
        Some(id)
    }
}

impl Workspace for PaneLayout {
    fn adjacent_leaf_in_direction(&self, leaf: LeafId, direction: Direction) -> Option<LeafId> {
        let origin = self.pane(leaf)?.rect;
        self.panes
            .iter()
            .filter(|p| p.id != leaf)
            .filter(|p| match direction {
                Direction::Right => touches(p.rect.x, origin.right()) && p.rect.overlaps_vertically(&origin),
                Direction::Left => touches(p.rect.right(), origin.x) && p.rect.overlaps_vertically(&origin),
                Direction::Bottom => touches(p.rect.y, origin.bottom()) && p.rect.overlaps_horizontally(&origin),
                Direction::Top => touches(p.rect.bottom(), origin.y) && p.rect.overlaps_horizontally(&origin),
            })
            .min_by(|a, b| {
                (a.rect.y, a.rect.x)
                    .partial_cmp(&(b.rect.y, b.rect.x))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|p| p.id)
    }

    fn create_leaf_by_split(&mut self, leaf: LeafId) -> Option<LeafId> {
        self.split(leaf, true)
    }

    fn open_file(&mut self, leaf: LeafId, path: &str) {
        if let Some(pane) = self.panes.iter_mut().find(|p| p.id == leaf) {
            pane.file = Some(path.to_string());
        }
    }
}
