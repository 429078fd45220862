//! Map configuration and obstacle compilation
//!
//! Map data arrives from an external collaborator as declarative objects.
//! Composites (dungeon rooms) expand into primitive wall rectangles here,
//! before any collision test runs.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;
use crate::consts::{DEFAULT_BORDER, DEFAULT_OBJECT_SIZE, DEFAULT_PRIORITY};

/// Kinds of map objects
///
/// `Dungeon` is composite-only: it never survives compilation. Kinds this
/// build does not know deserialize as `Scenery` and collide like any other
/// rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Wall,
    Forest,
    Plant,
    Npc,
    Dungeon,
    #[serde(other)]
    Scenery,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Wall => "wall",
            ObjectKind::Forest => "forest",
            ObjectKind::Plant => "plant",
            ObjectKind::Npc => "npc",
            ObjectKind::Dungeon => "dungeon",
            ObjectKind::Scenery => "scenery",
        }
    }
}

/// One declarative map object as the map-data collaborator supplies it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapObject {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Center position in map units
    pub x: f32,
    pub y: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub priority: Option<i32>,
    /// Wall thickness for dungeon composites
    pub border: Option<f32>,
    /// Close the dungeon's south side with a fourth wall. The default
    /// leaves it open as the entrance.
    #[serde(default)]
    pub sealed: bool,
}

/// Scene configuration from the external map-data collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    pub map_width: f32,
    pub map_height: f32,
    /// Viewport extents; default to the full map
    pub display_width: Option<f32>,
    pub display_height: Option<f32>,
    #[serde(default)]
    pub objects: Vec<MapObject>,
}

impl MapConfig {
    pub fn map_size(&self) -> Vec2 {
        Vec2::new(self.map_width, self.map_height)
    }

    pub fn display_size(&self) -> Vec2 {
        Vec2::new(
            self.display_width.unwrap_or(self.map_width),
            self.display_height.unwrap_or(self.map_height),
        )
    }
}

/// Expand declarative map objects into primitive obstacles
///
/// Pure and deterministic. Primitives pass through with defaults applied;
/// dungeon composites become border walls. Output is sorted by priority
/// descending (stable, so ties keep input order): paint order for the
/// rendering collaborator. Collision does not care about order.
pub fn compile(objects: &[MapObject]) -> Vec<Obstacle> {
    let mut out = Vec::with_capacity(objects.len());
    for obj in objects {
        match obj.kind {
            ObjectKind::Dungeon => expand_dungeon(obj, &mut out),
            kind => out.push(Obstacle {
                id: obj.id.clone(),
                kind,
                pos: Vec2::new(obj.x, obj.y),
                size: Vec2::new(
                    obj.width.unwrap_or(DEFAULT_OBJECT_SIZE),
                    obj.height.unwrap_or(DEFAULT_OBJECT_SIZE),
                ),
                priority: obj.priority.unwrap_or(DEFAULT_PRIORITY),
            }),
        }
    }
    out.sort_by_key(|o| std::cmp::Reverse(o.priority));
    out
}

/// Border walls for a dungeon room: the top wall spans the full width, the
/// side walls fill the height remaining below it. The south side stays open
/// unless the composite is `sealed`.
fn expand_dungeon(obj: &MapObject, out: &mut Vec<Obstacle>) {
    let w = obj.width.unwrap_or(DEFAULT_OBJECT_SIZE);
    let h = obj.height.unwrap_or(DEFAULT_OBJECT_SIZE);
    let border = obj.border.unwrap_or(DEFAULT_BORDER);
    let priority = obj.priority.unwrap_or(DEFAULT_PRIORITY);

    let wall = |suffix: &str, pos: Vec2, size: Vec2| Obstacle {
        id: format!("{}_{}", obj.id, suffix),
        kind: ObjectKind::Wall,
        pos,
        size,
        priority,
    };

    let (side_y, side_h) = if obj.sealed {
        // Sides sit between the top and bottom walls
        (obj.y, h - 2.0 * border)
    } else {
        (obj.y + border / 2.0, h - border)
    };

    out.push(wall(
        "top",
        Vec2::new(obj.x, obj.y - (h - border) / 2.0),
        Vec2::new(w, border),
    ));
    out.push(wall(
        "left",
        Vec2::new(obj.x - (w - border) / 2.0, side_y),
        Vec2::new(border, side_h),
    ));
    out.push(wall(
        "right",
        Vec2::new(obj.x + (w - border) / 2.0, side_y),
        Vec2::new(border, side_h),
    ));
    if obj.sealed {
        out.push(wall(
            "bottom",
            Vec2::new(obj.x, obj.y + (h - border) / 2.0),
            Vec2::new(w, border),
        ));
    }
}

/// Number of decorative plants `demo_map` tries to scatter
const SCATTER_COUNT: u32 = 6;

/// The demo map: showcase objects on a 100x100 field with a 50x50 display
/// window, plus a seeded scatter of decorative plants kept clear of the
/// fixed objects and the spawn point.
pub fn demo_map(seed: u64) -> MapConfig {
    fn fixed(id: &str, kind: ObjectKind, x: f32, y: f32, w: f32, h: f32, priority: i32) -> MapObject {
        MapObject {
            id: id.into(),
            kind,
            x,
            y,
            width: Some(w),
            height: Some(h),
            priority: Some(priority),
            border: None,
            sealed: false,
        }
    }

    let mut objects = vec![
        fixed("forest1", ObjectKind::Forest, 50.0, 100.0, 60.0, 30.0, 10),
        fixed("plant1", ObjectKind::Plant, 30.0, 40.0, 8.0, 8.0, 20),
        fixed("wall1", ObjectKind::Wall, 20.0, 30.0, 40.0, 2.0, 40),
        MapObject {
            id: "dungeon1".into(),
            kind: ObjectKind::Dungeon,
            x: 100.0,
            y: 60.0,
            width: Some(30.0),
            height: Some(36.0),
            priority: Some(70),
            border: Some(3.0),
            sealed: false,
        },
    ];

    let compiled = compile(&objects);
    let spawn = Vec2::new(50.0, 50.0);
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut placed = 0u32;
    let mut attempts = 0u32;
    while placed < SCATTER_COUNT && attempts < 64 {
        attempts += 1;
        let pos = Vec2::new(rng.random_range(5.0..95.0), rng.random_range(5.0..95.0));
        let near_spawn = (pos - spawn).abs().max_element() < 10.0;
        // Padded overlap check keeps scattered plants off the fixed objects
        if near_spawn || compiled.iter().any(|o| o.overlaps_box(pos, Vec2::splat(9.0))) {
            continue;
        }
        objects.push(fixed(
            &format!("scatter_plant{placed}"),
            ObjectKind::Plant,
            pos.x,
            pos.y,
            3.0,
            3.0,
            15,
        ));
        placed += 1;
    }

    MapConfig {
        map_width: 100.0,
        map_height: 100.0,
        display_width: Some(50.0),
        display_height: Some(50.0),
        objects,
    }
}
