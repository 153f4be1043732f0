//! Tile map loading (text grid or Tiled JSON) and grid queries.
use raylib::prelude::Vector2;
use serde::Deserialize;
use std::collections::{HashSet, VecDeque};
use std::path::Path;

use crate::error::GameError;

/// gid used for floor cells of text maps.
pub const FLOOR_GID: u32 = 1;
/// gid used for wall cells of text maps.
pub const WALL_GID: u32 = 2;

const GID_FLIP_MASK: u32 = 0x1FFF_FFFF;

/// Spawn points found in the map itself (text markers or Tiled objects).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnMarkers {
    pub player: Option<Vector2>,
    pub enemy: Option<Vector2>,
    pub candle: Option<Vector2>,
    pub exit: Option<Vector2>,
}

/// Where tile images come from when the map references a tileset.
#[derive(Debug, Clone, PartialEq)]
pub struct TilesetInfo {
    pub first_gid: u32,
    pub image: Option<String>,
    pub columns: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct TileMap {
    pub width: usize,
    pub height: usize,
    pub tile_w: f32,
    pub tile_h: f32,
    /// Row-major gids, 0 = empty.
    pub tiles: Vec<u32>,
    solid: Vec<bool>,
    pub tileset: Option<TilesetInfo>,
    pub markers: SpawnMarkers,
}

impl TileMap {
    /// Walkable map with no walls, sized to cover `width_px` x `height_px`.
    pub fn open_field(width_px: f32, height_px: f32, tile: f32) -> Self {
        let width = (width_px / tile).ceil().max(1.0) as usize;
        let height = (height_px / tile).ceil().max(1.0) as usize;
        Self {
            width,
            height,
            tile_w: tile,
            tile_h: tile,
            tiles: vec![FLOOR_GID; width * height],
            solid: vec![false; width * height],
            tileset: None,
            markers: SpawnMarkers::default(),
        }
    }

    /// Text grid: `#` wall, `.`/space floor, `P` `E` `C` `X` spawn markers on floor.
    /// Unknown characters are walls; short rows are padded with walls.
    pub fn parse_text(text: &str, tile: f32) -> Result<Self, GameError> {
        let mut grid: Vec<Vec<char>> = Vec::new();
        for line in text.lines() {
            let row: Vec<char> = line.trim_end_matches('\r').chars().collect();
            if !row.is_empty() {
                grid.push(row);
            }
        }
        let width = grid.iter().map(|r| r.len()).max().unwrap_or(0);
        let height = grid.len();
        if width == 0 || height == 0 {
            return Err(GameError::InvalidMap("text map has no rows".to_string()));
        }

        let mut tiles = Vec::with_capacity(width * height);
        let mut solid = Vec::with_capacity(width * height);
        let mut markers = SpawnMarkers::default();
        let center = |i: usize, j: usize| Vector2::new((i as f32 + 0.5) * tile, (j as f32 + 0.5) * tile);

        for (j, row) in grid.iter().enumerate() {
            for i in 0..width {
                let ch = row.get(i).copied().unwrap_or('#');
                let wall = !matches!(ch, ' ' | '.' | '\t' | 'P' | 'E' | 'C' | 'X');
                match ch {
                    'P' => markers.player = Some(center(i, j)),
                    'E' => markers.enemy = Some(center(i, j)),
                    'C' => markers.candle = Some(center(i, j)),
                    'X' => markers.exit = Some(center(i, j)),
                    _ => {}
                }
                tiles.push(if wall { WALL_GID } else { FLOOR_GID });
                solid.push(wall);
            }
        }

        Ok(Self {
            width,
            height,
            tile_w: tile,
            tile_h: tile,
            tiles,
            solid,
            tileset: None,
            markers,
        })
    }

    /// Orthogonal Tiled JSON map with CSV tile data and embedded tilesets.
    ///
    /// The tile layer is `layer_name` if given, otherwise the first tile layer.
    /// A tile blocks movement if its gid is in `solid_gids` or its tileset
    /// entry has a true `collides` property. Objects named `player`, `enemy`,
    /// `candle` or `exit` in any object layer become spawn markers.
    pub fn from_tiled_json(
        json: &str,
        layer_name: Option<&str>,
        solid_gids: &[u32],
    ) -> Result<Self, GameError> {
        let map: TiledMap =
            serde_json::from_str(json).map_err(|e| GameError::Parse(format!("tiled map: {}", e)))?;
        if !map.orientation.is_empty() && map.orientation != "orthogonal" {
            return Err(GameError::InvalidMap(format!(
                "unsupported orientation '{}'",
                map.orientation
            )));
        }

        let layer = map
            .layers
            .iter()
            .filter(|l| l.kind == "tilelayer")
            .find(|l| layer_name.map(|n| l.name == n).unwrap_or(true))
            .ok_or_else(|| {
                GameError::InvalidMap(match layer_name {
                    Some(n) => format!("no tile layer named '{}'", n),
                    None => "map has no tile layer".to_string(),
                })
            })?;

        let data = match &layer.data {
            Some(serde_json::Value::Array(values)) => values
                .iter()
                .map(|v| {
                    v.as_u64()
                        .map(|g| (g as u32) & GID_FLIP_MASK)
                        .ok_or_else(|| GameError::Parse("tile data must be integers".to_string()))
                })
                .collect::<Result<Vec<u32>, GameError>>()?,
            Some(_) => {
                return Err(GameError::Parse(
                    "encoded tile layers are not supported, export the layer as CSV".to_string(),
                ))
            }
            None => return Err(GameError::InvalidMap(format!("layer '{}' has no data", layer.name))),
        };
        if data.len() != map.width * map.height {
            return Err(GameError::InvalidMap(format!(
                "layer '{}' has {} tiles, expected {}x{}",
                layer.name,
                data.len(),
                map.width,
                map.height
            )));
        }

        let mut solid_set: HashSet<u32> = solid_gids.iter().copied().collect();
        for ts in &map.tilesets {
            for tile in &ts.tiles {
                let collides = tile
                    .properties
                    .iter()
                    .any(|p| p.name == "collides" && p.value.as_bool() == Some(true));
                if collides {
                    solid_set.insert(ts.firstgid + tile.id);
                }
            }
        }
        let solid = data.iter().map(|g| solid_set.contains(g)).collect();

        let mut markers = SpawnMarkers::default();
        for obj in map.layers.iter().filter(|l| l.kind == "objectgroup").flat_map(|l| &l.objects) {
            let p = Vector2::new(obj.x + obj.width * 0.5, obj.y + obj.height * 0.5);
            match obj.name.to_ascii_lowercase().as_str() {
                "player" => markers.player = Some(p),
                "enemy" | "shadow" => markers.enemy = Some(p),
                "candle" | "item" => markers.candle = Some(p),
                "exit" => markers.exit = Some(p),
                _ => {}
            }
        }

        let tileset = map.tilesets.first().map(|ts| TilesetInfo {
            first_gid: ts.firstgid,
            image: ts.image.clone(),
            columns: ts.columns,
        });

        Ok(Self {
            width: map.width,
            height: map.height,
            tile_w: map.tilewidth as f32,
            tile_h: map.tileheight as f32,
            tiles: data,
            solid,
            tileset,
            markers,
        })
    }

    /// Loads by extension: `.tmj`/`.json` as Tiled, anything else as a text grid.
    pub fn load(
        path: &Path,
        tile: f32,
        layer_name: Option<&str>,
        solid_gids: &[u32],
    ) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| GameError::Io(format!("{}: {}", path.display(), e)))?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let map = match ext {
            "tmj" | "json" => Self::from_tiled_json(&text, layer_name, solid_gids)?,
            _ => Self::parse_text(&text, tile)?,
        };
        tracing::info!(
            path = %path.display(),
            width = map.width,
            height = map.height,
            "loaded tile map"
        );
        Ok(map)
    }

    #[inline]
    pub fn cell_centre(&self, i: usize, j: usize) -> Vector2 {
        Vector2::new((i as f32 + 0.5) * self.tile_w, (j as f32 + 0.5) * self.tile_h)
    }

    #[inline]
    pub fn gid(&self, i: usize, j: usize) -> u32 {
        if i < self.width && j < self.height { self.tiles[j * self.width + i] } else { 0 }
    }

    #[inline]
    pub fn is_cell_free(&self, i: usize, j: usize) -> bool {
        i < self.width && j < self.height && !self.solid[j * self.width + i]
    }

    #[inline]
    pub fn cell_of(&self, wx: f32, wy: f32) -> Option<(usize, usize)> {
        let i = (wx / self.tile_w).floor();
        let j = (wy / self.tile_h).floor();
        if i < 0.0 || j < 0.0 {
            return None;
        }
        let (i, j) = (i as usize, j as usize);
        if i >= self.width || j >= self.height {
            return None;
        }
        Some((i, j))
    }

    /// World point inside a wall or outside the map.
    pub fn is_solid_at(&self, wx: f32, wy: f32) -> bool {
        match self.cell_of(wx, wy) {
            Some((i, j)) => !self.is_cell_free(i, j),
            None => true,
        }
    }

    /// Circle of radius `r` at (wx, wy) touches no wall; centre plus 8 rim samples.
    pub fn is_free_with_radius(&self, wx: f32, wy: f32, r: f32) -> bool {
        let d = r * std::f32::consts::FRAC_1_SQRT_2;
        let samples = [
            (wx, wy),
            (wx + r, wy),
            (wx - r, wy),
            (wx, wy + r),
            (wx, wy - r),
            (wx + d, wy + d),
            (wx - d, wy + d),
            (wx + d, wy - d),
            (wx - d, wy - d),
        ];
        samples.iter().all(|&(sx, sy)| !self.is_solid_at(sx, sy))
    }

    /// A circle of radius `r` can travel the segment without touching a wall.
    /// `r = 0` is a plain sight line.
    pub fn sweep_clear(&self, from: Vector2, to: Vector2, r: f32) -> bool {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let step = (r * 0.33).min(self.tile_w.min(self.tile_h) * 0.4).max(1.0);
        let steps = (dx.hypot(dy) / step).ceil().max(1.0) as i32;
        (0..=steps).all(|k| {
            let t = k as f32 / steps as f32;
            self.is_free_with_radius(from.x + dx * t, from.y + dy * t, r)
        })
    }

    /// BFS over free cells; returns the centre of the first cell on the path
    /// from `from` toward `to`, or `None` if either end is blocked or unreachable.
    pub fn next_step_towards(&self, from: Vector2, to: Vector2) -> Option<Vector2> {
        let start = self.cell_of(from.x, from.y)?;
        let goal = self.cell_of(to.x, to.y)?;
        if !self.is_cell_free(start.0, start.1) || !self.is_cell_free(goal.0, goal.1) {
            return None;
        }
        if start == goal {
            return Some(to);
        }

        let (w, h) = (self.width, self.height);
        let mut prev: Vec<Option<(usize, usize)>> = vec![None; w * h];
        let mut q = VecDeque::new();
        prev[start.1 * w + start.0] = Some(start);
        q.push_back(start);
        let dirs: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        while let Some((cx, cy)) = q.pop_front() {
            if (cx, cy) == goal {
                break;
            }
            for (dx, dy) in dirs {
                let nx = cx as isize + dx;
                let ny = cy as isize + dy;
                if nx < 0 || ny < 0 {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                if nx >= w || ny >= h || prev[ny * w + nx].is_some() || !self.is_cell_free(nx, ny) {
                    continue;
                }
                prev[ny * w + nx] = Some((cx, cy));
                q.push_back((nx, ny));
            }
        }
        prev[goal.1 * w + goal.0]?;

        // walk back from the goal to the cell right after start
        let mut cur = goal;
        let mut last = cur;
        while cur != start {
            last = cur;
            cur = prev[cur.1 * w + cur.0]?;
        }
        Some(self.cell_centre(last.0, last.1))
    }
}

#[derive(Deserialize)]
struct TiledMap {
    width: usize,
    height: usize,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    orientation: String,
    layers: Vec<TiledLayer>,
    #[serde(default)]
    tilesets: Vec<TiledTileset>,
}

#[derive(Deserialize)]
struct TiledLayer {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    objects: Vec<TiledObject>,
}

#[derive(Deserialize)]
struct TiledObject {
    #[serde(default)]
    name: String,
    x: f32,
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
}

#[derive(Deserialize)]
struct TiledTileset {
    firstgid: u32,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    columns: Option<u32>,
    #[serde(default)]
    tiles: Vec<TiledTile>,
}

#[derive(Deserialize)]
struct TiledTile {
    id: u32,
    #[serde(default)]
    properties: Vec<TiledProperty>,
}

#[derive(Deserialize)]
struct TiledProperty {
    name: String,
    value: serde_json::Value,
}
