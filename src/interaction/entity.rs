use serde::{Deserialize, Serialize};

use crate::core::{Point, Rect, Region};

/// Hotspot shape of a clickable chart entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityArea {
    Rect(Rect),
    Region(Region),
}

impl EntityArea {
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        match self {
            EntityArea::Rect(rect) => rect.contains(point),
            EntityArea::Region(region) => region.contains(point),
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            EntityArea::Rect(rect) => (!rect.is_empty()).then_some(*rect),
            EntityArea::Region(region) => region.bounds(),
        }
    }
}

/// What a chart entity refers to in its dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    XyItem { series: usize, item: usize },
    CategoryItem { row_key: String, column_key: String },
    PieSection { key: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEntity {
    pub area: EntityArea,
    pub kind: EntityKind,
    pub tooltip: Option<String>,
}

/// Entities registered while painting, in paint order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityCollection {
    entities: Vec<ChartEntity>,
}

impl EntityCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: ChartEntity) {
        self.entities.push(entity);
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartEntity> {
        self.entities.iter()
    }

    /// Topmost entity under `point`; later entities were painted on top.
    #[must_use]
    pub fn entity_at(&self, point: Point) -> Option<&ChartEntity> {
        self.entities
            .iter()
            .rev()
            .find(|entity| entity.area.contains(point))
    }
}
