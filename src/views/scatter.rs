//! Age × income scatter plot with brushing and family-size highlighting.

use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::debug;

use crate::error::BrushParseError;
use crate::record::{FamilySize, Record};
use crate::scale::{LinearScale, extent};
use crate::selection::{FamilySelection, SelectionBroadcaster, SubscriptionId};
use crate::views::ChartLayout;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Position of the source record in the loaded dataset.
    pub index: usize,
    pub age: u32,
    pub income: f64,
    pub purchase_amount: f64,
    pub family_size: FamilySize,
    pub x: f64,
    pub y: f64,
    /// Purchase amount normalized to `[0, 1]` over the dataset, for a
    /// sequential color ramp.
    pub color_t: f64,
}

/// Visual state of a point relative to the current family selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Normal,
    Highlighted,
    Dimmed,
}

/// A pixel-space brush rectangle. Corners may be given in any order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrushSelection {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushSelection {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        BrushSelection { x0, y0, x1, y1 }
    }

    /// Inclusive containment test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (left, right) = (self.x0.min(self.x1), self.x0.max(self.x1));
        let (top, bottom) = (self.y0.min(self.y1), self.y0.max(self.y1));
        x >= left && x <= right && y >= top && y <= bottom
    }
}

impl FromStr for BrushSelection {
    type Err = BrushParseError;

    /// Parses `x0,y0,x1,y1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| BrushParseError(s.to_string()))?;

        match parts[..] {
            [x0, y0, x1, y1] if parts.iter().all(|v| v.is_finite()) => {
                Ok(BrushSelection::new(x0, y0, x1, y1))
            }
            _ => Err(BrushParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterView {
    pub layout: ChartLayout,
    pub age_scale: LinearScale,
    pub income_scale: LinearScale,
    pub purchase_extent: (f64, f64),
    pub points: Vec<ScatterPoint>,
}

impl ScatterView {
    /// Places every record by age (x) and income (y). Both axes span the
    /// observed extent without rounding.
    pub fn build(records: &[Record], layout: ChartLayout) -> Self {
        let (age_min, age_max) = extent(records.iter().map(|r| r.age as f64)).unwrap_or_default();
        let (income_min, income_max) = extent(records.iter().map(|r| r.income)).unwrap_or_default();
        let purchase_extent = extent(records.iter().map(|r| r.purchase_amount)).unwrap_or_default();

        let age_scale = LinearScale::new(age_min, age_max, 0.0, layout.inner_width(), false);
        let income_scale =
            LinearScale::new(income_min, income_max, layout.inner_height(), 0.0, false);
        let color_scale = LinearScale::new(purchase_extent.0, purchase_extent.1, 0.0, 1.0, false);

        let points = records
            .iter()
            .enumerate()
            .map(|(index, r)| ScatterPoint {
                index,
                age: r.age,
                income: r.income,
                purchase_amount: r.purchase_amount,
                family_size: r.family_size,
                x: age_scale.map(r.age as f64),
                y: income_scale.map(r.income),
                color_t: color_scale.map(r.purchase_amount),
            })
            .collect::<Vec<_>>();

        debug!(points = points.len(), "Scatter view built");
        ScatterView {
            layout,
            age_scale,
            income_scale,
            purchase_extent,
            points,
        }
    }

    /// Record indices of the points inside `selection`.
    pub fn brushed(&self, selection: &BrushSelection) -> Vec<usize> {
        self.points
            .iter()
            .filter(|p| selection.contains(p.x, p.y))
            .map(|p| p.index)
            .collect()
    }

    /// Per-point emphasis for a family selection.
    pub fn highlight(&self, selection: FamilySelection) -> Vec<Emphasis> {
        emphasis_for(self.points.iter().map(|p| p.family_size), selection)
    }

    /// Subscribes to `channel` and keeps a highlight state in sync with each
    /// published selection. The subscription ends when the returned handle is
    /// dropped.
    pub fn follow_selection<'c>(
        &self,
        channel: &'c SelectionBroadcaster<FamilySelection>,
    ) -> LinkedHighlight<'c> {
        let family_sizes: Vec<FamilySize> = self.points.iter().map(|p| p.family_size).collect();
        let state = Arc::new(Mutex::new(vec![Emphasis::Normal; family_sizes.len()]));

        let sink = Arc::clone(&state);
        let id = channel.subscribe(move |selection| {
            let emphasis = emphasis_for(family_sizes.iter().copied(), *selection);
            *sink.lock().unwrap_or_else(PoisonError::into_inner) = emphasis;
        });

        LinkedHighlight { channel, id, state }
    }
}

fn emphasis_for<I>(family_sizes: I, selection: FamilySelection) -> Vec<Emphasis>
where
    I: Iterator<Item = FamilySize>,
{
    family_sizes
        .map(|size| match selection {
            None => Emphasis::Normal,
            Some(selected) if selected == size => Emphasis::Highlighted,
            Some(_) => Emphasis::Dimmed,
        })
        .collect()
}

/// Highlight state owned by a scatter view that follows a selection channel.
#[derive(Debug)]
pub struct LinkedHighlight<'c> {
    channel: &'c SelectionBroadcaster<FamilySelection>,
    id: SubscriptionId,
    state: Arc<Mutex<Vec<Emphasis>>>,
}

impl Drop for LinkedHighlight<'_> {
    fn drop(&mut self) {
        self.channel.unsubscribe(self.id);
    }
}

impl LinkedHighlight<'_> {
    pub fn subscription(&self) -> SubscriptionId {
        self.id
    }

    /// Snapshot of the emphasis for every point, in point order.
    pub fn emphasis(&self) -> Vec<Emphasis> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn highlighted_count(&self) -> usize {
        self.emphasis()
            .iter()
            .filter(|e| **e == Emphasis::Highlighted)
            .count()
    }
}
