//! Box plot of purchase amount per family size.

use serde::Serialize;
use tracing::{debug, info};

use crate::quantile::{GroupSummary, summarize};
use crate::record::{FamilySize, Record};
use crate::scale::{BandScale, LinearScale};
use crate::selection::{FamilySelection, SelectionBroadcaster};
use crate::views::ChartLayout;

const PADDING_INNER: f64 = 0.2;
const PADDING_OUTER: f64 = 0.3;

/// Geometry for one family size. Vertical positions are pixel y values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxGlyph {
    pub family_size: FamilySize,
    pub label: String,
    pub summary: GroupSummary,
    pub x: f64,
    pub width: f64,
    pub center_x: f64,
    pub box_top: f64,
    pub box_bottom: f64,
    pub median_y: f64,
    pub whisker_top: f64,
    pub whisker_bottom: f64,
    pub outlier_ys: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoxPlotView {
    pub layout: ChartLayout,
    pub family_scale: BandScale<FamilySize>,
    pub amount_scale: LinearScale,
    pub boxes: Vec<BoxGlyph>,
}

impl BoxPlotView {
    /// Summarizes purchase amounts per family size, ascending along x.
    /// The y axis spans zero to the largest purchase, rounded outward.
    pub fn build(records: &[Record], layout: ChartLayout) -> Self {
        let summaries =
            summarize(records, |r| r.family_size, |r| r.purchase_amount).sorted_by_key();

        let family_scale = BandScale::new(
            summaries.keys().copied().collect(),
            0.0,
            layout.inner_width(),
            PADDING_INNER,
            PADDING_OUTER,
        );
        let max_amount = records
            .iter()
            .map(|r| r.purchase_amount)
            .fold(0.0, f64::max);
        let amount_scale = LinearScale::new(0.0, max_amount, layout.inner_height(), 0.0, true);

        let boxes: Vec<BoxGlyph> = summaries
            .into_vec()
            .into_iter()
            .filter_map(|group| {
                let band = family_scale.band(&group.key)?;
                let s = group.summary;
                Some(BoxGlyph {
                    family_size: group.key,
                    label: format!("Family {}", group.key),
                    x: band.start,
                    width: band.width,
                    center_x: band.center(),
                    box_top: amount_scale.map(s.q3),
                    box_bottom: amount_scale.map(s.q1),
                    median_y: amount_scale.map(s.median),
                    whisker_top: amount_scale.map(s.upper_fence),
                    whisker_bottom: amount_scale.map(s.lower_fence),
                    outlier_ys: s.outliers.iter().map(|&v| amount_scale.map(v)).collect(),
                    summary: s,
                })
            })
            .collect();

        debug!(boxes = boxes.len(), "Box plot view built");
        BoxPlotView {
            layout,
            family_scale,
            amount_scale,
            boxes,
        }
    }

    pub fn glyph(&self, family_size: FamilySize) -> Option<&BoxGlyph> {
        self.boxes.iter().find(|b| b.family_size == family_size)
    }

    /// Handles a click on a box: broadcasts its family size on `channel`.
    ///
    /// Returns `false` without publishing if no box exists for `family_size`.
    pub fn select_family(
        &self,
        family_size: FamilySize,
        channel: &SelectionBroadcaster<FamilySelection>,
    ) -> bool {
        if self.glyph(family_size).is_none() {
            return false;
        }
        info!(family_size, "Family size selected on box plot");
        channel.publish(Some(family_size));
        true
    }
}
