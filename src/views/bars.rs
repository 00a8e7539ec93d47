//! Grouped bar chart: purchase counts per chain, one bar per payment method.

use serde::Serialize;
use tracing::debug;

use crate::crosstab::CrossTab;
use crate::record::Record;
use crate::scale::{BandScale, LinearScale};
use crate::views::ChartLayout;

const GROUP_PADDING: f64 = 0.2;
const BAR_PADDING: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub chain: String,
    pub payment_method: String,
    pub count: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupedBarView {
    pub layout: ChartLayout,
    pub crosstab: CrossTab,
    pub chain_scale: BandScale<String>,
    pub method_scale: BandScale<String>,
    pub count_scale: LinearScale,
    pub bars: Vec<Bar>,
}

impl GroupedBarView {
    /// Lays out one bar per (chain, payment method) cell, including zero
    /// counts, chains left to right in first-occurrence order.
    pub fn build(records: &[Record], layout: ChartLayout) -> Self {
        let crosstab = CrossTab::by_chain_and_payment(records);
        let width = layout.inner_width();
        let height = layout.inner_height();

        let chain_scale =
            BandScale::with_padding(crosstab.rows().to_vec(), 0.0, width, GROUP_PADDING);
        let method_scale = BandScale::with_padding(
            crosstab.columns().to_vec(),
            0.0,
            chain_scale.bandwidth(),
            BAR_PADDING,
        );
        let count_scale = LinearScale::new(0.0, crosstab.max_count() as f64, height, 0.0, true);

        let mut bars = Vec::new();
        for (chain, method, count) in crosstab.cells() {
            let chain = chain.to_string();
            let method = method.to_string();
            let (Some(group_x), Some(offset)) =
                (chain_scale.position(&chain), method_scale.position(&method))
            else {
                continue;
            };

            let y = count_scale.map(count as f64);
            bars.push(Bar {
                chain,
                payment_method: method,
                count,
                x: group_x + offset,
                y,
                width: method_scale.bandwidth(),
                height: height - y,
            });
        }

        debug!(bars = bars.len(), "Grouped bar view built");
        GroupedBarView {
            layout,
            crosstab,
            chain_scale,
            method_scale,
            count_scale,
            bars,
        }
    }
}
