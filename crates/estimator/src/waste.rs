//! Waste composition by sorting stream.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, ImpactEntry, TimeWindow};
use crate::factors::{ImpactCategory, WasteStream};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WasteShare {
    pub stream: WasteStream,
    pub kg: f64,
    pub percent: f64,
}

/// Every stream is listed, in table order, even when nothing was logged.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteSummary {
    pub window: TimeWindow,
    pub total_kg: f64,
    pub shares: Vec<WasteShare>,
    /// Recyclable share of the total, 0 when nothing was logged.
    pub recycling_rate: f64,
}

impl Default for WasteSummary {
    fn default() -> Self {
        summarize_waste(&[], TimeWindow::All)
    }
}

impl WasteSummary {
    pub fn share(&self, stream: WasteStream) -> Option<&WasteShare> {
        self.shares.iter().find(|s| s.stream == stream)
    }
}

fn is_stream(entry: &ImpactEntry, stream: WasteStream) -> bool {
    entry.category == ImpactCategory::Waste(stream)
}

pub fn summarize_waste(entries: &[ImpactEntry], window: TimeWindow) -> WasteSummary {
    let in_window = |e: &ImpactEntry| window.contains(&e.timestamp);
    let total_kg = aggregate(entries, |e| {
        in_window(e) && matches!(e.category, ImpactCategory::Waste(_))
    });
    let percent_of = |kg: f64| if total_kg > 0.0 { 100.0 * kg / total_kg } else { 0.0 };

    let shares: Vec<WasteShare> = WasteStream::ALL
        .iter()
        .map(|&stream| {
            let kg = aggregate(entries, |e| in_window(e) && is_stream(e, stream));
            WasteShare {
                stream,
                kg,
                percent: percent_of(kg),
            }
        })
        .collect();
    let recyclable = shares
        .iter()
        .find(|s| s.stream == WasteStream::Recyclable)
        .map_or(0.0, |s| s.kg);

    WasteSummary {
        window,
        total_kg,
        shares,
        recycling_rate: percent_of(recyclable),
    }
}
