//! Inventory reduction
//!
//! Rooms and items are only ever summed, so the totals do not depend on
//! room order or on how items are grouped into rooms.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::domain::{PackingRequirement, Room};

/// Summed quantity per packing requirement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackingTally(BTreeMap<PackingRequirement, u64>);

impl PackingTally {
    pub fn add(&mut self, requirement: PackingRequirement, quantity: u64) {
        let entry = self.0.entry(requirement).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    pub fn get(&self, requirement: PackingRequirement) -> u64 {
        self.0.get(&requirement).copied().unwrap_or(0)
    }
}

impl FromIterator<(PackingRequirement, u64)> for PackingTally {
    fn from_iter<I: IntoIterator<Item = (PackingRequirement, u64)>>(iter: I) -> Self {
        let mut tally = Self::default();
        for (requirement, quantity) in iter {
            tally.add(requirement, quantity);
        }
        tally
    }
}

/// Loose items a room needs packed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomPackingLoad {
    pub room_id: Uuid,
    pub room_name: String,
    pub items_needing_packing: u64,
}

/// Job-wide inventory totals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryTotals {
    pub total_items: u64,
    pub total_cbm: Decimal,
    pub total_weight_kg: Decimal,
    pub bulky_items: u64,
    pub fragile_items: u64,
    pub packing_tally: PackingTally,
    /// One entry per room, in input order
    pub rooms: Vec<RoomPackingLoad>,
}

/// Reduce every room of a job into totals.
///
/// An item is bulky when its unit weight is over `bulky_threshold_kg`.
/// Missing or negative volume and weight contribute nothing. Sums saturate
/// at `Decimal::MAX` rather than overflow.
pub fn aggregate(rooms: &[Room], bulky_threshold_kg: Decimal) -> InventoryTotals {
    let mut totals = InventoryTotals::default();

    for room in rooms {
        let mut loose = 0u64;

        for item in &room.items {
            let qty = u64::from(item.quantity);
            let qty_dec = Decimal::from(qty);

            totals.total_items = totals.total_items.saturating_add(qty);
            totals.total_cbm = totals
                .total_cbm
                .saturating_add(item.unit_cbm().saturating_mul(qty_dec));
            totals.total_weight_kg = totals
                .total_weight_kg
                .saturating_add(item.unit_weight_kg().saturating_mul(qty_dec));

            if item.is_bulky(bulky_threshold_kg) {
                totals.bulky_items = totals.bulky_items.saturating_add(qty);
            }
            if item.fragile {
                totals.fragile_items = totals.fragile_items.saturating_add(qty);
            }

            totals.packing_tally.add(item.packing_requirement, qty);
            if item.packing_requirement.is_loose() {
                loose = loose.saturating_add(qty);
            }
        }

        totals.rooms.push(RoomPackingLoad {
            room_id: room.id,
            room_name: room.name.clone(),
            items_needing_packing: loose,
        });
    }

    totals
}
