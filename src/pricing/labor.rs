//! Packing labour estimate per room

use rust_decimal::Decimal;
use std::collections::BTreeSet;
use uuid::Uuid;

use super::aggregate::RoomPackingLoad;
use super::rules::{money, KITCHEN_ITEMS_PER_HOUR, MIN_PACKING_HOURS_PER_ROOM, ROOM_ITEMS_PER_HOUR};
use crate::domain::{PackingLaborBreakdown, RateTable, RoomPackingEstimate};

fn items_per_hour(room_name: &str) -> u64 {
    if room_name.to_lowercase().contains("kitchen") {
        KITCHEN_ITEMS_PER_HOUR
    } else {
        ROOM_ITEMS_PER_HOUR
    }
}

/// Hours to pack `items` loose items in a room.
pub fn packing_hours(room_name: &str, items: u64) -> Decimal {
    let hours = Decimal::from(items) / Decimal::from(items_per_hour(room_name));
    hours.max(MIN_PACKING_HOURS_PER_ROOM)
}

/// Estimate every room with something to pack. Totals only cover rooms
/// the customer selected, and cost is worked out once from the summed
/// hours.
pub fn packing_labor(
    rooms: &[RoomPackingLoad],
    selected: &BTreeSet<Uuid>,
    rates: &RateTable,
) -> PackingLaborBreakdown {
    let mut estimates = Vec::new();
    let mut selected_hours = Decimal::ZERO;

    for room in rooms.iter().filter(|r| r.items_needing_packing > 0) {
        let hours = packing_hours(&room.room_name, room.items_needing_packing);
        let is_selected = selected.contains(&room.room_id);

        if is_selected {
            selected_hours = selected_hours.saturating_add(hours);
        }

        estimates.push(RoomPackingEstimate {
            room_id: room.room_id,
            room_name: room.room_name.clone(),
            items_count: room.items_needing_packing,
            hours: hours.round_dp(1),
            cost: money(hours.saturating_mul(rates.packing_labor_per_hour)),
            is_selected,
        });
    }

    PackingLaborBreakdown {
        rooms: estimates,
        total_hours: selected_hours.round_dp(1),
        total_cost: money(selected_hours.saturating_mul(rates.packing_labor_per_hour)),
    }
}
