//! Packing materials bill of quantities
//!
//! Box counts come from the packing tally. Tape follows the box count and
//! paper follows the load volume.

use rust_decimal::Decimal;

use super::aggregate::PackingTally;
use super::rules::{
    money, BOXES_PER_TAPE_ROLL, ITEMS_PER_LARGE_BOX, ITEMS_PER_MEDIUM_BOX, ITEMS_PER_SMALL_BOX,
    PAPER_CBM_BLOCK, PAPER_PACKS_PER_BLOCK,
};
use crate::domain::{
    MaterialLine, PackingMaterialPrices, PackingMaterialsBreakdown, PackingRequirement, RateTable,
};

/// Boxes needed for `items` loose items at `per_box` items a box. Any
/// items at all need at least one box.
fn boxes_for(items: u64, per_box: u64) -> u64 {
    if items == 0 {
        0
    } else {
        (items / per_box).max(1)
    }
}

fn tape_rolls_for(boxes: u64) -> u64 {
    boxes.div_ceil(BOXES_PER_TAPE_ROLL)
}

fn paper_packs_for(total_cbm: Decimal) -> Decimal {
    if total_cbm <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (total_cbm / PAPER_CBM_BLOCK).saturating_mul(PAPER_PACKS_PER_BLOCK)
}

struct Line {
    qty: Decimal,
    cost: Decimal,
}

impl Line {
    fn new(qty: impl Into<Decimal>, unit_price: Decimal) -> Self {
        let qty = qty.into();
        Self {
            qty,
            cost: qty.saturating_mul(unit_price),
        }
    }

    fn report(&self) -> MaterialLine {
        MaterialLine {
            qty: self.qty,
            cost: money(self.cost),
        }
    }
}

/// Quantities and costs for every material.
///
/// When the customer supplies their own materials the quantities are
/// still worked out, but every price is zero.
pub fn packing_materials(
    tally: &PackingTally,
    total_cbm: Decimal,
    customer_provides_packing: bool,
    rates: &RateTable,
) -> PackingMaterialsBreakdown {
    let prices = if customer_provides_packing {
        PackingMaterialPrices::zero()
    } else {
        rates.packing_materials.clone()
    };

    let small = boxes_for(tally.get(PackingRequirement::SmallBox), ITEMS_PER_SMALL_BOX);
    let medium = boxes_for(tally.get(PackingRequirement::MediumBox), ITEMS_PER_MEDIUM_BOX);
    let large = boxes_for(tally.get(PackingRequirement::LargeBox), ITEMS_PER_LARGE_BOX);
    // Nothing in the inventory is tagged for extra small boxes yet
    let extra_small = 0u64;
    let wardrobe = tally.get(PackingRequirement::WardrobeBox);
    let mattress = tally.get(PackingRequirement::MattressCover);

    let total_boxes = small + medium + large + extra_small + wardrobe;

    let small_line = Line::new(small, prices.small_box);
    let medium_line = Line::new(medium, prices.medium_box);
    let large_line = Line::new(large, prices.large_box);
    let extra_small_line = Line::new(extra_small, prices.extra_small_box);
    let wardrobe_line = Line::new(wardrobe, prices.wardrobe_box);
    let mattress_line = Line::new(mattress, prices.mattress_cover);
    let tape_line = Line::new(tape_rolls_for(total_boxes), prices.tape_roll);
    let paper_line = Line::new(paper_packs_for(total_cbm), prices.paper_pack);

    let total_cost = [
        &small_line,
        &medium_line,
        &large_line,
        &extra_small_line,
        &wardrobe_line,
        &mattress_line,
        &tape_line,
        &paper_line,
    ]
    .iter()
    .fold(Decimal::ZERO, |sum, line| sum.saturating_add(line.cost));

    let paper = paper_line.report();

    PackingMaterialsBreakdown {
        small_boxes: small_line.report(),
        medium_boxes: medium_line.report(),
        large_boxes: large_line.report(),
        extra_small_boxes: extra_small_line.report(),
        wardrobe_boxes: wardrobe_line.report(),
        mattress_covers: mattress_line.report(),
        tape_rolls: tape_line.report(),
        // Paper is continuous; one decimal is enough to show
        paper_packs: MaterialLine {
            qty: paper.qty.round_dp(1),
            cost: paper.cost,
        },
        total_boxes,
        total_cost: money(total_cost),
        customer_provides_packing,
    }
}
