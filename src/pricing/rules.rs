//! Fixed pricing rules
//!
//! Engine-level constants. Anything a company can change lives on the rate
//! table instead.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// --- Distance ---

/// Mean Earth radius used by the haversine formula, in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Rate tables price distance per kilometre.
pub const KM_PER_MILE: f64 = 1.609344;

// --- Access ---

/// Parking walk is charged per started block of this many metres.
pub const PARKING_WALK_BLOCK_METERS: u32 = 50;

/// Outdoor steps are charged per started block of this many steps.
pub const OUTDOOR_STEPS_BLOCK: u32 = 5;

// --- Packing materials ---

/// Books and other heavy small items per small box.
pub const ITEMS_PER_SMALL_BOX: u64 = 20;

/// Kitchenware and clothes per medium box.
pub const ITEMS_PER_MEDIUM_BOX: u64 = 15;

/// Linens and bedding per large box.
pub const ITEMS_PER_LARGE_BOX: u64 = 10;

/// One roll of tape seals this many boxes.
pub const BOXES_PER_TAPE_ROLL: u64 = 10;

/// Packing paper: `PAPER_PACKS_PER_BLOCK` packs for every `PAPER_CBM_BLOCK` cbm.
pub const PAPER_CBM_BLOCK: Decimal = dec!(10);
pub const PAPER_PACKS_PER_BLOCK: Decimal = dec!(1.5);

/// Wardrobe boxes assumed for a legacy wardrobe record with no door count.
pub const LEGACY_WARDROBE_DOORS: u32 = 2;

// --- Packing labour ---

/// Kitchens are slower: fragile items need wrapping.
pub const KITCHEN_ITEMS_PER_HOUR: u64 = 15;
pub const ROOM_ITEMS_PER_HOUR: u64 = 20;

/// Minimum billed packing time for a room with anything to pack.
pub const MIN_PACKING_HOURS_PER_ROOM: Decimal = dec!(0.5);

// --- Confidence tiers (first match wins) ---

pub const LOW_CONFIDENCE_MAX_ITEMS: u64 = 5;
pub const LOW_CONFIDENCE_MAX_CBM: Decimal = dec!(1);
pub const MEDIUM_CONFIDENCE_MAX_ITEMS: u64 = 20;
pub const MEDIUM_CONFIDENCE_MAX_CBM: Decimal = dec!(5);

// --- Auto-approval ---

pub const AUTO_APPROVE_MAX_CBM: Decimal = dec!(15);
pub const AUTO_APPROVE_MAX_ITEMS: u64 = 50;
pub const AUTO_APPROVE_MAX_HIGH_PRICE: i64 = 3000;

// --- Booking ---

/// Share of the low estimate taken as deposit.
pub const DEPOSIT_RATE: Decimal = dec!(0.20);

/// Number of started blocks needed to cover `value`. An exact multiple does
/// not start a new block.
pub fn started_blocks(value: u32, block: u32) -> u32 {
    value.div_ceil(block)
}

/// Money as reported: 2 dp, half away from zero.
pub fn money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
