//! Surveyed inventory: rooms and the items in them

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lenient;
use crate::pricing::rules::LEGACY_WARDROBE_DOORS;

/// How an item has to be packed before it can be moved
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum PackingRequirement {
    #[default]
    None,
    SmallBox,
    MediumBox,
    LargeBox,
    /// Robe carton; the item quantity is the number of boxes
    WardrobeBox,
    MattressCover,
}

impl From<String> for PackingRequirement {
    fn from(s: String) -> Self {
        match s.as_str() {
            "small_box" => Self::SmallBox,
            "medium_box" => Self::MediumBox,
            "large_box" => Self::LargeBox,
            "wardrobe_box" | "robe_carton" => Self::WardrobeBox,
            "mattress_cover" => Self::MattressCover,
            _ => Self::None,
        }
    }
}

impl PackingRequirement {
    /// Loose items a packer has to box up by hand.
    pub fn is_loose(&self) -> bool {
        matches!(self, Self::SmallBox | Self::MediumBox | Self::LargeBox)
    }
}

impl std::fmt::Display for PackingRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::SmallBox => write!(f, "small_box"),
            Self::MediumBox => write!(f, "medium_box"),
            Self::LargeBox => write!(f, "large_box"),
            Self::WardrobeBox => write!(f, "wardrobe_box"),
            Self::MattressCover => write!(f, "mattress_cover"),
        }
    }
}

/// Single inventory line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    #[serde(
        default = "lenient::default_quantity",
        deserialize_with = "lenient::quantity",
        alias = "qty"
    )]
    pub quantity: u32,
    #[serde(default, deserialize_with = "lenient::measure")]
    pub length_cm: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::measure")]
    pub width_cm: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::measure")]
    pub height_cm: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::measure")]
    pub weight_kg: Option<Decimal>,
    /// Volume of one unit in cubic metres
    #[serde(default, deserialize_with = "lenient::measure")]
    pub cbm: Option<Decimal>,
    #[serde(default)]
    pub fragile: bool,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub packing_requirement: PackingRequirement,
    #[serde(default)]
    pub notes: Option<String>,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.max(1),
            length_cm: None,
            width_cm: None,
            height_cm: None,
            weight_kg: None,
            cbm: None,
            fragile: false,
            packing_requirement: PackingRequirement::None,
            notes: None,
        }
    }

    /// Unit volume, zero when missing or negative.
    pub fn unit_cbm(&self) -> Decimal {
        non_negative(self.cbm)
    }

    /// Unit weight, zero when missing or negative.
    pub fn unit_weight_kg(&self) -> Decimal {
        non_negative(self.weight_kg)
    }

    /// Bulky is derived from weight, never stored.
    pub fn is_bulky(&self, threshold_kg: Decimal) -> bool {
        self.unit_weight_kg() > threshold_kg
    }
}

fn non_negative(value: Option<Decimal>) -> Decimal {
    value
        .filter(|v| *v > Decimal::ZERO)
        .unwrap_or(Decimal::ZERO)
}

/// Room with its items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Generated when the capture step did not assign one
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(alias = "room_name")]
    pub name: String,
    #[serde(default)]
    pub items: Vec<InventoryItem>,
}

impl Room {
    pub fn new(name: impl Into<String>, items: Vec<InventoryItem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            items,
        }
    }
}

/// Rewrite a wardrobe item recorded under the old convention, where the
/// door count lived in the notes ("3 doors") and quantity meant wardrobes.
///
/// Run once when importing old surveys. Returns true when the item changed.
pub fn migrate_legacy_wardrobe(item: &mut InventoryItem) -> bool {
    if item.packing_requirement != PackingRequirement::WardrobeBox {
        return false;
    }

    let doors = item
        .notes
        .as_deref()
        .and_then(door_count)
        .unwrap_or(LEGACY_WARDROBE_DOORS);

    if item.quantity == doors {
        return false;
    }
    item.quantity = doors.max(1);
    true
}

/// First "<N> door" in free text, case-insensitive.
fn door_count(notes: &str) -> Option<u32> {
    let lower = notes.to_lowercase();
    lower.match_indices("door").find_map(|(idx, _)| {
        let before = lower[..idx].trim_end();
        let digits_start = before
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)?;
        before[digits_start..].parse().ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn unknown_packing_tag_reads_as_none() {
        let item: InventoryItem =
            serde_json::from_str(r#"{"name": "Lamp", "packing_requirement": "bubble_wrap"}"#)
                .unwrap();
        assert_eq!(item.packing_requirement, PackingRequirement::None);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn robe_carton_alias() {
        let item: InventoryItem = serde_json::from_str(
            r#"{"name": "Wardrobe", "qty": 3, "packing_requirement": "robe_carton"}"#,
        )
        .unwrap();
        assert_eq!(item.packing_requirement, PackingRequirement::WardrobeBox);
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn null_packing_tag_reads_as_none() {
        let item: InventoryItem =
            serde_json::from_str(r#"{"name": "Chair", "packing_requirement": null}"#).unwrap();
        assert_eq!(item.packing_requirement, PackingRequirement::None);
    }

    #[test]
    fn negative_weight_counts_as_zero() {
        let mut item = InventoryItem::new("Sofa", 1);
        item.weight_kg = Some(dec!(-80));
        assert_eq!(item.unit_weight_kg(), Decimal::ZERO);
        assert!(!item.is_bulky(dec!(50)));
    }

    #[test]
    fn bulky_is_strictly_over_threshold() {
        let mut item = InventoryItem::new("Piano", 1);
        item.weight_kg = Some(dec!(50));
        assert!(!item.is_bulky(dec!(50)));
        item.weight_kg = Some(dec!(50.01));
        assert!(item.is_bulky(dec!(50)));
    }

    #[test]
    fn room_without_id_gets_one() {
        let room: Room =
            serde_json::from_str(r#"{"name": "Loft", "items": [{"name": "Boxes", "qty": 4}]}"#)
                .unwrap();
        assert_eq!(room.name, "Loft");
        assert_eq!(room.items[0].quantity, 4);
        assert!(!room.id.is_nil());
    }

    #[test]
    fn oversized_measures_are_clamped() {
        let item: InventoryItem = serde_json::from_str(
            r#"{"name": "Crate", "cbm": "79228162514264337593543950", "weight_kg": -12}"#,
        )
        .unwrap();
        assert_eq!(item.cbm, Some(lenient::MAX_ITEM_MEASURE));
        assert_eq!(item.weight_kg, None);
    }

    #[test]
    fn door_count_from_notes() {
        assert_eq!(door_count("Large 3 doors, mirrored"), Some(3));
        assert_eq!(door_count("4door"), Some(4));
        assert_eq!(door_count("Double DOOR"), None);
        assert_eq!(door_count("no info"), None);
    }

    #[test]
    fn legacy_wardrobe_migration() {
        let mut item = InventoryItem::new("Wardrobe", 1);
        item.packing_requirement = PackingRequirement::WardrobeBox;
        item.notes = Some("3 doors".to_string());
        assert!(migrate_legacy_wardrobe(&mut item));
        assert_eq!(item.quantity, 3);

        let mut plain = InventoryItem::new("Wardrobe", 1);
        plain.packing_requirement = PackingRequirement::WardrobeBox;
        assert!(migrate_legacy_wardrobe(&mut plain));
        assert_eq!(plain.quantity, LEGACY_WARDROBE_DOORS);

        let mut books = InventoryItem::new("Books", 40);
        books.packing_requirement = PackingRequirement::SmallBox;
        assert!(!migrate_legacy_wardrobe(&mut books));
        assert_eq!(books.quantity, 40);
    }
}
