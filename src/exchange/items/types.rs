//! Response types for the exchange items endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{TimestampSeconds, serde_as};
use time::OffsetDateTime;

use crate::types::serde_helpers::null_as_default;

/// One page of a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemsPage {
    /// Cursor to request the next page with.
    pub cursor: String,
    /// Items on this page, in server order.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub objects: Vec<Object>,
    /// Aggregate counts.
    pub total: Total,
}

impl ItemsPage {
    /// True when the listing has nothing left.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Aggregate counts for a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Total {
    /// Number of offers.
    pub offers: i64,
    /// Number of targets.
    pub targets: i64,
    /// Number of items.
    pub items: i64,
    /// Number of completed offers.
    pub completed_offers: i64,
    /// Number of closed targets.
    pub closed_targets: i64,
}

/// A marketplace item.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Object {
    /// Number of units.
    pub amount: i64,
    /// Steam class identifier (`instance:class`).
    pub class_id: String,
    /// Listing creation time.
    #[serde_as(as = "Option<TimestampSeconds<i64>>")]
    pub created_at: Option<OffsetDateTime>,
    /// Item description.
    pub description: String,
    /// Discount percent.
    pub discount: i64,
    /// Game-specific attributes.
    pub extra: Extra,
    /// Link to extra documentation.
    pub extra_doc: String,
    /// Catalog identifier.
    pub game_id: String,
    /// Game type.
    pub game_type: String,
    /// Image URL.
    pub image: String,
    /// Whether the item is listed on the market.
    pub in_market: bool,
    /// Price for an instant sale.
    pub instant_price: Price,
    /// Target matched by an instant sale.
    pub instant_target_id: String,
    /// Item identifier.
    pub item_id: String,
    /// Whether the item is locked.
    pub lock_status: bool,
    /// Owner identifier.
    pub owner: String,
    /// Owner profile.
    pub owner_details: OwnerDetails,
    /// Owner's blockchain identifier.
    pub owners_blockchain_id: String,
    /// Overpriced flag as reported by the marketplace.
    pub overpriced: i64,
    /// Listing price.
    pub price: Price,
    /// Recommended prices by horizon.
    pub recommended_price: RecommendedPrice,
    /// URL slug.
    pub slug: String,
    /// Listing status.
    pub status: String,
    /// Suggested price.
    pub suggested_price: Price,
    /// Item title.
    pub title: String,
    /// Item type.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Game-specific item attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Extra {
    pub ability: String,
    pub background_color: String,
    pub category: String,
    pub category_path: String,
    pub class: Vec<String>,
    pub collection: Vec<String>,
    pub exterior: String,
    pub float_value: i64,
    pub game_id: String,
    pub gems: Vec<Gem>,
    pub grade: String,
    pub group_id: String,
    pub growth: i64,
    pub hero: String,
    pub inspect_in_game: String,
    pub is_new: bool,
    pub item_type: String,
    pub link_id: String,
    pub name: String,
    pub name_color: String,
    pub offer_id: String,
    pub quality: String,
    pub rarity: String,
    pub serial_number: i64,
    pub stickers: Vec<Sticker>,
    pub subscribers: i64,
    pub tag_name: String,
    pub tradable: bool,
    pub trade_lock: i64,
    pub trade_lock_duration: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub videos: i64,
    pub view_at_steam: String,
    pub withdrawable: bool,
}

/// Recommended prices over several horizons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendedPrice {
    /// Three days.
    pub d3: Price,
    /// Seven days.
    pub d7: Price,
    /// More than seven days.
    #[serde(rename = "d7Plus")]
    pub d7_plus: Price,
}

/// Item owner profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerDetails {
    pub avatar: String,
    pub id: String,
    pub wallet: String,
}

/// A price in DMarket coins and US cents, sent as decimal strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    #[serde(rename = "DMC")]
    pub dmc: Decimal,
    #[serde(rename = "USD")]
    pub usd: Decimal,
}

/// A gem socketed into an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gem {
    pub image: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A sticker applied to an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sticker {
    pub image: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserialize() {
        let json = r#"{
            "cursor": "next",
            "objects": [{
                "itemId": "a0b1",
                "title": "AK-47 | Redline",
                "type": "item",
                "overpriced": 1,
                "createdAt": 1700000000,
                "price": {"DMC": "150", "USD": "1234"},
                "recommendedPrice": {"d3": {"DMC": "1", "USD": "2"}, "d7": {}, "d7Plus": {"USD": "3"}},
                "extra": {"gameId": "9a92", "stickers": [{"name": "s"}], "type": "weapon"}
            }],
            "total": {"offers": 1, "items": 1, "completedOffers": 0}
        }"#;

        let page: ItemsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.cursor, "next");
        assert_eq!(page.total.items, 1);

        let object = &page.objects[0];
        assert_eq!(object.item_id, "a0b1");
        assert_eq!(object.kind, "item");
        assert_eq!(object.overpriced, 1);
        assert_eq!(object.price.usd, Decimal::from(1234));
        assert_eq!(object.price.dmc, Decimal::from(150));
        assert_eq!(object.recommended_price.d7_plus.usd, Decimal::from(3));
        assert_eq!(object.extra.game_id, "9a92");
        assert_eq!(object.extra.kind, "weapon");
        assert_eq!(object.extra.stickers[0].name, "s");
        assert_eq!(
            object.created_at.map(OffsetDateTime::unix_timestamp),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn test_empty_envelope_decodes() {
        let page: ItemsPage = serde_json::from_str("{}").unwrap();
        assert!(page.is_empty());
        assert!(page.cursor.is_empty());

        let page: ItemsPage = serde_json::from_str(r#"{"cursor":"c","objects":null}"#).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_malformed_envelope_rejected() {
        assert!(serde_json::from_str::<ItemsPage>("{").is_err());
        assert!(serde_json::from_str::<ItemsPage>(r#"{"objects":{}}"#).is_err());
    }

    #[test]
    fn test_page_serialize_round_trip() {
        let page = ItemsPage {
            cursor: "abc".to_string(),
            objects: vec![Object {
                title: "Knife".to_string(),
                price: Price {
                    dmc: Decimal::from(10),
                    usd: Decimal::from(25),
                },
                ..Default::default()
            }],
            total: Total {
                items: 1,
                ..Default::default()
            },
        };

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["objects"][0]["price"]["USD"], "25");
        let decoded: ItemsPage = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, page);
    }
}
