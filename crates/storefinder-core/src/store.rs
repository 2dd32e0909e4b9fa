//! Store records as returned by the nearby-stores endpoint.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// One store in a nearby-stores response.
///
/// Field names follow the service's camelCase JSON. `distance` is computed
/// server-side from the query coordinates, in kilometres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreResult {
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub street: String,
    pub street2: Option<String>,
    pub street3: Option<String>,
    pub address_name: Option<String>,
    pub uuid: String,
    pub longitude: f64,
    pub latitude: f64,
    pub complex_number: Option<String>,
    #[serde(default)]
    pub show_warning_message: bool,
    pub today_open: Option<String>,
    pub today_close: Option<String>,
    pub location_type: Option<String>,
    #[serde(default)]
    pub collection_point: bool,
    #[serde(rename = "sapStoreID")]
    pub sap_store_id: Option<String>,
    pub distance: f64,
}

impl StoreResult {
    /// Name shown on cards and marker popups: the address name, else the city.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.address_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.city)
    }

    /// `"08:00 - 22:00"` when both opening and closing times are known.
    #[must_use]
    pub fn hours(&self) -> Option<String> {
        match (self.today_open.as_deref(), self.today_close.as_deref()) {
            (Some(open), Some(close)) => Some(format!("{open} - {close}")),
            _ => None,
        }
    }

    /// Whether the store is open at `now` according to today's hours.
    ///
    /// Missing or unparseable hours count as closed. A closing time before
    /// the opening time means the store is open past midnight.
    #[must_use]
    pub fn is_open_at(&self, now: NaiveTime) -> bool {
        let (Some(open), Some(close)) = (
            self.today_open.as_deref().and_then(parse_time),
            self.today_close.as_deref().and_then(parse_time),
        ) else {
            return false;
        };

        if close < open {
            now >= open || now <= close
        } else {
            now >= open && now <= close
        }
    }
}

/// Parses `HH:MM` or `HH:MM:SS`.
fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(open: Option<&str>, close: Option<&str>) -> StoreResult {
        StoreResult {
            city: "Amsterdam".to_string(),
            postal_code: "1012 AB".to_string(),
            street: "Damrak 1".to_string(),
            street2: None,
            street3: None,
            address_name: None,
            uuid: "a".to_string(),
            longitude: 4.8952,
            latitude: 52.3702,
            complex_number: None,
            show_warning_message: false,
            today_open: open.map(str::to_string),
            today_close: close.map(str::to_string),
            location_type: None,
            collection_point: false,
            sap_store_id: None,
            distance: 1.2,
        }
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn deserializes_service_payload() {
        let json = serde_json::json!({
            "city": "Utrecht",
            "postalCode": "3511 AB",
            "street": "Oudegracht",
            "street2": "12",
            "addressName": "Jumbo Oudegracht",
            "uuid": "EOgKYx4XFiQAAAFJa_YYZ4At",
            "longitude": 5.1214,
            "latitude": 52.0907,
            "complexNumber": "33010",
            "showWarningMessage": true,
            "todayOpen": "08:00",
            "todayClose": "22:00",
            "locationType": "SupermarktPuP",
            "collectionPoint": true,
            "sapStoreID": "3605",
            "distance": 0.42
        });
        let store: StoreResult = serde_json::from_value(json).unwrap();
        assert_eq!(store.display_name(), "Jumbo Oudegracht");
        assert_eq!(store.sap_store_id.as_deref(), Some("3605"));
        assert!(store.collection_point);
        assert!(store.show_warning_message);
        assert_eq!(store.hours().as_deref(), Some("08:00 - 22:00"));
    }

    #[test]
    fn display_name_falls_back_to_city() {
        let mut s = store(None, None);
        assert_eq!(s.display_name(), "Amsterdam");
        s.address_name = Some("  ".to_string());
        assert_eq!(s.display_name(), "Amsterdam");
    }

    #[test]
    fn hours_need_both_ends() {
        assert!(store(Some("08:00"), None).hours().is_none());
    }

    #[test]
    fn open_during_regular_hours() {
        let s = store(Some("08:00"), Some("22:00"));
        assert!(s.is_open_at(at(8, 0)));
        assert!(s.is_open_at(at(22, 0)));
        assert!(!s.is_open_at(at(7, 59)));
        assert!(!s.is_open_at(at(23, 0)));
    }

    #[test]
    fn open_past_midnight() {
        let s = store(Some("22:00"), Some("03:00:00"));
        assert!(s.is_open_at(at(23, 0)));
        assert!(s.is_open_at(at(2, 0)));
        assert!(!s.is_open_at(at(10, 0)));
    }

    #[test]
    fn unknown_hours_count_as_closed() {
        assert!(!store(None, None).is_open_at(at(12, 0)));
        assert!(!store(Some("noon"), Some("22:00")).is_open_at(at(12, 0)));
    }
}
