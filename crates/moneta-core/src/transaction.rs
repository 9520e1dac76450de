use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::dates::format_iso_date;

/// One account-activity event in canonical form.
///
/// This is also the persisted record: the store is a JSON array of these,
/// with the camelCase field names the store format has always used. Dates
/// serialize as `YYYY-MM-DD` strings or null; `tags` maps a tag name to an
/// optional split amount (`None` = the tag covers the untagged remainder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "transDate")]
    pub trans_date: Option<NaiveDate>,
    #[serde(rename = "postDate")]
    pub post_date: Option<NaiveDate>,
    pub description: String,
    pub amount: f64,
    #[serde(default, deserialize_with = "tags_from_map_or_list")]
    pub tags: BTreeMap<String, Option<f64>>,
}

impl Transaction {
    /// The single date used for filtering and display: the date the charge
    /// was made when known, else the date it cleared.
    pub fn effective_date(&self) -> Option<NaiveDate> {
        self.trans_date.or(self.post_date)
    }

    pub fn trans_date_display(&self) -> Option<String> {
        self.trans_date.as_ref().map(format_iso_date)
    }

    pub fn post_date_display(&self) -> Option<String> {
        self.post_date.as_ref().map(format_iso_date)
    }

    pub fn effective_date_display(&self) -> Option<String> {
        self.effective_date().as_ref().map(format_iso_date)
    }
}

/// Accepts `tags` either as the current mapping form or as the legacy list
/// of bare tag names, which decodes as names with no split amount.
fn tags_from_map_or_list<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TagsRepr {
        Map(BTreeMap<String, Option<f64>>),
        LegacyList(Vec<String>),
    }

    Ok(match TagsRepr::deserialize(deserializer)? {
        TagsRepr::Map(map) => map,
        TagsRepr::LegacyList(names) => names.into_iter().map(|name| (name, None)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use serde_json::json;

    use super::Transaction;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        let value = NaiveDate::from_ymd_opt(year, month, day);
        assert!(value.is_some());
        value.unwrap_or_default()
    }

    #[test]
    fn effective_date_prefers_trans_date() {
        let transaction = Transaction {
            kind: "debit".to_string(),
            trans_date: Some(date(2018, 9, 11)),
            post_date: Some(date(2018, 9, 12)),
            description: "FAIRYLAND SOUVENIR SHOP".to_string(),
            amount: -12.34,
            tags: BTreeMap::new(),
        };
        assert_eq!(transaction.effective_date(), Some(date(2018, 9, 11)));
        assert_eq!(
            transaction.effective_date_display(),
            Some("2018-09-11".to_string())
        );
    }

    #[test]
    fn effective_date_falls_back_to_post_date_then_none() {
        let mut transaction = Transaction {
            kind: "debit".to_string(),
            trans_date: None,
            post_date: Some(date(2018, 9, 12)),
            description: String::new(),
            amount: -1.0,
            tags: BTreeMap::new(),
        };
        assert_eq!(transaction.effective_date(), Some(date(2018, 9, 12)));

        transaction.post_date = None;
        assert_eq!(transaction.effective_date(), None);
        assert_eq!(transaction.effective_date_display(), None);
        assert_eq!(transaction.trans_date_display(), None);
        assert_eq!(transaction.post_date_display(), None);
    }

    #[test]
    fn encodes_with_persisted_field_names() {
        let transaction = Transaction {
            kind: "debit".to_string(),
            trans_date: None,
            post_date: Some(date(2018, 9, 7)),
            description: "Fairyland Souvenir Shop".to_string(),
            amount: 12.34,
            tags: BTreeMap::new(),
        };

        let encoded = serde_json::to_value(&transaction);
        assert!(encoded.is_ok());
        if let Ok(value) = encoded {
            assert_eq!(
                value,
                json!({
                    "type": "debit",
                    "transDate": null,
                    "postDate": "2018-09-07",
                    "description": "Fairyland Souvenir Shop",
                    "amount": 12.34,
                    "tags": {},
                })
            );
        }
    }

    #[test]
    fn decodes_tags_as_map() {
        let decoded = serde_json::from_value::<Transaction>(json!({
            "type": "debit",
            "transDate": null,
            "postDate": "2018-09-07",
            "description": "TRADER JOE'S",
            "amount": -45.67,
            "tags": { "grocery": null, "cash": 20.0 },
        }));

        assert!(decoded.is_ok());
        if let Ok(transaction) = decoded {
            assert_eq!(transaction.post_date, Some(date(2018, 9, 7)));
            assert_eq!(transaction.tags.get("grocery"), Some(&None));
            assert_eq!(transaction.tags.get("cash"), Some(&Some(20.0)));
        }
    }

    #[test]
    fn decodes_legacy_list_tags_as_unsplit_entries() {
        let decoded = serde_json::from_value::<Transaction>(json!({
            "type": "debit",
            "transDate": null,
            "postDate": "2018-09-07",
            "description": "TRADER JOE'S",
            "amount": -45.67,
            "tags": ["grocery", "cash"],
        }));

        assert!(decoded.is_ok());
        if let Ok(transaction) = decoded {
            let mut expected = BTreeMap::new();
            expected.insert("grocery".to_string(), None);
            expected.insert("cash".to_string(), None);
            assert_eq!(transaction.tags, expected);
        }
    }

    #[test]
    fn decodes_missing_tags_as_empty() {
        let decoded = serde_json::from_value::<Transaction>(json!({
            "type": "debit",
            "transDate": "2018-09-06",
            "postDate": null,
            "description": "WALGREENS",
            "amount": -8.00,
        }));

        assert!(decoded.is_ok());
        if let Ok(transaction) = decoded {
            assert!(transaction.tags.is_empty());
            assert_eq!(transaction.trans_date, Some(date(2018, 9, 6)));
        }
    }

    #[test]
    fn round_trips_through_the_persisted_form() {
        let mut tags = BTreeMap::new();
        tags.insert("grocery".to_string(), None);
        tags.insert("cash".to_string(), Some(20.0));
        let original = Transaction {
            kind: "debit".to_string(),
            trans_date: Some(date(2018, 9, 11)),
            post_date: Some(date(2018, 9, 12)),
            description: "TRADER JOE'S #123".to_string(),
            amount: -45.67,
            tags,
        };

        let encoded = serde_json::to_string(&original);
        assert!(encoded.is_ok());
        if let Ok(text) = encoded {
            let decoded = serde_json::from_str::<Transaction>(&text);
            assert!(decoded.is_ok());
            if let Ok(value) = decoded {
                assert_eq!(value, original);
            }
        }
    }
}
