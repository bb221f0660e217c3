use bson::Document;
use serde::{Deserialize, Serialize};

pub const SHEET_DISTRICTS: &str = "districts";
pub const SHEET_UPAZILAS: &str = "upazilas";

/// Each reference collection holds a single document embedding the whole
/// dataset as an array. Item lookups filter `data` in memory by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceSheet {
    pub name: String,
    pub data: Vec<Document>,
}

impl ReferenceSheet {
    pub fn find_item(&self, id: &str) -> Option<&Document> {
        self.data
            .iter()
            .find(|item| item.get_str("id").map(|v| v == id).unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn sheet() -> ReferenceSheet {
        ReferenceSheet {
            name: SHEET_DISTRICTS.to_string(),
            data: vec![
                doc! { "id": "7", "name": "Chattogram", "bn_name": "চট্টগ্রাম" },
                doc! { "id": "12", "name": "Dhaka" },
            ],
        }
    }

    #[test]
    fn test_find_item_by_id() {
        let sheet = sheet();
        let item = sheet.find_item("7").expect("item should exist");
        assert_eq!(item.get_str("name").unwrap(), "Chattogram");
    }

    #[test]
    fn test_find_item_missing() {
        assert!(sheet().find_item("999").is_none());
    }
}
