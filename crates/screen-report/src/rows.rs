//! Flattening of store records into report rows.

use screen_model::columns::{DATESCREEN, DISTRICT, FILE, ICNUMBER, LESION_ID, LOCATION};
use screen_model::{Category, StoreRecord};

/// Separator between the entries of the `data` column.
pub const DATA_SEPARATOR: &str = "; ";

const RULE: &str = "rule";
const RULE_NUMBER: &str = "rule_number";
const DATA: &str = "data";

/// Header of a category report.
pub fn report_header(category: Category) -> Vec<&'static str> {
    let mut header = vec![FILE, DISTRICT, LOCATION, DATESCREEN, ICNUMBER];
    if category.has_lesion_id() {
        header.push(LESION_ID);
    }
    header.extend([RULE, RULE_NUMBER, DATA]);
    header
}

/// One report row, aligned with [`report_header`]. Missing values are empty.
pub fn report_row(category: Category, record: &StoreRecord) -> Vec<String> {
    let key = &record.key;
    let mut row = vec![
        record.file.clone(),
        key.district.clone().unwrap_or_default(),
        key.location.clone().unwrap_or_default(),
        key.date_screen
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        key.ic_number.clone().unwrap_or_default(),
    ];
    if category.has_lesion_id() {
        row.push(record.lesion_id.clone().unwrap_or_default());
    }
    row.push(record.fail.rule.name().to_string());
    row.push(record.fail.rule.ordinal().to_string());
    row.push(record.fail.data.join(DATA_SEPARATOR));
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use screen_model::{FailureDescriptor, RecordKey, RuleId};

    fn record(lesion_id: Option<&str>) -> StoreRecord {
        StoreRecord {
            file: "KLANG".to_string(),
            key: RecordKey {
                district: Some("KLANG".to_string()),
                location: None,
                date_screen: chrono::NaiveDate::from_ymd_opt(2024, 3, 1),
                ic_number: Some("850101025678".to_string()),
            },
            lesion_id: lesion_id.map(str::to_string),
            fail: FailureDescriptor::new(
                RuleId::IcVsGender,
                vec!["ICNUMBER: 850101025678".into(), "GENDER CODE: 1".into()],
            ),
        }
    }

    #[test]
    fn general_row_has_no_lesion_slot() {
        let header = report_header(Category::General);
        let row = report_row(Category::General, &record(None));
        assert_eq!(header.len(), row.len());
        assert!(!header.contains(&LESION_ID));
        assert_eq!(
            row,
            vec![
                "KLANG",
                "KLANG",
                "",
                "2024-03-01",
                "850101025678",
                "IC_VS_GENDER",
                "3",
                "ICNUMBER: 850101025678; GENDER CODE: 1",
            ]
        );
    }

    #[test]
    fn lesion_row_carries_slot() {
        let header = report_header(Category::Lesion);
        let row = report_row(Category::Lesion, &record(Some("other")));
        assert_eq!(header[5], LESION_ID);
        assert_eq!(row[5], "other");
        assert_eq!(header.len(), row.len());
    }
}
