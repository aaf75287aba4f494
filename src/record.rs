use std::str::FromStr;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

const FIELD_COUNT: usize = 9;

/// Processing state of a bulk-uploaded file, as returned by `getApiFileInfo`.
///
/// The wire format is nine `|`-separated fields:
/// `file_id|filename|unique|lines|lines_processed|status|timestamp|link1|link2`.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub file_id: String,
    pub filename: String,
    pub unique: String,
    pub lines: u64,
    pub lines_processed: u64,
    pub status: String,
    pub timestamp: String,
    pub link1: String,
    pub link2: String,
}

impl FileRecord {
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let fields: Vec<&str> = raw.split('|').collect();
        if fields.len() != FIELD_COUNT {
            return Err(Error::malformed(
                raw,
                format!("expected {FIELD_COUNT} fields, got {}", fields.len()),
            ));
        }

        Ok(Self {
            file_id: fields[0].to_string(),
            filename: fields[1].to_string(),
            unique: fields[2].to_string(),
            lines: parse_count(raw, "lines", fields[3])?,
            lines_processed: parse_count(raw, "lines_processed", fields[4])?,
            status: fields[5].to_string(),
            timestamp: fields[6].to_string(),
            link1: fields[7].to_string(),
            link2: fields[8].to_string(),
        })
    }

    /// Fraction of lines processed so far, `None` when the file has no lines.
    pub fn progress(&self) -> Option<f64> {
        if self.lines == 0 {
            None
        } else {
            Some(self.lines_processed as f64 / self.lines as f64)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.lines > 0 && self.lines_processed >= self.lines
    }
}

impl FromStr for FileRecord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_count(raw: &str, name: &str, value: &str) -> Result<u64, Error> {
    value
        .parse()
        .map_err(|err| Error::malformed(raw, format!("{name} {value:?} is not a count: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_nine_fields_in_order() {
        let record =
            FileRecord::parse("f1|name.csv|1|100|100|finished|1690000000|http://a|http://b")
                .unwrap();
        assert_eq!(
            record,
            FileRecord {
                file_id: "f1".into(),
                filename: "name.csv".into(),
                unique: "1".into(),
                lines: 100,
                lines_processed: 100,
                status: "finished".into(),
                timestamp: "1690000000".into(),
                link1: "http://a".into(),
                link2: "http://b".into(),
            }
        );
        assert!(record.is_complete());
        assert_eq!(record.progress(), Some(1.0));
    }

    #[test]
    fn too_few_fields_is_malformed() {
        let err = FileRecord::parse("too|few|fields").unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { ref raw, .. } if raw == "too|few|fields"));
        insta::assert_snapshot!(err.to_string(), @r#"malformed file record (expected 9 fields, got 3): "too|few|fields""#);
    }

    #[test]
    fn non_numeric_count_is_malformed() {
        let err = "f1|a.csv|0|many|0|new|0||".parse::<FileRecord>().unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { ref reason, .. } if reason.starts_with("lines \"many\"")));
    }

    #[test]
    fn empty_links_are_kept_as_given() {
        let record = FileRecord::parse("f2|b.csv|0|10|4|progress|1690000001||").unwrap();
        assert_eq!(record.link1, "");
        assert_eq!(record.link2, "");
        assert!(!record.is_complete());
        assert_eq!(record.progress(), Some(0.4));
    }

    #[test]
    fn zero_lines_has_no_progress() {
        let record = FileRecord::parse("f3|c.csv|0|0|0|new|1690000002||").unwrap();
        assert_eq!(record.progress(), None);
        assert!(!record.is_complete());
    }

    proptest! {
        #[test]
        fn any_other_field_count_is_rejected(fields in prop::collection::vec("[a-z0-9]{0,6}", 1..20)) {
            prop_assume!(fields.len() != FIELD_COUNT);
            let raw = fields.join("|");
            let rejected = matches!(FileRecord::parse(&raw), Err(Error::MalformedRecord { .. }));
            prop_assert!(rejected);
        }
    }
}
