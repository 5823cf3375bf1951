//! CSV export of generated records.

use crate::record::Record;
use std::io;

/// Write `records` as CSV with a header row, even when there are no records.
pub fn write_csv<W: io::Write>(records: &[Record], writer: W) -> Result<(), csv::Error> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(Record::FIELD_NAMES)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Render `records` as a CSV string.
pub fn to_csv_string(records: &[Record]) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    String::from_utf8(buf).map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: u64, address: &str) -> Record {
        Record {
            index,
            identifier: format!("id-{index}"),
            name: "Ana Elena García".to_string(),
            address: address.to_string(),
            phone: "+52-555-123-4567".to_string(),
        }
    }

    #[test]
    fn test_header_only_when_empty() {
        assert_eq!(to_csv_string(&[]).unwrap(), "index,identifier,name,address,phone\n");
    }

    #[test]
    fn test_quotes_fields_with_commas() {
        let csv = to_csv_string(&[record(1, "12 Mill Lane, Bath, Somerset, BA1 1AA")]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("index,identifier,name,address,phone"));
        assert_eq!(
            lines.next(),
            Some("1,id-1,Ana Elena García,\"12 Mill Lane, Bath, Somerset, BA1 1AA\",+52-555-123-4567")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_reads_back_with_csv_reader() {
        let records = vec![record(1, "a, b"), record(2, "c \"d\"")];
        let csv = to_csv_string(&records).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][3], "a, b");
        assert_eq!(&rows[1][3], "c \"d\"");
    }
}
