use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::dataset::COLUMNS;
use crate::error::AnalyzeError;

/// Marker the source data uses for an unknown categorical value.
pub const UNKNOWN: &'static str = "?";

#[derive(Debug, serde::Deserialize, Clone, PartialEq)]
pub struct Record {
    pub age: u32,
    pub sex: String,
    pub education: String,
    pub race: String,
    pub salary: String,
    #[serde(rename = "hours-per-week")]
    pub hours_per_week: u32,
    #[serde(rename = "native-country")]
    pub native_country: String,
    pub occupation: String,
}

impl Record {
    pub fn has_known_country(&self) -> bool {
        !is_unknown(&self.native_country)
    }

    pub fn has_known_occupation(&self) -> bool {
        !is_unknown(&self.occupation)
    }
}

pub fn is_unknown(value: &str) -> bool {
    value.is_empty() || value == UNKNOWN
}

pub fn read_data(path: &Path) -> Result<Vec<Record>, AnalyzeError> {
    let file = File::open(path)?;
    // The reference data pads values with a space after each comma.
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = rdr.headers()?.clone();
    for column in COLUMNS.iter().copied() {
        if !headers.iter().any(|h| h == column) {
            return Err(AnalyzeError::MissingField { row: 0, field: column });
        }
    }

    let mut records = Vec::<Record>::new();
    for result in rdr.deserialize() {
        // Notice that we need to provide a type hint for automatic
        // deserialization.
        let record: Record = result?;
        validate(&record, records.len() + 1)?;
        records.push(record);
    }
    debug!(rows = records.len(), "parsed census rows");
    Ok(records)
}

fn validate(record: &Record, row: usize) -> Result<(), AnalyzeError> {
    // native-country and occupation are allowed to be unknown.
    let required: [(&'static str, &str); 4] = [
        ("sex", &record.sex),
        ("education", &record.education),
        ("race", &record.race),
        ("salary", &record.salary),
    ];
    for (field, value) in required {
        if value.is_empty() {
            return Err(AnalyzeError::MissingField { row, field });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "age,sex,education,race,salary,hours-per-week,native-country,occupation";

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    #[test]
    fn reads_records_from_csv() {
        let file = write_csv(&[
            "39,Male,Bachelors,White,>50K,40,United-States,Adm-clerical",
            "28, Female, Masters, Black, <=50K, 38, Cuba, Exec-managerial",
        ]);
        let records = read_data(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].age, 39);
        assert_eq!(records[0].hours_per_week, 40);
        assert_eq!(records[0].salary, ">50K");
        // padded values are trimmed
        assert_eq!(records[1].sex, "Female");
        assert_eq!(records[1].native_country, "Cuba");
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let err = read_data(Path::new("/no/such/file.csv")).unwrap_err();
        assert!(matches!(err, AnalyzeError::SourceUnavailable(_)));
    }

    #[test]
    fn empty_required_value_is_missing_field() {
        let file = write_csv(&[
            "39,Male,Bachelors,White,>50K,40,United-States,Adm-clerical",
            "28,,Masters,Black,<=50K,38,Cuba,Exec-managerial",
        ]);
        let err = read_data(file.path()).unwrap_err();
        assert!(matches!(
            err,
            AnalyzeError::MissingField { row: 2, field: "sex" }
        ));
    }

    #[test]
    fn missing_header_column_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "age,sex,education,race,salary,hours-per-week,native-country").unwrap();
        writeln!(file, "39,Male,Bachelors,White,>50K,40,United-States").unwrap();
        let err = read_data(file.path()).unwrap_err();
        assert!(matches!(
            err,
            AnalyzeError::MissingField { row: 0, field: "occupation" }
        ));
    }

    #[test]
    fn unknown_markers_are_accepted() {
        let file = write_csv(&["50,Male,HS-grad,White,<=50K,45,?,?"]);
        let records = read_data(file.path()).unwrap();
        assert!(!records[0].has_known_country());
        assert!(!records[0].has_known_occupation());
    }
}
