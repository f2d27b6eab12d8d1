use std::collections::HashMap;

use crate::csv_reader::Record;

pub const COLUMNS: &'static [&'static str] = &[
    "age",
    "sex",
    "education",
    "race",
    "salary",
    "hours-per-week",
    "native-country",
    "occupation",
];

/// An ordered, immutable sequence of census records.
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Counts distinct values, keeping first-encounter order.
    pub fn count_values<'a, I>(values: I) -> Vec<(String, u64)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = HashMap::<String, usize>::new();
        let mut counts = Vec::<(String, u64)>::new();
        for value in values {
            match index.get(value) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(value.to_string(), counts.len());
                    counts.push((value.to_string(), 1));
                }
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_values_keeps_first_encounter_order() {
        let values = ["White", "Black", "White", "Asian-Pac-Islander", "Black", "White"];
        let counts = Dataset::count_values(values);
        assert_eq!(
            counts,
            vec![
                ("White".to_string(), 3),
                ("Black".to_string(), 2),
                ("Asian-Pac-Islander".to_string(), 1),
            ]
        );
    }

    #[test]
    fn count_values_on_empty_input() {
        let counts = Dataset::count_values(std::iter::empty::<&str>());
        assert!(counts.is_empty());
    }
}
