use std::collections::HashMap;
use std::io::{self, Write};

use serde::Serialize;
use tracing::debug;

use crate::csv_reader::Record;
use crate::dataset::Dataset;
use crate::error::AnalyzeError;

const MALE: &'static str = "Male";
const RICH: &'static str = ">50K";
const BACHELORS: &'static str = "Bachelors";
const HIGHER_EDUCATION: &'static [&'static str] = &["Bachelors", "Masters", "Doctorate"];
const INDIA: &'static str = "India";

/// Summary statistics over one census dataset. Produced whole or not
/// at all; a failed subgroup never leaves NaN behind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub race_count: Vec<(String, u64)>,
    pub average_age_men: f64,
    pub percentage_bachelors: f64,
    pub higher_education_rich: f64,
    pub lower_education_rich: f64,
    pub min_work_hours: u32,
    pub rich_percentage: f64,
    pub highest_earning_country: String,
    pub highest_earning_country_percentage: f64,
    #[serde(rename = "top_IN_occupation")]
    pub top_in_occupation: String,
}

impl Report {
    /// Writes the labeled result lines in their fixed order.
    pub fn render<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        writeln!(sink, "Number of each race:")?;
        for (race, count) in &self.race_count {
            writeln!(sink, "{race}: {count}")?;
        }
        writeln!(sink, "Average age of men: {}", self.average_age_men)?;
        writeln!(
            sink,
            "Percentage with Bachelors degrees: {}%",
            self.percentage_bachelors
        )?;
        writeln!(
            sink,
            "Percentage with higher education that earn >50K: {}%",
            self.higher_education_rich
        )?;
        writeln!(
            sink,
            "Percentage without higher education that earn >50K: {}%",
            self.lower_education_rich
        )?;
        writeln!(sink, "Min work time: {} hours/week", self.min_work_hours)?;
        writeln!(
            sink,
            "Percentage of rich among those who work fewest hours: {}%",
            self.rich_percentage
        )?;
        writeln!(
            sink,
            "Country with highest percentage of rich: {}",
            self.highest_earning_country
        )?;
        writeln!(
            sink,
            "Highest percentage of rich people in country: {}%",
            self.highest_earning_country_percentage
        )?;
        writeln!(sink, "Top occupations in India: {}", self.top_in_occupation)?;
        Ok(())
    }
}

/// Computes every statistic over the dataset. With `verbose` the
/// report is also written to stdout before returning.
pub fn compute(dataset: &Dataset, verbose: bool) -> Result<Report, AnalyzeError> {
    let report = summarize(dataset)?;
    if verbose {
        let stdout = io::stdout();
        report.render(&mut stdout.lock())?;
    }
    Ok(report)
}

fn summarize(dataset: &Dataset) -> Result<Report, AnalyzeError> {
    if dataset.is_empty() {
        return Err(AnalyzeError::EmptyPopulation("dataset"));
    }
    let records = dataset.records();
    let total = records.len() as f64;

    // Descending by count; the sort is stable, so tied races keep
    // their first-encounter order.
    let mut race_count = Dataset::count_values(records.iter().map(|r| r.race.as_str()));
    race_count.sort_by(|a, b| b.1.cmp(&a.1));

    let men_ages: Vec<u32> = records
        .iter()
        .filter(|r| r.sex == MALE)
        .map(|r| r.age)
        .collect();
    if men_ages.is_empty() {
        return Err(AnalyzeError::EmptyPopulation("men"));
    }
    let average_age_men = round1(
        men_ages.iter().map(|&age| f64::from(age)).sum::<f64>() / men_ages.len() as f64,
    );

    let bachelors = records.iter().filter(|r| r.education == BACHELORS).count();
    let percentage_bachelors = round1(bachelors as f64 * 100.0 / total);

    let (higher, lower): (Vec<&Record>, Vec<&Record>) = records
        .iter()
        .partition(|r| HIGHER_EDUCATION.contains(&r.education.as_str()));
    let higher_education_rich = round1(rich_share(&higher, "higher education")?);
    let lower_education_rich = round1(rich_share(&lower, "lower education")?);

    let min_work_hours = records
        .iter()
        .map(|r| r.hours_per_week)
        .min()
        .ok_or(AnalyzeError::EmptyPopulation("dataset"))?;

    let min_hour_workers: Vec<&Record> = records
        .iter()
        .filter(|r| r.hours_per_week == min_work_hours)
        .collect();
    // Deliberately left unrounded, matching the reference output.
    let rich_percentage = rich_share(&min_hour_workers, "minimum-hour workers")?;

    let (highest_earning_country, highest_earning_country_percentage) =
        highest_earning_country(records)?;

    let top_in_occupation = top_occupation_in_india(records)?;

    debug!(
        races = race_count.len(),
        min_work_hours, "computed demographic report"
    );

    Ok(Report {
        race_count,
        average_age_men,
        percentage_bachelors,
        higher_education_rich,
        lower_education_rich,
        min_work_hours,
        rich_percentage,
        highest_earning_country,
        highest_earning_country_percentage,
        top_in_occupation,
    })
}

/// Percentage of `>50K` earners in the group, unrounded.
fn rich_share(group: &[&Record], label: &'static str) -> Result<f64, AnalyzeError> {
    if group.is_empty() {
        return Err(AnalyzeError::EmptyPopulation(label));
    }
    let rich = group.iter().filter(|r| r.salary == RICH).count();
    Ok(rich as f64 * 100.0 / group.len() as f64)
}

/// Country with the highest share of `>50K` earners. Unknown country
/// markers never form a group; ties go to the country seen first.
fn highest_earning_country(records: &[Record]) -> Result<(String, f64), AnalyzeError> {
    let totals = Dataset::count_values(
        records
            .iter()
            .filter(|r| r.has_known_country())
            .map(|r| r.native_country.as_str()),
    );
    if totals.is_empty() {
        return Err(AnalyzeError::EmptyPopulation("countries"));
    }
    let rich_counts = Dataset::count_values(
        records
            .iter()
            .filter(|r| r.salary == RICH && r.has_known_country())
            .map(|r| r.native_country.as_str()),
    );
    let rich_by_country: HashMap<&str, u64> = rich_counts
        .iter()
        .map(|(country, count)| (country.as_str(), *count))
        .collect();

    let mut best: Option<(&str, f64)> = None;
    for (country, count) in &totals {
        let rich = rich_by_country.get(country.as_str()).copied().unwrap_or(0);
        let rate = rich as f64 * 100.0 / *count as f64;
        match best {
            Some((_, best_rate)) if rate <= best_rate => {}
            _ => best = Some((country, rate)),
        }
    }
    // totals is non-empty, so best is set.
    let (country, rate) = best.ok_or(AnalyzeError::EmptyPopulation("countries"))?;
    Ok((country.to_string(), round1(rate)))
}

/// Most common occupation among `>50K` earners in India, ties to the
/// occupation seen first.
fn top_occupation_in_india(records: &[Record]) -> Result<String, AnalyzeError> {
    let occupations = Dataset::count_values(
        records
            .iter()
            .filter(|r| r.native_country == INDIA && r.salary == RICH && r.has_known_occupation())
            .map(|r| r.occupation.as_str()),
    );
    let mut top: Option<(&str, u64)> = None;
    for (occupation, count) in &occupations {
        match top {
            Some((_, best)) if *count <= best => {}
            _ => top = Some((occupation, *count)),
        }
    }
    top.map(|(occupation, _)| occupation.to_string())
        .ok_or(AnalyzeError::EmptyPopulation("rich workers in India"))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
