//! CSV Data Loader Module
//! Reads the region tables, the review table and the recommendation table using Polars.

use crate::config::DashboardConfig;
use crate::data::model::{DataContext, MonthRow, RecommendationTable, Region, RegionSeries, Review};
use polars::prelude::*;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns every region table must provide.
pub const REGION_COLUMNS: [&str; 6] = [
    "Month",
    "positive_rate",
    "negative_rate",
    "positive",
    "negative",
    "neutral",
];

/// Largest count accepted. Floats above 2^53 no longer hold every whole number.
pub const MAX_COUNT: f64 = 9_007_199_254_740_992.0;

/// Columns the review table must provide.
pub const REVIEW_COLUMNS: [&str; 3] = ["Branch", "Month", "Review_Text"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {0}")]
    MissingFile(PathBuf),
    #[error("Failed to load CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("{path}: missing column '{column}'")]
    MissingColumn { path: PathBuf, column: String },
    #[error("{path}: invalid value in column '{column}' at row {row}")]
    InvalidValue {
        path: PathBuf,
        column: String,
        row: usize,
    },
    #[error("{path}: month '{month}' appears more than once")]
    DuplicateMonth { path: PathBuf, month: String },
    #[error("{0}: no columns")]
    NoData(PathBuf),
}

/// Loads dashboard tables from CSV files.
pub struct DataLoader;

impl DataLoader {
    /// Load every table named by the configuration.
    pub fn load(config: &DashboardConfig) -> Result<DataContext, LoaderError> {
        // Region tables are independent files
        let series = Region::ALL
            .par_iter()
            .map(|&region| Self::load_region_series(region, &config.region_path(region)))
            .collect::<Result<Vec<_>, _>>()?;

        let reviews = Self::load_reviews(&config.reviews_path())?;
        let recommendations = Self::load_recommendations(&config.recommendations_path())?;

        Ok(DataContext::new(series, reviews, recommendations))
    }

    /// Read a CSV file into a DataFrame.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::MissingFile(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|source| LoaderError::Csv {
                path: path.to_path_buf(),
                source,
            })?;

        log::info!(
            "Loaded {} ({} rows, {} columns)",
            path.display(),
            df.height(),
            df.width()
        );
        Ok(df)
    }

    /// Load one region's monthly sentiment table.
    pub fn load_region_series(region: Region, path: &Path) -> Result<RegionSeries, LoaderError> {
        let df = Self::load_csv(path)?;
        Self::region_series_from_frame(region, &df, path)
    }

    /// Convert a loaded frame into a region series, keeping row order.
    pub fn region_series_from_frame(
        region: Region,
        df: &DataFrame,
        path: &Path,
    ) -> Result<RegionSeries, LoaderError> {
        for column in REGION_COLUMNS {
            Self::require_column(df, path, column)?;
        }

        let months = Self::text_column(df, path, "Month")?;
        let positive_rate = Self::float_column(df, path, "positive_rate")?;
        let negative_rate = Self::float_column(df, path, "negative_rate")?;
        let positive = Self::count_column(df, path, "positive")?;
        let negative = Self::count_column(df, path, "negative")?;
        let neutral = Self::count_column(df, path, "neutral")?;

        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(df.height());

        for (i, month) in months.into_iter().enumerate() {
            let month = month.ok_or_else(|| LoaderError::InvalidValue {
                path: path.to_path_buf(),
                column: "Month".to_string(),
                row: i,
            })?;
            if !seen.insert(month.clone()) {
                return Err(LoaderError::DuplicateMonth {
                    path: path.to_path_buf(),
                    month,
                });
            }

            rows.push(MonthRow {
                month,
                positive_rate: positive_rate[i],
                negative_rate: negative_rate[i],
                positive: positive[i],
                negative: negative[i],
                neutral: neutral[i],
            });
        }

        log::debug!("{}: {} months", region, rows.len());
        Ok(RegionSeries::new(region, rows))
    }

    /// Load the flat review table.
    pub fn load_reviews(path: &Path) -> Result<Vec<Review>, LoaderError> {
        let df = Self::load_csv(path)?;
        Self::reviews_from_frame(&df, path)
    }

    pub fn reviews_from_frame(df: &DataFrame, path: &Path) -> Result<Vec<Review>, LoaderError> {
        for column in REVIEW_COLUMNS {
            Self::require_column(df, path, column)?;
        }

        let branches = Self::text_column(df, path, "Branch")?;
        let months = Self::text_column(df, path, "Month")?;
        let texts = Self::raw_text_column(df, path, "Review_Text")?;

        let reviews = branches
            .into_iter()
            .zip(months)
            .zip(texts)
            .filter_map(|((branch, month), text)| {
                // Rows without a branch or month can never match a selection
                Some(Review {
                    branch: branch?,
                    month: month?,
                    text: text.unwrap_or_default(),
                })
            })
            .collect();

        Ok(reviews)
    }

    /// Load the precomputed recommendation table as text cells.
    pub fn load_recommendations(path: &Path) -> Result<RecommendationTable, LoaderError> {
        let df = Self::load_csv(path)?;
        Self::recommendations_from_frame(&df, path)
    }

    pub fn recommendations_from_frame(
        df: &DataFrame,
        path: &Path,
    ) -> Result<RecommendationTable, LoaderError> {
        if df.width() == 0 {
            return Err(LoaderError::NoData(path.to_path_buf()));
        }

        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut cells_by_column = Vec::with_capacity(columns.len());
        for name in &columns {
            cells_by_column.push(Self::raw_text_column(df, path, name)?);
        }

        let rows = (0..df.height())
            .map(|i| {
                cells_by_column
                    .iter()
                    .map(|cells| cells[i].clone().unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(RecommendationTable { columns, rows })
    }

    fn require_column<'a>(
        df: &'a DataFrame,
        path: &Path,
        name: &str,
    ) -> Result<&'a Column, LoaderError> {
        df.column(name).map_err(|_| LoaderError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
    }

    fn cast(column: &Column, dtype: &DataType, path: &Path) -> Result<Column, LoaderError> {
        column.cast(dtype).map_err(|source| LoaderError::Csv {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Cells as text whatever the inferred type, without trimming.
    fn raw_text_column(
        df: &DataFrame,
        path: &Path,
        name: &str,
    ) -> Result<Vec<Option<String>>, LoaderError> {
        let column = Self::require_column(df, path, name)?;
        let text = Self::cast(column, &DataType::String, path)?;
        let ca = text.str().map_err(|source| LoaderError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
    }

    /// Key columns (month, branch) are trimmed so labels compare across files.
    fn text_column(
        df: &DataFrame,
        path: &Path,
        name: &str,
    ) -> Result<Vec<Option<String>>, LoaderError> {
        Ok(Self::raw_text_column(df, path, name)?
            .into_iter()
            .map(|v| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
            .collect())
    }

    fn float_column(df: &DataFrame, path: &Path, name: &str) -> Result<Vec<f64>, LoaderError> {
        let column = Self::require_column(df, path, name)?;
        let value_f64 = Self::cast(column, &DataType::Float64, path)?;
        let value_ca = value_f64.f64().map_err(|source| LoaderError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        value_ca
            .into_iter()
            .enumerate()
            .map(|(row, v)| match v {
                Some(v) if v.is_finite() => Ok(v),
                _ => Err(LoaderError::InvalidValue {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                    row,
                }),
            })
            .collect()
    }

    /// Counts may be stored as floats (e.g. `12.0`) but must be whole, non-negative and below `MAX_COUNT`.
    fn count_column(df: &DataFrame, path: &Path, name: &str) -> Result<Vec<u64>, LoaderError> {
        Self::float_column(df, path, name)?
            .into_iter()
            .enumerate()
            .map(|(row, v)| {
                if (0.0..MAX_COUNT).contains(&v) && v.fract() == 0.0 {
                    Ok(v as u64)
                } else {
                    Err(LoaderError::InvalidValue {
                        path: path.to_path_buf(),
                        column: name.to_string(),
                        row,
                    })
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HONGKONG_CSV: &str = "\
Month,positive_rate,negative_rate,positive,negative,neutral
January,71.5,10.2,143,21,36
February,68.0,12.0,102,18,30
March,75.0,5.0,150,10,40
";

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn region_table_keeps_source_order_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "hk.csv", HONGKONG_CSV);

        let series = DataLoader::load_region_series(Region::HongKong, &path).unwrap();
        assert_eq!(series.months(), vec!["January", "February", "March"]);

        let january = series.find_month("January").unwrap();
        assert_eq!(january.positive_rate, 71.5);
        assert_eq!(january.negative_rate, 10.2);
        assert_eq!((january.positive, january.negative, january.neutral), (143, 21, 36));
    }

    #[test]
    fn numeric_month_labels_are_read_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "paris.csv",
            "Month,positive_rate,negative_rate,positive,negative,neutral\n\
             1,50.0,25.0,2,1,1\n\
             2,40.0,20.0,4.0,2,4\n",
        );

        let series = DataLoader::load_region_series(Region::Paris, &path).unwrap();
        assert_eq!(series.months(), vec!["1", "2"]);
        assert_eq!(series.rows[1].positive, 4);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            DataLoader::load_region_series(Region::Paris, &dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::MissingFile(_)));
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "ca.csv",
            "Month,positive_rate,negative_rate,positive,negative\nJune,1.0,2.0,1,2\n",
        );

        match DataLoader::load_region_series(Region::California, &path) {
            Err(LoaderError::MissingColumn { column, .. }) => assert_eq!(column, "neutral"),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_month_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "ca.csv",
            "Month,positive_rate,negative_rate,positive,negative,neutral\n\
             June,1.0,2.0,1,2,3\n\
             June,1.0,2.0,1,2,3\n",
        );

        let err = DataLoader::load_region_series(Region::California, &path).unwrap_err();
        assert!(matches!(err, LoaderError::DuplicateMonth { month, .. } if month == "June"));
    }

    fn invalid_column(row: &str) -> Option<(String, usize)> {
        let dir = tempfile::tempdir().unwrap();
        let contents = format!(
            "Month,positive_rate,negative_rate,positive,negative,neutral\n\
             May,1.0,2.0,1,2,3\n\
             {}\n",
            row
        );
        let path = write(dir.path(), "ca.csv", &contents);

        match DataLoader::load_region_series(Region::California, &path) {
            Err(LoaderError::InvalidValue { column, row, .. }) => Some((column, row)),
            _ => None,
        }
    }

    #[test]
    fn counts_beyond_exact_float_range_are_rejected() {
        assert_eq!(
            invalid_column("June,1.0,2.0,1e20,5,3"),
            Some(("positive".to_string(), 1))
        );
    }

    #[test]
    fn counts_must_be_whole_and_non_negative() {
        assert_eq!(
            invalid_column("June,1.0,2.0,2.5,5,3"),
            Some(("positive".to_string(), 1))
        );
        assert_eq!(
            invalid_column("June,1.0,2.0,4,-1,3"),
            Some(("negative".to_string(), 1))
        );
        assert_eq!(
            invalid_column("June,1.0,2.0,4,5,many"),
            Some(("neutral".to_string(), 1))
        );
    }

    #[test]
    fn rates_must_be_present_and_finite() {
        assert_eq!(
            invalid_column("June,NaN,2.0,4,5,3"),
            Some(("positive_rate".to_string(), 1))
        );
        assert_eq!(
            invalid_column("June,1.0,,4,5,3"),
            Some(("negative_rate".to_string(), 1))
        );
    }

    #[test]
    fn blank_month_is_rejected() {
        assert_eq!(
            invalid_column(",1.0,2.0,4,5,3"),
            Some(("Month".to_string(), 1))
        );
    }

    #[test]
    fn empty_review_text_loads_as_empty_string() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "reviews.csv",
            "Branch,Month,Review_Text\n\
             Disneyland_Paris,May,\n\
             Disneyland_Paris,June,Fireworks\n",
        );

        let reviews = DataLoader::load_reviews(&path).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].text, "");
        assert_eq!(reviews[1].text, "Fireworks");
    }

    #[test]
    fn recommendations_without_columns_are_rejected() {
        let path = Path::new("rec.csv");
        let err = DataLoader::recommendations_from_frame(&DataFrame::empty(), path).unwrap_err();
        assert!(matches!(err, LoaderError::NoData(p) if p == path));
    }

    #[test]
    fn reviews_keep_text_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "reviews.csv",
            "Review_ID,Branch,Month,Review_Text\n\
             1,Disneyland_Paris,May,\"Long queues, great parade\"\n\
             2,Disneyland_HongKong,January,Small but lovely\n",
        );

        let reviews = DataLoader::load_reviews(&path).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].branch, "Disneyland_Paris");
        assert_eq!(reviews[0].text, "Long queues, great parade");
        assert_eq!(reviews[1].month, "January");
    }

    #[test]
    fn recommendations_are_loaded_as_text_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "rec.csv",
            "Review_Text,score\nMagical day,4.9\nWorth it,4.5\n",
        );

        let table = DataLoader::load_recommendations(&path).unwrap();
        assert_eq!(table.columns, vec!["Review_Text", "score"]);
        assert_eq!(table.rows[0], vec!["Magical day", "4.9"]);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn load_builds_full_context() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            data_dir: dir.path().to_path_buf(),
            ..DashboardConfig::default()
        };
        for region in Region::ALL {
            fs::write(config.region_path(region), HONGKONG_CSV).unwrap();
        }
        fs::write(
            config.reviews_path(),
            "Branch,Month,Review_Text\nDisneyland_HongKong,January,Fun\n",
        )
        .unwrap();
        fs::write(config.recommendations_path(), "Review_Text,score\nGreat,5\n").unwrap();

        let data = DataLoader::load(&config).unwrap();
        assert_eq!(data.series(Region::Paris).rows.len(), 3);
        assert_eq!(data.series(Region::HongKong).region, Region::HongKong);
        assert_eq!(data.reviews().len(), 1);
        assert_eq!(data.recommendations().rows.len(), 1);
    }
}
