use std::io::Cursor;

use polars::io::parquet::write::{ParquetCompression, ParquetWriter};
use polars::prelude::*;

use crate::error::Result;
use crate::report::{CatalogReport, ReportSection, SectionData};

/// One section as a polars frame, column layout matching its shape.
pub fn section_dataframe(section: &ReportSection) -> Result<DataFrame> {
    let df = match &section.data {
        SectionData::Counts(rows) => {
            let labels: Vec<&str> = rows.iter().map(|row| row.label.as_str()).collect();
            let counts: Vec<u64> = rows.iter().map(|row| row.count).collect();
            DataFrame::new(vec![
                Series::new("label".into(), labels).into(),
                Series::new("count".into(), counts).into(),
            ])?
        }
        SectionData::Values(rows) => {
            let labels: Vec<&str> = rows.iter().map(|row| row.label.as_str()).collect();
            let values: Vec<u32> = rows.iter().map(|row| row.value).collect();
            DataFrame::new(vec![
                Series::new("label".into(), labels).into(),
                Series::new("value".into(), values).into(),
            ])?
        }
        SectionData::Histogram(bins) => {
            let lower: Vec<f64> = bins.iter().map(|bin| bin.lower).collect();
            let upper: Vec<f64> = bins.iter().map(|bin| bin.upper).collect();
            let counts: Vec<u64> = bins.iter().map(|bin| bin.count).collect();
            DataFrame::new(vec![
                Series::new("lower".into(), lower).into(),
                Series::new("upper".into(), upper).into(),
                Series::new("count".into(), counts).into(),
            ])?
        }
        SectionData::Grouped(rows) => {
            let groups: Vec<&str> = rows.iter().map(|row| row.group.as_str()).collect();
            let series: Vec<&str> = rows.iter().map(|row| row.series.as_str()).collect();
            let counts: Vec<u64> = rows.iter().map(|row| row.count).collect();
            DataFrame::new(vec![
                Series::new("group".into(), groups).into(),
                Series::new("series".into(), series).into(),
                Series::new("count".into(), counts).into(),
            ])?
        }
    };

    Ok(df)
}

/// Section frame serialized to Parquet bytes.
pub fn section_parquet_bytes(section: &ReportSection) -> Result<Vec<u8>> {
    let mut df = section_dataframe(section)?;
    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        ParquetWriter::new(&mut cursor)
            .with_compression(ParquetCompression::Zstd(None))
            .finish(&mut df)?;
    }
    Ok(buffer)
}

pub fn report_json(report: &CatalogReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use crate::report::{CountRow, HistogramBin};

    use super::*;

    fn counts_section() -> ReportSection {
        ReportSection {
            key: "type_split",
            title: "Movies vs. TV Shows",
            data: SectionData::Counts(vec![
                CountRow {
                    label: "Movie".to_string(),
                    count: 2,
                },
                CountRow {
                    label: "TV Show".to_string(),
                    count: 1,
                },
            ]),
        }
    }

    #[test]
    fn counts_section_becomes_label_count_frame() {
        let df = section_dataframe(&counts_section()).expect("dataframe build failed");
        assert_eq!(df.get_column_names(), ["label", "count"]);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn histogram_section_carries_bin_edges() {
        let section = ReportSection {
            key: "release_years",
            title: "Release Trend Over Years",
            data: SectionData::Histogram(vec![HistogramBin {
                lower: 1990.0,
                upper: 2000.0,
                count: 4,
            }]),
        };
        let df = section_dataframe(&section).expect("dataframe build failed");
        assert_eq!(df.get_column_names(), ["lower", "upper", "count"]);
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn parquet_bytes_are_nonempty() {
        let bytes = section_parquet_bytes(&counts_section()).expect("parquet write failed");
        assert!(!bytes.is_empty());
    }

    #[test]
    fn report_serializes_to_json() {
        let report = CatalogReport {
            sections: vec![counts_section()],
        };
        let json = report_json(&report).expect("json serialize failed");
        assert!(json.contains("\"type_split\""));
        assert!(json.contains("\"Movie\""));
    }
}
