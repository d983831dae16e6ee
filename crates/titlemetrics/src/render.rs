use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

use titlemetrics_core::report::{CatalogReport, ReportSection, SectionData};

pub fn print_report(report: &CatalogReport) {
    for section in &report.sections {
        println!("\n{}", section.title);
        println!("{}", section_table(section));
    }
}

pub fn section_table(section: &ReportSection) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    match &section.data {
        SectionData::Counts(rows) => {
            table.set_header(vec!["Label", "Count"]);
            for row in rows {
                table.add_row(vec![Cell::new(&row.label), Cell::new(row.count)]);
            }
        }
        SectionData::Values(rows) => {
            table.set_header(vec!["Title", "Value"]);
            for row in rows {
                table.add_row(vec![Cell::new(&row.label), Cell::new(row.value)]);
            }
        }
        SectionData::Histogram(bins) => {
            table.set_header(vec!["Range", "Count"]);
            for bin in bins {
                let range = format!("{:.0} to {:.0}", bin.lower, bin.upper);
                table.add_row(vec![Cell::new(range), Cell::new(bin.count)]);
            }
        }
        SectionData::Grouped(rows) => {
            table.set_header(vec!["Group", "Series", "Count"]);
            for row in rows {
                table.add_row(vec![
                    Cell::new(&row.group),
                    Cell::new(&row.series),
                    Cell::new(row.count),
                ]);
            }
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use titlemetrics_core::report::CountRow;

    use super::*;

    #[test]
    fn renders_counts_with_header() {
        let section = ReportSection {
            key: "type_split",
            title: "Movies vs. TV Shows",
            data: SectionData::Counts(vec![CountRow {
                label: "Movie".to_string(),
                count: 3,
            }]),
        };
        let rendered = section_table(&section).to_string();
        assert!(rendered.contains("Label"));
        assert!(rendered.contains("Movie"));
        assert!(rendered.contains('3'));
    }
}
