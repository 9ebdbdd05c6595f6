use std::{fs, path::PathBuf};

use anyhow::Context;
use calamine::{Data, Range, Reader, open_workbook_auto};
use clap::Args;
use lexis_analysis::{
    features::FeatureExtractor,
    sheet::SheetProcessor,
    table::{Cell, FeatureTable},
};
use lexis_lexicon::{dictionary::PronouncingDictionary, segment::UnicodeSegmenter};
use tracing::warn;

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct ProcessArg {
    /// Path to the raw LIWC spreadsheet (.xlsx or .xls)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Sheets to process (default: all sheets)
    #[arg(short, long, num_args = 0..)]
    pub sheets: Vec<String>,

    /// Output directory for processed CSV files
    /// (default: a `processed` directory next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a CMU-format pronouncing dictionary; without it every
    /// polysyllable count is zero
    #[arg(long)]
    pub dictionary: Option<PathBuf>,
}

pub(crate) fn run(arg: &ProcessArg) -> anyhow::Result<()> {
    let extension = arg
        .data
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    anyhow::ensure!(
        arg.data.exists() && !arg.data.is_dir() && matches!(extension, "xlsx" | "xls"),
        "Please provide a path to raw LIWC data in Excel format (.xlsx/.xls): {}",
        arg.data.display()
    );

    let dictionary = match &arg.dictionary {
        Some(path) => PronouncingDictionary::load(path)
            .with_context(|| format!("Failed to load pronouncing dictionary: {}", path.display()))?,
        None => {
            warn!("no pronouncing dictionary supplied; polysyllable counts fall back to 0");
            PronouncingDictionary::empty()
        }
    };

    let output_dir = arg.output.clone().unwrap_or_else(|| {
        arg.data
            .parent()
            .map_or_else(|| PathBuf::from("processed"), |dir| dir.join("processed"))
    });

    // The workbook handle lives only as long as this block; every exit path,
    // including a failed sheet read, releases the file.
    let sheets = {
        let mut workbook = open_workbook_auto(&arg.data)
            .with_context(|| format!("Failed to open workbook: {}", arg.data.display()))?;
        let sheet_names = if arg.sheets.is_empty() {
            workbook.sheet_names()
        } else {
            arg.sheets.clone()
        };

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for name in sheet_names {
            match workbook.worksheet_range(&name) {
                Ok(range) => sheets.push((name, table_from_range(&range))),
                Err(err) => warn!("failed to read sheet '{name}': {err}"),
            }
        }
        sheets
    };
    eprintln!("Read {} sheets from {}", sheets.len(), arg.data.display());

    let processor = SheetProcessor::new(FeatureExtractor::new(dictionary, UnicodeSegmenter));
    let results = processor.process_batch(sheets);

    fs::create_dir_all(&output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let mut written = 0;
    for (name, result) in results {
        let Ok(table) = result else {
            // Already logged by the batch processor; keep going.
            continue;
        };
        let path = output_dir.join(format!("{name}.csv"));
        util::write_table_csv(&path, &table)?;
        eprintln!("Wrote {}", path.display());
        written += 1;
    }
    eprintln!("Processed {written} sheets into {}", output_dir.display());

    Ok(())
}

/// Converts a spreadsheet cell range into a feature table. The first row
/// supplies the column names.
fn table_from_range(range: &Range<Data>) -> FeatureTable {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return FeatureTable::new();
    };
    let names = header
        .iter()
        .enumerate()
        .map(|(index, data)| match data {
            Data::String(name) if !name.is_empty() => name.clone(),
            _ => format!("column_{index}"),
        })
        .collect::<Vec<_>>();

    let mut columns: Vec<Vec<Cell>> = vec![vec![]; names.len()];
    for row in rows {
        for (index, cells) in columns.iter_mut().enumerate() {
            cells.push(row.get(index).map_or(Cell::Empty, cell_from_data));
        }
    }

    let mut table = FeatureTable::new();
    for (name, cells) in names.iter().zip(columns) {
        if let Err(err) = table.push_column(name, cells) {
            // Duplicate headers occasionally show up in exported sheets;
            // keep the first occurrence.
            warn!("skipping column: {err}");
        }
    }
    table
}

#[expect(clippy::cast_precision_loss)]
fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(text) => Cell::Text(text.clone()),
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Number(f64::from(u8::from(*value))),
        Data::DateTime(datetime) => Cell::Number(datetime.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Text(text.clone()),
    }
}
