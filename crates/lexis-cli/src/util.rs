use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use lexis_analysis::table::{Cell, FeatureTable};
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber from `RUST_LOG`, defaulting to `warn`
/// so missing-column and failed-sheet reports reach the terminal.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Reads a processed-sheet CSV file into a feature table.
///
/// Cells that parse as floats become numbers, empty cells stay empty, and
/// everything else is text.
pub fn read_table_csv<P>(path: P) -> anyhow::Result<FeatureTable>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open table file: {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header row: {}", path.display()))?
        .clone();
    let mut columns: Vec<Vec<Cell>> = vec![vec![]; headers.len()];

    for (row, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to read row {} of {}", row + 1, path.display()))?;
        for (column, field) in record.iter().enumerate() {
            let cell = if field.is_empty() {
                Cell::Empty
            } else if let Ok(value) = field.parse::<f64>() {
                Cell::Number(value)
            } else {
                Cell::Text(field.to_owned())
            };
            if let Some(cells) = columns.get_mut(column) {
                cells.push(cell);
            }
        }
    }

    let mut table = FeatureTable::new();
    for (name, cells) in headers.iter().zip(columns) {
        table
            .push_column(name, cells)
            .with_context(|| format!("Invalid table layout in {}", path.display()))?;
    }
    Ok(table)
}

/// Writes a feature table as CSV: a leading `row` index column, then every
/// table column in order.
pub fn write_table_csv<P>(path: P, table: &FeatureTable) -> anyhow::Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    let names = table.column_names().collect::<Vec<_>>();
    let mut header = vec!["row"];
    header.extend(&names);
    writer
        .write_record(&header)
        .with_context(|| format!("Failed to write header to {}", path.display()))?;

    let columns = names
        .iter()
        .map(|name| table.column(name).expect("column listed by the table"))
        .collect::<Vec<_>>();
    for row in 0..table.row_count() {
        let mut record = vec![row.to_string()];
        for cells in &columns {
            let field = match &cells[row] {
                Cell::Number(value) => value.to_string(),
                Cell::Text(text) => text.clone(),
                Cell::Empty => String::new(),
            };
            record.push(field);
        }
        writer
            .write_record(&record)
            .with_context(|| format!("Failed to write row {row} to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush output to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_csv_round_trip() {
        let dir = std::env::temp_dir().join("lexis-util-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("table.csv");

        let mut table = FeatureTable::new();
        table
            .push_column(
                "response",
                vec![
                    Cell::Text("one, with a comma".to_owned()),
                    Cell::Text("two".to_owned()),
                ],
            )
            .unwrap();
        table
            .push_column("hedges", vec![Cell::Number(1.5), Cell::Empty])
            .unwrap();
        write_table_csv(&path, &table).unwrap();

        let read_back = read_table_csv(&path).unwrap();
        let names: Vec<_> = read_back.column_names().collect();
        assert_eq!(names, ["row", "response", "hedges"]);
        assert_eq!(
            read_back.column("response").unwrap()[0],
            Cell::Text("one, with a comma".to_owned())
        );
        assert_eq!(read_back.column("hedges").unwrap()[0], Cell::Number(1.5));
        assert_eq!(read_back.column("hedges").unwrap()[1], Cell::Empty);
    }
}
