//! Result rendering and export.
//!
//! Live runs print a padded table per stimulus to stdout. With an
//! output directory, each stimulus gets its own file in the chosen
//! format instead.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::associations::AssociationList;
use crate::Result;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Txt,
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }
}

/// Prints all association tables to stdout, one block per stimulus.
pub fn print_associations(lists: &[AssociationList]) {
    for list in lists {
        println!("{}:", list.stimulus);
        for association in &list.associations {
            println!("\t{:<20}{:.2}", association.word, association.strength);
        }
    }
}

/// Empties and recreates the output directory.
pub fn prepare_output_directory(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Writes one `<stimulus>.<ext>` file per association table into `dir`.
pub fn write_associations(
    lists: &[AssociationList],
    dir: &Path,
    format: ExportFormat,
) -> Result<()> {
    for list in lists {
        let path = dir.join(format!("{}.{}", list.stimulus, format.extension()));
        match format {
            ExportFormat::Txt => {
                let mut writer = BufWriter::new(File::create(&path)?);
                for association in &list.associations {
                    writeln!(
                        writer,
                        "{:<20}{:.2}",
                        association.word, association.strength
                    )?;
                }
                writer.flush()?;
            }
            ExportFormat::Csv | ExportFormat::Tsv => {
                let delimiter = if format == ExportFormat::Tsv { b'\t' } else { b',' };
                let mut writer = csv::WriterBuilder::new()
                    .delimiter(delimiter)
                    .from_path(&path)?;
                for association in &list.associations {
                    writer.serialize(association)?;
                }
                writer.flush()?;
            }
            ExportFormat::Json => {
                let writer = BufWriter::new(File::create(&path)?);
                serde_json::to_writer_pretty(writer, list)?;
            }
        }
    }
    Ok(())
}
