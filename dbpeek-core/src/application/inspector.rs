// dbpeek-core/src/application/inspector.rs
//
// USE CASE: connect, enumerate, describe, sample, release.

use std::io::Write;
use std::time::Instant;
use tracing::{debug, instrument};

use crate::application::render;
use crate::domain::{InspectionReport, OutputFormat, TableSchema};
use crate::error::PeekError;
use crate::ports::CatalogReader;

/// Owns the database reader for exactly one run.
///
/// `run` consumes the inspector, so the underlying connection is released
/// when `run` returns, whether it succeeded or not.
pub struct Inspector {
    reader: Box<dyn CatalogReader>,
}

impl Inspector {
    pub fn new(reader: Box<dyn CatalogReader>) -> Self {
        Self { reader }
    }

    /// Lists the tables, then describes and samples the first one.
    ///
    /// In text format each section is written as soon as its query returns,
    /// so a later failure leaves the earlier sections on `out`. JSON is only
    /// written once every query has succeeded. Errors are never caught here.
    #[instrument(skip_all, fields(engine = %self.reader.engine(), ?format))]
    pub fn run<W: Write + ?Sized>(
        self,
        format: OutputFormat,
        out: &mut W,
    ) -> Result<InspectionReport, PeekError> {
        let start = Instant::now();
        let reader = self.reader;
        let streaming = format == OutputFormat::Text;

        let tables = reader.list_tables()?;
        debug!(count = tables.len(), "Catalog listed");
        if streaming {
            render::write_tables(out, &tables)?;
        }

        let mut report = InspectionReport::new(reader.engine(), tables);
        if let Some(table) = report.first_table().map(str::to_owned) {
            let columns = reader.describe_columns(&table)?;
            debug!(%table, columns = columns.len(), "Schema described");
            if streaming {
                render::write_schema(out, &table, &columns)?;
            }

            let sample_row = reader.sample_row(&table)?;
            debug!(%table, found = sample_row.is_some(), "Sample fetched");
            if streaming {
                render::write_sample(out, sample_row.as_ref())?;
            }

            report.schema = Some(TableSchema { table, columns });
            report.sample_row = sample_row;
        }

        if format == OutputFormat::Json {
            render::write_json(out, &report)?;
        }
        out.flush()?;

        debug!("Inspection finished in {:.2?}", start.elapsed());
        Ok(report)
    }
}
