//! In-memory export frame.

use anyhow::{Context, Result};
use polars::prelude::{
    DataFrame, DataType, IntoColumn, NamedFrom, PlSmallStr, Schema, Series,
};
use wp_model::{Column, ColumnKind, WaterPointRecord};

/// Builds the export frame: one column per schema column, in schema order.
pub fn build_frame(records: &[WaterPointRecord]) -> Result<DataFrame> {
    let columns = Column::ALL
        .iter()
        .map(|column| {
            let name = PlSmallStr::from(column.as_str());
            let series = match column.kind() {
                ColumnKind::Numeric => {
                    let values: Vec<Option<f64>> =
                        records.iter().map(|record| record.numeric(*column)).collect();
                    Series::new(name, values)
                }
                ColumnKind::Text => {
                    let values: Vec<Option<String>> = records
                        .iter()
                        .map(|record| record.text(*column).cloned())
                        .collect();
                    Series::new(name, values)
                }
            };
            series.into_column()
        })
        .collect();
    DataFrame::new(columns).context("build export frame")
}

/// Polars dtype for a schema column.
pub fn column_dtype(column: Column) -> DataType {
    match column.kind() {
        ColumnKind::Numeric => DataType::Float64,
        ColumnKind::Text => DataType::String,
    }
}

/// Polars schema of the export frame.
pub fn export_schema() -> Schema {
    let mut schema = Schema::with_capacity(Column::ALL.len());
    for column in Column::ALL {
        schema.with_column(PlSmallStr::from(column.as_str()), column_dtype(column));
    }
    schema
}
