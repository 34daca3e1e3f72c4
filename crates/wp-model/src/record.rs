//! Typed water point records.
//!
//! A record is generic over how its text fields are held. Loading produces
//! [`RawRecord`]s whose text is still raw bytes; encoding normalization turns
//! them into [`WaterPointRecord`]s with UTF-8 `String` text.

use serde::{Deserialize, Serialize};

use crate::schema::{Column, ColumnKind};

/// Record whose text fields are undecoded bytes.
pub type RawRecord = WaterPointRecord<Vec<u8>>;

/// One surveyed water point per visit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterPointRecord<T = String> {
    /// 1-based data row in the raw file. Diagnostics only, never exported.
    #[serde(skip)]
    pub source_row: usize,

    pub water_point_name: Option<T>,
    pub submission_date: Option<T>,
    pub sample_date: Option<T>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub pump_feel: Option<T>,
    pub pump_time_s: Option<f64>,
    pub pump_strokes: Option<f64>,
    pub arsenic_mg_l: Option<f64>,
    pub ammonia_mg_l: Option<f64>,
    pub fluoride_mg_l: Option<f64>,
    pub nitrate_mg_l: Option<f64>,
    pub free_chlorine_mg_l: Option<f64>,
    pub tds_mg_l: Option<f64>,
    pub ph: Option<f64>,
    pub temperature_c: Option<f64>,
    pub turbidity_ntu: Option<f64>,
    pub conductivity: Option<f64>,
    pub conductivity_unit: Option<T>,
    pub ecoli_mpn_100ml: Option<f64>,
    pub ecoli_ci_lower: Option<f64>,
    pub ecoli_ci_upper: Option<f64>,
    pub risk_level: Option<T>,
    pub ecoli_photo: Option<T>,
}

/// Borrowed view of a single cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellRef<'a, T> {
    Text(Option<&'a T>),
    Numeric(Option<f64>),
}

impl<T> WaterPointRecord<T> {
    /// Empty record for the given raw data row.
    pub fn for_row(source_row: usize) -> Self {
        Self {
            source_row,
            water_point_name: None,
            submission_date: None,
            sample_date: None,
            latitude: None,
            longitude: None,
            pump_feel: None,
            pump_time_s: None,
            pump_strokes: None,
            arsenic_mg_l: None,
            ammonia_mg_l: None,
            fluoride_mg_l: None,
            nitrate_mg_l: None,
            free_chlorine_mg_l: None,
            tds_mg_l: None,
            ph: None,
            temperature_c: None,
            turbidity_ntu: None,
            conductivity: None,
            conductivity_unit: None,
            ecoli_mpn_100ml: None,
            ecoli_ci_lower: None,
            ecoli_ci_upper: None,
            risk_level: None,
            ecoli_photo: None,
        }
    }

    /// True when both coordinates are present.
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Read a cell by column.
    pub fn cell(&self, column: Column) -> CellRef<'_, T> {
        match column.kind() {
            ColumnKind::Text => CellRef::Text(self.text(column)),
            ColumnKind::Numeric => CellRef::Numeric(self.numeric(column)),
        }
    }

    /// Text value of a text column; `None` for missing values and numeric columns.
    pub fn text(&self, column: Column) -> Option<&T> {
        match column {
            Column::WaterPointName => self.water_point_name.as_ref(),
            Column::SubmissionDate => self.submission_date.as_ref(),
            Column::SampleDate => self.sample_date.as_ref(),
            Column::PumpFeel => self.pump_feel.as_ref(),
            Column::ConductivityUnit => self.conductivity_unit.as_ref(),
            Column::RiskLevel => self.risk_level.as_ref(),
            Column::EcoliPhoto => self.ecoli_photo.as_ref(),
            _ => None,
        }
    }

    /// Numeric value of a numeric column; `None` for missing values and text columns.
    pub fn numeric(&self, column: Column) -> Option<f64> {
        match column {
            Column::Latitude => self.latitude,
            Column::Longitude => self.longitude,
            Column::PumpTimeS => self.pump_time_s,
            Column::PumpStrokes => self.pump_strokes,
            Column::ArsenicMgL => self.arsenic_mg_l,
            Column::AmmoniaMgL => self.ammonia_mg_l,
            Column::FluorideMgL => self.fluoride_mg_l,
            Column::NitrateMgL => self.nitrate_mg_l,
            Column::FreeChlorineMgL => self.free_chlorine_mg_l,
            Column::TdsMgL => self.tds_mg_l,
            Column::Ph => self.ph,
            Column::TemperatureC => self.temperature_c,
            Column::TurbidityNtu => self.turbidity_ntu,
            Column::Conductivity => self.conductivity,
            Column::EcoliMpn100ml => self.ecoli_mpn_100ml,
            Column::EcoliCiLower => self.ecoli_ci_lower,
            Column::EcoliCiUpper => self.ecoli_ci_upper,
            _ => None,
        }
    }

    /// Mutable slot of a text column, `None` for numeric columns.
    pub fn text_slot_mut(&mut self, column: Column) -> Option<&mut Option<T>> {
        match column {
            Column::WaterPointName => Some(&mut self.water_point_name),
            Column::SubmissionDate => Some(&mut self.submission_date),
            Column::SampleDate => Some(&mut self.sample_date),
            Column::PumpFeel => Some(&mut self.pump_feel),
            Column::ConductivityUnit => Some(&mut self.conductivity_unit),
            Column::RiskLevel => Some(&mut self.risk_level),
            Column::EcoliPhoto => Some(&mut self.ecoli_photo),
            _ => None,
        }
    }

    /// Mutable slot of a numeric column, `None` for text columns.
    pub fn numeric_slot_mut(&mut self, column: Column) -> Option<&mut Option<f64>> {
        match column {
            Column::Latitude => Some(&mut self.latitude),
            Column::Longitude => Some(&mut self.longitude),
            Column::PumpTimeS => Some(&mut self.pump_time_s),
            Column::PumpStrokes => Some(&mut self.pump_strokes),
            Column::ArsenicMgL => Some(&mut self.arsenic_mg_l),
            Column::AmmoniaMgL => Some(&mut self.ammonia_mg_l),
            Column::FluorideMgL => Some(&mut self.fluoride_mg_l),
            Column::NitrateMgL => Some(&mut self.nitrate_mg_l),
            Column::FreeChlorineMgL => Some(&mut self.free_chlorine_mg_l),
            Column::TdsMgL => Some(&mut self.tds_mg_l),
            Column::Ph => Some(&mut self.ph),
            Column::TemperatureC => Some(&mut self.temperature_c),
            Column::TurbidityNtu => Some(&mut self.turbidity_ntu),
            Column::Conductivity => Some(&mut self.conductivity),
            Column::EcoliMpn100ml => Some(&mut self.ecoli_mpn_100ml),
            Column::EcoliCiLower => Some(&mut self.ecoli_ci_lower),
            Column::EcoliCiUpper => Some(&mut self.ecoli_ci_upper),
            _ => None,
        }
    }

    /// Present text values, in column order.
    pub fn text_values(&self) -> impl Iterator<Item = &T> + '_ {
        Column::ALL
            .iter()
            .filter_map(move |column| self.text(*column))
    }

    /// Convert every text field, keeping numeric fields as they are.
    ///
    /// Returning `None` from `convert` marks the field missing.
    pub fn map_text<U>(self, mut convert: impl FnMut(T) -> Option<U>) -> WaterPointRecord<U> {
        WaterPointRecord {
            source_row: self.source_row,
            water_point_name: self.water_point_name.and_then(&mut convert),
            submission_date: self.submission_date.and_then(&mut convert),
            sample_date: self.sample_date.and_then(&mut convert),
            latitude: self.latitude,
            longitude: self.longitude,
            pump_feel: self.pump_feel.and_then(&mut convert),
            pump_time_s: self.pump_time_s,
            pump_strokes: self.pump_strokes,
            arsenic_mg_l: self.arsenic_mg_l,
            ammonia_mg_l: self.ammonia_mg_l,
            fluoride_mg_l: self.fluoride_mg_l,
            nitrate_mg_l: self.nitrate_mg_l,
            free_chlorine_mg_l: self.free_chlorine_mg_l,
            tds_mg_l: self.tds_mg_l,
            ph: self.ph,
            temperature_c: self.temperature_c,
            turbidity_ntu: self.turbidity_ntu,
            conductivity: self.conductivity,
            conductivity_unit: self.conductivity_unit.and_then(&mut convert),
            ecoli_mpn_100ml: self.ecoli_mpn_100ml,
            ecoli_ci_lower: self.ecoli_ci_lower,
            ecoli_ci_upper: self.ecoli_ci_upper,
            risk_level: self.risk_level.and_then(&mut convert),
            ecoli_photo: self.ecoli_photo.and_then(&mut convert),
        }
    }
}

impl WaterPointRecord<String> {
    /// Water point name as `&str`.
    pub fn name(&self) -> Option<&str> {
        self.water_point_name.as_deref()
    }
}
