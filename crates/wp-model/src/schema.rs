//! Fixed column schema for water point monitoring records.
//!
//! The schema is declared once, in export order. Loading binds raw headers
//! against it and every export writes exactly these columns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Free text, kept as a display string.
    Text,
    /// 64-bit float; unparsable input becomes missing.
    Numeric,
}

impl ColumnKind {
    /// Type label used in the data dictionary.
    pub fn dictionary_label(&self) -> &'static str {
        match self {
            ColumnKind::Text => "character",
            ColumnKind::Numeric => "numeric",
        }
    }

    /// Parse a dictionary type label.
    ///
    /// Accepts `double` and `integer` as aliases for numeric columns.
    pub fn from_dictionary_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "character" | "text" | "string" => Some(ColumnKind::Text),
            "numeric" | "double" | "integer" => Some(ColumnKind::Numeric),
            _ => None,
        }
    }
}

/// A column of the cleaned water point table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    WaterPointName,
    SubmissionDate,
    SampleDate,
    Latitude,
    Longitude,
    PumpFeel,
    PumpTimeS,
    PumpStrokes,
    ArsenicMgL,
    AmmoniaMgL,
    FluorideMgL,
    NitrateMgL,
    FreeChlorineMgL,
    TdsMgL,
    Ph,
    TemperatureC,
    TurbidityNtu,
    Conductivity,
    ConductivityUnit,
    EcoliMpn100ml,
    EcoliCiLower,
    EcoliCiUpper,
    RiskLevel,
    EcoliPhoto,
}

impl Column {
    /// All columns in export order.
    pub const ALL: [Column; 24] = [
        Column::WaterPointName,
        Column::SubmissionDate,
        Column::SampleDate,
        Column::Latitude,
        Column::Longitude,
        Column::PumpFeel,
        Column::PumpTimeS,
        Column::PumpStrokes,
        Column::ArsenicMgL,
        Column::AmmoniaMgL,
        Column::FluorideMgL,
        Column::NitrateMgL,
        Column::FreeChlorineMgL,
        Column::TdsMgL,
        Column::Ph,
        Column::TemperatureC,
        Column::TurbidityNtu,
        Column::Conductivity,
        Column::ConductivityUnit,
        Column::EcoliMpn100ml,
        Column::EcoliCiLower,
        Column::EcoliCiUpper,
        Column::RiskLevel,
        Column::EcoliPhoto,
    ];

    /// Column name as it appears in raw headers and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::WaterPointName => "water_point_name",
            Column::SubmissionDate => "submission_date",
            Column::SampleDate => "sample_date",
            Column::Latitude => "latitude",
            Column::Longitude => "longitude",
            Column::PumpFeel => "pump_feel",
            Column::PumpTimeS => "pump_time_s",
            Column::PumpStrokes => "pump_strokes",
            Column::ArsenicMgL => "arsenic_mg_l",
            Column::AmmoniaMgL => "ammonia_mg_l",
            Column::FluorideMgL => "fluoride_mg_l",
            Column::NitrateMgL => "nitrate_mg_l",
            Column::FreeChlorineMgL => "free_chlorine_mg_l",
            Column::TdsMgL => "tds_mg_l",
            Column::Ph => "ph",
            Column::TemperatureC => "temperature_c",
            Column::TurbidityNtu => "turbidity_ntu",
            Column::Conductivity => "conductivity",
            Column::ConductivityUnit => "conductivity_unit",
            Column::EcoliMpn100ml => "ecoli_mpn_100ml",
            Column::EcoliCiLower => "ecoli_ci_lower",
            Column::EcoliCiUpper => "ecoli_ci_upper",
            Column::RiskLevel => "risk_level",
            Column::EcoliPhoto => "ecoli_photo",
        }
    }

    /// Storage kind of the column.
    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::WaterPointName
            | Column::SubmissionDate
            | Column::SampleDate
            | Column::PumpFeel
            | Column::ConductivityUnit
            | Column::RiskLevel
            | Column::EcoliPhoto => ColumnKind::Text,
            _ => ColumnKind::Numeric,
        }
    }

    /// Human-readable description, used for the data dictionary.
    pub fn description(&self) -> &'static str {
        match self {
            Column::WaterPointName => "Name of the water point (repeats across visits)",
            Column::SubmissionDate => "Date the survey form was submitted (YYYY-MM-DD)",
            Column::SampleDate => "Date the water sample was taken (YYYY-MM-DD)",
            Column::Latitude => "Latitude of the water point in decimal degrees",
            Column::Longitude => "Longitude of the water point in decimal degrees",
            Column::PumpFeel => {
                "Condition of the pump as felt by the enumerator; multiple answers are comma-separated"
            }
            Column::PumpTimeS => "Time needed to pump 20 litres, in seconds",
            Column::PumpStrokes => "Number of strokes needed to pump 20 litres",
            Column::ArsenicMgL => "Arsenic concentration in mg/L",
            Column::AmmoniaMgL => "Ammonia concentration in mg/L",
            Column::FluorideMgL => "Fluoride concentration in mg/L",
            Column::NitrateMgL => "Nitrate concentration in mg/L",
            Column::FreeChlorineMgL => "Free chlorine concentration in mg/L",
            Column::TdsMgL => "Total dissolved solids in mg/L",
            Column::Ph => "pH of the water sample",
            Column::TemperatureC => "Water temperature in degrees Celsius",
            Column::TurbidityNtu => "Turbidity in nephelometric turbidity units",
            Column::Conductivity => "Electrical conductivity, in the unit given by conductivity_unit",
            Column::ConductivityUnit => "Unit of the electrical conductivity measurement",
            Column::EcoliMpn100ml => "E. coli count as most probable number per 100 mL",
            Column::EcoliCiLower => "Lower bound of the E. coli confidence interval",
            Column::EcoliCiUpper => "Upper bound of the E. coli confidence interval",
            Column::RiskLevel => "Microbial risk classification derived from the E. coli count",
            Column::EcoliPhoto => "File reference of the incubation photo supporting the E. coli count",
        }
    }

    /// Look up a column by its exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        Column::ALL.iter().copied().find(|column| column.as_str() == name)
    }

    /// Position of the column in export order.
    pub fn position(&self) -> usize {
        Column::ALL
            .iter()
            .position(|column| column == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column names in export order.
pub fn column_names() -> Vec<&'static str> {
    Column::ALL.iter().map(Column::as_str).collect()
}
