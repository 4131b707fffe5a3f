use crate::core::Exercise;
use crate::utils::error::{LabError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const YEAR: &str = "year";
pub const COLOR: &str = "color";
pub const CRASHED: &str = "Crashed?";
pub const KILOMETERS: &str = "Kilometers";

/// Insertion-ordered mapping describing a car.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarInfo {
    fields: Map<String, Value>,
}

impl CarInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn populate(year: u16, color: &str, crashed: bool, kilometers: u64) -> Self {
        let mut info = Self::new();
        info.set(YEAR, year);
        info.set(COLOR, color);
        info.set(CRASHED, crashed);
        info.set(KILOMETERS, kilometers);
        info
    }

    /// 新增或覆寫欄位，保留原本的插入順序
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.to_string(), value.into())
    }

    pub fn get(&self, key: &str) -> Result<&Value> {
        self.fields.get(key).ok_or_else(|| LabError::MissingField {
            field: key.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn typed<'a, T>(&'a self, key: &str, expected: &str, cast: impl Fn(&'a Value) -> Option<T>) -> Result<T> {
        cast(self.get(key)?).ok_or_else(|| LabError::FieldType {
            field: key.to_string(),
            expected: expected.to_string(),
        })
    }

    pub fn year(&self) -> Result<u64> {
        self.typed(YEAR, "an unsigned integer", Value::as_u64)
    }

    pub fn color(&self) -> Result<&str> {
        self.typed(COLOR, "a string", Value::as_str)
    }

    pub fn crashed(&self) -> Result<bool> {
        self.typed(CRASHED, "a boolean", Value::as_bool)
    }

    pub fn kilometers(&self) -> Result<u64> {
        self.typed(KILOMETERS, "an unsigned integer", Value::as_u64)
    }

    pub fn drive(&mut self, km: u64) -> Result<u64> {
        let total = self
            .kilometers()?
            .checked_add(km)
            .ok_or_else(|| LabError::Overflow {
                field: KILOMETERS.to_string(),
            })?;
        self.set(KILOMETERS, total);
        Ok(total)
    }

    pub fn mark_crashed(&mut self) {
        self.set(CRASHED, true);
    }
}

impl fmt::Display for CarInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .fields
            .iter()
            .map(|(key, value)| format!("{}: {}", quote(key), repr(value)))
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
    }
}

/// Python-style literal: single-quoted strings, `True`/`False`, `None`.
fn repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(repr).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", quote(k), repr(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

// 含單引號且不含雙引號時改用雙引號
fn quote(s: &str) -> String {
    if s.contains('\'') && !s.contains('"') {
        format!("\"{}\"", s.replace('\\', "\\\\"))
    } else {
        format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarReport {
    pub initial: CarInfo,
    pub updated: CarInfo,
    pub additional_km: u64,
}

impl fmt::Display for CarReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial Car Info")?;
        writeln!(f, "{}", self.initial)?;
        writeln!(f, "Updated Car Info")?;
        write!(f, "{}", self.updated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarSettings {
    pub year: u16,
    pub color: String,
    pub crashed: bool,
    pub kilometers: u64,
    pub additional_km: u64,
}

impl Default for CarSettings {
    fn default() -> Self {
        Self {
            year: 2004,
            color: "Blue".to_string(),
            crashed: false,
            kilometers: 41312,
            additional_km: 100,
        }
    }
}

pub struct CarInfoExercise {
    settings: CarSettings,
}

impl CarInfoExercise {
    pub fn new(settings: CarSettings) -> Self {
        Self { settings }
    }
}

impl Exercise for CarInfoExercise {
    type Report = CarReport;

    fn name(&self) -> &'static str {
        "car"
    }

    fn run(&self) -> Result<CarReport> {
        let s = &self.settings;
        let initial = CarInfo::populate(s.year, &s.color, s.crashed, s.kilometers);
        tracing::debug!("Initial car info: {}", initial);

        let mut updated = initial.clone();
        let total = updated.drive(s.additional_km)?;
        updated.mark_crashed();
        tracing::info!("Car driven {} km further, odometer now {}", s.additional_km, total);

        Ok(CarReport {
            initial,
            updated,
            additional_km: s.additional_km,
        })
    }
}
