use crate::core::Exercise;
use crate::domain::model::{DayStats, GridSpec, TemperatureGrid, TemperatureReport};
use crate::utils::error::{LabError, Result};
use chrono::Weekday;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::path::{Path, PathBuf};

/// 產生 days x hours 的隨機溫度網格，數值落在 [min, max)
pub fn generate<R: Rng>(spec: &GridSpec, rng: &mut R) -> Result<TemperatureGrid> {
    if spec.days == 0 || spec.hours == 0 {
        return Err(LabError::EmptyGrid {
            days: spec.days,
            hours: spec.hours,
        });
    }
    let cells = spec.cell_count()?;
    crate::utils::validation::validate_half_open_range("temperature.range", spec.min, spec.max)?;

    let values = (0..cells)
        .map(|_| rng.gen_range(spec.min..spec.max))
        .collect();
    Ok(TemperatureGrid::from_values(spec.days, spec.hours, values))
}

pub fn generate_seeded(spec: &GridSpec, seed: Option<u64>) -> Result<TemperatureGrid> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate(spec, &mut rng)
}

fn mean(values: &[i32]) -> f64 {
    values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64
}

// 回傳第一個極值的索引，與 numpy argmax/argmin 相同
fn first_index_by<F: Fn(i32, i32) -> bool>(values: &[i32], better: F) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if better(v, values[best]) {
            best = i;
        }
    }
    best
}

fn day_label(day: usize) -> String {
    let mut weekday = Weekday::Mon;
    for _ in 0..day % 7 {
        weekday = weekday.succ();
    }
    format!("Day {} ({})", day + 1, weekday)
}

impl TemperatureGrid {
    pub fn mean_per_day(&self) -> Vec<f64> {
        self.rows().map(mean).collect()
    }

    pub fn max_per_day(&self) -> Vec<i32> {
        self.rows()
            .map(|row| row.iter().copied().max().unwrap_or_default())
            .collect()
    }

    pub fn min_per_day(&self) -> Vec<i32> {
        self.rows()
            .map(|row| row.iter().copied().min().unwrap_or_default())
            .collect()
    }

    pub fn hottest_hour_per_day(&self) -> Vec<usize> {
        self.rows().map(|row| first_index_by(row, |a, b| a > b)).collect()
    }

    pub fn coldest_hour_per_day(&self) -> Vec<usize> {
        self.rows().map(|row| first_index_by(row, |a, b| a < b)).collect()
    }

    pub fn hours_below_zero(&self) -> usize {
        self.values().iter().filter(|&&v| v < 0).count()
    }

    pub fn overall_mean(&self) -> f64 {
        mean(self.values())
    }

    pub fn report(&self) -> TemperatureReport {
        let per_day = self
            .rows()
            .enumerate()
            .map(|(day, row)| DayStats {
                day: day_label(day),
                mean: mean(row),
                max: row.iter().copied().max().unwrap_or_default(),
                min: row.iter().copied().min().unwrap_or_default(),
                hottest_hour: first_index_by(row, |a, b| a > b),
                coldest_hour: first_index_by(row, |a, b| a < b),
            })
            .collect();

        TemperatureReport {
            grid: self.clone(),
            per_day,
            hours_below_zero: self.hours_below_zero(),
            overall_mean: self.overall_mean(),
            overall_max: self.values().iter().copied().max().unwrap_or_default(),
            overall_min: self.values().iter().copied().min().unwrap_or_default(),
        }
    }

    /// 將網格寫成 CSV，表頭為 day,h00,h01,...
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(path.as_ref())?;
        let mut header = vec!["day".to_string()];
        header.extend((0..self.hours()).map(|h| format!("h{:02}", h)));
        writer.write_record(&header)?;

        for (day, row) in self.rows().enumerate() {
            let mut record = vec![day_label(day)];
            record.extend(row.iter().map(|v| v.to_string()));
            writer.write_record(&record)?;
        }
        writer.flush()?;

        tracing::info!("Exported {}x{} grid to {}", self.days(), self.hours(), path.as_ref().display());
        Ok(())
    }
}

pub struct TemperatureExercise {
    spec: GridSpec,
    seed: Option<u64>,
    export_csv: Option<PathBuf>,
}

impl TemperatureExercise {
    pub fn new(spec: GridSpec, seed: Option<u64>, export_csv: Option<PathBuf>) -> Self {
        Self {
            spec,
            seed,
            export_csv,
        }
    }
}

impl Exercise for TemperatureExercise {
    type Report = TemperatureReport;

    fn name(&self) -> &'static str {
        "temperature"
    }

    fn run(&self) -> Result<TemperatureReport> {
        tracing::info!(
            "Generating {}x{} temperature grid in [{}, {})",
            self.spec.days,
            self.spec.hours,
            self.spec.min,
            self.spec.max
        );
        if let Some(seed) = self.seed {
            tracing::debug!("Using seed {}", seed);
        }

        let grid = generate_seeded(&self.spec, self.seed)?;
        if let Some(path) = &self.export_csv {
            grid.export_csv(path)?;
        }
        Ok(grid.report())
    }
}

fn write_int_row(f: &mut fmt::Formatter<'_>, values: &[i32], width: usize) -> fmt::Result {
    let cells: Vec<String> = values.iter().map(|v| format!("{:>width$}", v, width = width)).collect();
    write!(f, "[{}]", cells.join(" "))
}

impl fmt::Display for TemperatureGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.values().iter().map(|v| v.to_string().len()).max().unwrap_or(1);
        for (day, row) in self.rows().enumerate() {
            f.write_str(if day == 0 { "[" } else { " " })?;
            write_int_row(f, row, width)?;
            if day + 1 == self.days() {
                f.write_str("]")?;
            } else {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for TemperatureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let means: Vec<String> = self.per_day.iter().map(|d| format!("{:.2}", d.mean)).collect();
        let maxes: Vec<i32> = self.per_day.iter().map(|d| d.max).collect();
        let mins: Vec<i32> = self.per_day.iter().map(|d| d.min).collect();
        let hottest: Vec<String> = self.per_day.iter().map(|d| d.hottest_hour.to_string()).collect();
        let coldest: Vec<String> = self.per_day.iter().map(|d| d.coldest_hour.to_string()).collect();

        writeln!(f, "Temperature grid ({} days x {} hours):", self.grid.days(), self.grid.hours())?;
        writeln!(f, "{}", self.grid)?;
        writeln!(f, "Average temperature per day: [{}]", means.join(" "))?;
        write!(f, "Maximum temperature per day: ")?;
        write_int_row(f, &maxes, 1)?;
        writeln!(f)?;
        write!(f, "Minimum temperature per day: ")?;
        write_int_row(f, &mins, 1)?;
        writeln!(f)?;
        writeln!(f, "Hottest hour per day: [{}]", hottest.join(" "))?;
        writeln!(f, "Coldest hour per day: [{}]", coldest.join(" "))?;
        writeln!(f, "Total number of hours below 0°C: {}", self.hours_below_zero)?;
        write!(f, "Overall average temperature of the week: {:.4}", self.overall_mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> TemperatureGrid {
        TemperatureGrid::from_rows(vec![vec![-2, 5, 10, 10], vec![3, -1, -1, 0]]).unwrap()
    }

    #[test]
    fn test_generate_respects_shape_and_range() {
        let spec = GridSpec::default();
        let grid = generate_seeded(&spec, Some(7)).unwrap();
        assert_eq!(grid.shape(), (7, 24));
        assert!(grid.values().iter().all(|&v| (-5..30).contains(&v)));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let spec = GridSpec::default();
        let a = generate_seeded(&spec, Some(42)).unwrap();
        let b = generate_seeded(&spec, Some(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_rejects_empty_and_inverted_specs() {
        let empty = GridSpec { days: 0, ..GridSpec::default() };
        assert!(matches!(generate_seeded(&empty, Some(1)), Err(LabError::EmptyGrid { .. })));

        let inverted = GridSpec { min: 30, max: -5, ..GridSpec::default() };
        assert!(matches!(
            generate_seeded(&inverted, Some(1)),
            Err(LabError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_generate_rejects_oversized_grids() {
        let overflowing = GridSpec {
            days: usize::MAX,
            hours: 2,
            ..GridSpec::default()
        };
        assert!(matches!(
            generate_seeded(&overflowing, Some(1)),
            Err(LabError::InvalidConfigValueError { .. })
        ));

        let too_large = GridSpec {
            days: crate::domain::model::MAX_GRID_CELLS + 1,
            hours: 1,
            ..GridSpec::default()
        };
        assert!(matches!(
            generate_seeded(&too_large, Some(1)),
            Err(LabError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_deserialized_grid_is_shape_checked() {
        let empty = serde_json::from_str::<TemperatureGrid>(r#"{"days":1,"hours":0,"values":[]}"#);
        assert!(empty.is_err());

        let short = serde_json::from_str::<TemperatureGrid>(r#"{"days":2,"hours":2,"values":[1,2,3]}"#);
        assert!(short.is_err());

        let grid = sample_grid();
        let decoded: TemperatureGrid = serde_json::from_str(&serde_json::to_string(&grid).unwrap()).unwrap();
        assert_eq!(decoded.mean_per_day(), grid.mean_per_day());
    }

    #[test]
    fn test_per_day_aggregates() {
        let grid = sample_grid();
        assert_eq!(grid.mean_per_day(), vec![5.75, 0.25]);
        assert_eq!(grid.max_per_day(), vec![10, 3]);
        assert_eq!(grid.min_per_day(), vec![-2, -1]);
    }

    #[test]
    fn test_hottest_and_coldest_take_first_occurrence() {
        let grid = sample_grid();
        assert_eq!(grid.hottest_hour_per_day(), vec![2, 0]);
        assert_eq!(grid.coldest_hour_per_day(), vec![0, 1]);
    }

    #[test]
    fn test_global_aggregates() {
        let grid = sample_grid();
        assert_eq!(grid.hours_below_zero(), 3);
        assert_eq!(grid.overall_mean(), 3.0);

        let report = grid.report();
        assert_eq!(report.overall_max, 10);
        assert_eq!(report.overall_min, -2);
        assert_eq!(report.per_day[0].day, "Day 1 (Mon)");
        assert_eq!(report.per_day[1].day, "Day 2 (Tue)");
    }

    #[test]
    fn test_grid_display_is_aligned() {
        let grid = sample_grid();
        assert_eq!(grid.to_string(), "[[-2  5 10 10]\n [ 3 -1 -1  0]]");
    }

    #[test]
    fn test_day_labels_wrap_after_a_week() {
        assert_eq!(day_label(6), "Day 7 (Sun)");
        assert_eq!(day_label(7), "Day 8 (Mon)");
    }
}
