use crate::core::{Exercise, Output};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct Envelope<'a, R: Serialize> {
    exercise: &'a str,
    generated_at: DateTime<Utc>,
    report: &'a R,
}

pub struct LabRunner<O: Output> {
    output: O,
    format: OutputFormat,
}

impl<O: Output> LabRunner<O> {
    pub fn new(output: O, format: OutputFormat) -> Self {
        Self { output, format }
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    pub fn render<E: Exercise>(&self, exercise: &E, report: &E::Report) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(report.to_string()),
            OutputFormat::Json => {
                let envelope = Envelope {
                    exercise: exercise.name(),
                    generated_at: Utc::now(),
                    report,
                };
                // 單行 JSON，多個報告可逐行解析
                Ok(serde_json::to_string(&envelope)?)
            }
        }
    }

    /// 執行單一練習並輸出報告，回傳渲染後的內容
    pub fn run<E: Exercise>(&self, exercise: &E) -> Result<String> {
        tracing::info!("Running exercise '{}'", exercise.name());

        let report = exercise.run()?;
        let rendered = self.render(exercise, &report)?;
        self.output.write_report(exercise.name(), &rendered)?;

        tracing::info!("Exercise '{}' finished", exercise.name());
        Ok(rendered)
    }
}
