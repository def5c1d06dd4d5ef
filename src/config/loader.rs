//! Configuration loading functionality.
//!
//! This module provides the [`ScheduleLoader`] type for loading statutory
//! schedule sets from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::{BracketTable, TaxSchedule, TaxTable};
use crate::error::{EngineError, EngineResult};
use crate::models::PeriodType;

use super::types::{
    BracketSpec, ContributionsConfig, ScheduleMetadata, ScheduleSet, TaxFileConfig,
};

/// Loads and provides access to a statutory schedule set.
///
/// The `ScheduleLoader` reads YAML schedule files from a directory,
/// validates them through the domain constructors, and exposes the
/// resulting [`ScheduleSet`] snapshot.
///
/// # Directory Structure
///
/// The schedule directory should have the following structure:
/// ```text
/// config/ph/
/// ├── schedule.yaml       # Schedule set metadata
/// ├── contributions.yaml  # Contribution schedules
/// └── tax/
///     └── 2023-01-01.yaml # Withholding tables effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ScheduleLoader;
///
/// let loader = ScheduleLoader::load("./config/ph").unwrap();
/// println!("Schedule set: {}", loader.metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleLoader {
    schedules: ScheduleSet,
}

impl ScheduleLoader {
    /// Loads a schedule set from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the schedule directory (e.g., "./config/ph")
    ///
    /// # Returns
    ///
    /// Returns a `ScheduleLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any bracket table fails validation (gaps, overlaps, bounded top
    ///   bracket, rates outside `[0, 1]`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payslip_engine::config::ScheduleLoader;
    ///
    /// let loader = ScheduleLoader::load("./config/ph")?;
    /// # Ok::<(), payslip_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        // Load schedule.yaml
        let schedule_path = path.join("schedule.yaml");
        let metadata = Self::load_yaml::<ScheduleMetadata>(&schedule_path)?;

        // Load contributions.yaml
        let contributions_path = path.join("contributions.yaml");
        let contributions_config = Self::load_yaml::<ContributionsConfig>(&contributions_path)?;

        // Load all tax files from the tax directory
        let tax_dir = path.join("tax");
        let tax_files = Self::load_tax_files(&tax_dir)?;

        let tax = Self::build_tax_schedule(tax_files)?;

        let contributions = contributions_config
            .contributions
            .iter()
            .map(|spec| spec.to_rule())
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Self {
            schedules: ScheduleSet::new(metadata, tax, contributions),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all tax files from the tax directory.
    fn load_tax_files(tax_dir: &Path) -> EngineResult<Vec<TaxFileConfig>> {
        let tax_dir_str = tax_dir.display().to_string();

        if !tax_dir.exists() {
            return Err(EngineError::ConfigNotFound { path: tax_dir_str });
        }

        let entries = fs::read_dir(tax_dir).map_err(|_| EngineError::ConfigNotFound {
            path: tax_dir_str.clone(),
        })?;

        let mut files = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: tax_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let file = Self::load_yaml::<TaxFileConfig>(&path)?;
                files.push(file);
            }
        }

        if files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no tax files found)", tax_dir_str),
            });
        }

        Ok(files)
    }

    /// Builds the validated tax schedule from the raw dated files.
    fn build_tax_schedule(files: Vec<TaxFileConfig>) -> EngineResult<TaxSchedule> {
        let mut tables = Vec::new();

        for file in &files {
            let sections: [(PeriodType, &[BracketSpec]); 4] = [
                (PeriodType::Monthly, &file.tables.monthly),
                (PeriodType::SemiMonthly, &file.tables.semi_monthly),
                (PeriodType::Weekly, &file.tables.weekly),
                (PeriodType::Daily, &file.tables.daily),
            ];

            for (period_type, specs) in sections {
                let table_id = format!("withholding_{}", period_type);
                let brackets = specs
                    .iter()
                    .map(|b| b.to_bracket(&table_id))
                    .collect::<EngineResult<Vec<_>>>()?;

                tables.push(TaxTable {
                    period_type,
                    effective_from: file.effective_from,
                    effective_to: file.effective_to,
                    table: BracketTable::new(table_id, brackets)?,
                });
            }
        }

        TaxSchedule::new(tables)
    }

    /// Returns the loaded schedule set.
    pub fn schedules(&self) -> &ScheduleSet {
        &self.schedules
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        self.schedules.metadata()
    }
}
