mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use crate::schedule::parse_fiscal_year_end;
use defaults::*;
use std::collections::HashSet;
use std::path::Path;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            store_path: default_store_path(),
            report_dir: default_report_dir(),
            concurrency: default_concurrency(),
            governance: GovernanceDefaults::default(),
            retry: RetryConfig::default(),
            reminders: default_reminders(),
            companies: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if present, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        let mut seen = HashSet::new();
        for company in &self.companies {
            if company.id.is_empty() {
                return Err(ConfigError::EmptyCompanyId);
            }
            if !seen.insert(company.id.as_str()) {
                return Err(ConfigError::DuplicateCompany(company.id.clone()));
            }
            parse_fiscal_year_end(&company.fiscal_year_end).map_err(|e| {
                ConfigError::InvalidFiscalYearEnd {
                    company: company.id.clone(),
                    source: e,
                }
            })?;
        }

        Ok(())
    }

    pub fn find_company(&self, id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminders::ReminderChannel;
    use std::io::Write;

    const SAMPLE: &str = r#"
store_path: /tmp/tasks.json
governance:
  notice_period_days: 21
companies:
  - id: acme
    name: Acme SAS
    fiscal_year_end: "2023-12-31"
  - id: globex
    fiscal_year_end: "2023-03-31"
    governance:
      approval_deadline_days: 150
"#;

    #[test]
    fn test_parse_with_defaults() {
        let config: Config = serde_yaml::from_str(SAMPLE).unwrap();

        assert_eq!(config.version, 1);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.report_dir, std::path::PathBuf::from("reports"));
        assert_eq!(config.governance.notice_period_days, 21);
        assert_eq!(config.governance.approval_deadline_days, 180);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.companies.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_company_overrides_resolve_against_config_defaults() {
        let config: Config = serde_yaml::from_str(SAMPLE).unwrap();
        let globex = config.find_company("globex").unwrap();

        let params = globex.governance.resolve(config.governance.params());
        assert_eq!(params.notice_period_days, 21);
        assert_eq!(params.approval_deadline_days, 150);
        assert_eq!(globex.display_name(), "globex");
    }

    #[test]
    fn test_zero_timings_use_builtin_defaults() {
        let yaml = r#"
governance:
  approval_deadline_days: 0
companies:
  - id: acme
    fiscal_year_end: "2023-12-31"
    governance:
      notice_period_days: 0
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let acme = config.find_company("acme").unwrap();

        let params = acme.governance.resolve(config.governance.params());
        assert_eq!(params.notice_period_days, 15);
        assert_eq!(params.approval_deadline_days, 180);
    }

    #[test]
    fn test_default_reminder_intervals() {
        let config = Config::default();
        let days: Vec<u32> = config.reminders.iter().map(|r| r.days_before).collect();
        assert_eq!(days, vec![30, 14, 7, 1]);
        assert!(config
            .reminders
            .iter()
            .all(|r| r.enabled && r.channel == ReminderChannel::Email));
    }

    #[test]
    fn test_rejects_duplicate_company() {
        let yaml = r#"
companies:
  - id: acme
    fiscal_year_end: "2023-12-31"
  - id: acme
    fiscal_year_end: "2023-06-30"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateCompany(id)) if id == "acme"
        ));
    }

    #[test]
    fn test_rejects_bad_fiscal_year_end() {
        let yaml = r#"
companies:
  - id: acme
    fiscal_year_end: "end of december"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFiscalYearEnd { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_notice_period() {
        let yaml = "governance:\n  notice_period_days: -3\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let config = Config {
            concurrency: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroConcurrency)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.find_company("acme").unwrap().name, "Acme SAS");
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.yaml")).unwrap();
        assert!(config.companies.is_empty());
    }
}
