use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::core::form::FormSnapshot;
use crate::core::theme::Theme;
use crate::domain::model::{OutputFormat, WeightUnit};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "fever-dose")]
#[command(about = "Pediatric fever-medication dose calculator")]
pub struct CliConfig {
    /// Age group: under-2-months, 2-to-6-months or 6-months-and-up (0-2, 2-6, 6+ also accepted)
    #[arg(short, long, default_value = "")]
    pub age: String,

    /// Patient weight
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    pub weight: String,

    /// Unit of --weight
    #[arg(short, long, default_value = "kg")]
    pub unit: WeightUnit,

    /// Output format; overrides the config file
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Ibuprofen single-dose ceiling in mg (400 or 800); overrides the config file
    #[arg(long)]
    pub ibuprofen_max: Option<u32>,

    /// Seed for the theme color pick used by HTML output
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::new(self.age.clone(), self.weight.clone(), self.unit.as_str())
    }

    /// 讀取 (若有指定) 的設定檔
    pub fn load_file(&self) -> Result<TomlConfig> {
        match &self.config {
            Some(path) => {
                crate::utils::validation::validate_path("config", path)?;
                TomlConfig::from_file(path)
            }
            None => Ok(TomlConfig::default()),
        }
    }

    /// 輸出格式 (命令列 > 設定檔 > 預設值)；日誌格式也依此決定
    pub fn effective_format(&self, file: &TomlConfig) -> OutputFormat {
        self.format.or_else(|| file.format()).unwrap_or_default()
    }

    /// 命令列參數優先於設定檔
    pub fn merge(&self, file: &TomlConfig) -> Result<Settings> {
        let defaults = Settings::default();

        let ibuprofen_max_mg = self
            .ibuprofen_max
            .map(f64::from)
            .or_else(|| file.ibuprofen_max_mg())
            .unwrap_or(defaults.ibuprofen_max_mg);

        let format = self.effective_format(file);

        let theme = match (file.fixed_theme()?, self.seed.or_else(|| file.seed())) {
            (Some(theme), _) => theme,
            (None, Some(seed)) => Theme::from_seed(seed),
            (None, None) => Theme::random(&mut rand::thread_rng()),
        };

        Ok(Settings {
            ibuprofen_max_mg,
            format,
            theme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_file() {
        let cli = CliConfig::parse_from([
            "fever-dose",
            "--age",
            "6+",
            "--weight",
            "20",
            "--format",
            "json",
            "--ibuprofen-max",
            "800",
            "--seed",
            "3",
        ]);
        let file = TomlConfig::from_toml_str(
            "[dosing]\nibuprofen_max_single_dose_mg = 400\n[output]\nformat = \"html\"\n",
        )
        .unwrap();

        let settings = cli.merge(&file).unwrap();
        assert_eq!(settings.ibuprofen_max_mg, 800.0);
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.theme, Theme::from_seed(3));
    }

    #[test]
    fn test_format_from_file_when_flag_absent() {
        let cli = CliConfig::parse_from(["fever-dose", "--age", "6+", "--weight", "20"]);
        let file = TomlConfig::from_toml_str("[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(cli.effective_format(&file), OutputFormat::Json);
        assert_eq!(cli.merge(&file).unwrap().format, OutputFormat::Json);

        let cli = CliConfig::parse_from(["fever-dose", "--format", "text"]);
        assert_eq!(cli.effective_format(&file), OutputFormat::Text);
        assert_eq!(cli.effective_format(&TomlConfig::default()), OutputFormat::Text);
    }

    #[test]
    fn test_snapshot_carries_raw_fields() {
        let cli = CliConfig::parse_from(["fever-dose", "-a", "2-6", "-w", "15", "-u", "lbs"]);
        assert_eq!(cli.snapshot(), FormSnapshot::new("2-6", "15", "lbs"));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let cli = CliConfig::parse_from(["fever-dose"]);
        assert_eq!(cli.snapshot(), FormSnapshot::new("", "", "kg"));
    }
}
