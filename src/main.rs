use anyhow::Context;
use clap::Parser;
use fever_dose::config::toml_config::TomlConfig;
use fever_dose::core::form::FormState;
use fever_dose::domain::ports::ConfigProvider;
use fever_dose::utils::error::DoseError;
use fever_dose::utils::{logger, validation::Validate};
use fever_dose::{renderer_for, CliConfig, DoseCalculator, OutputFormat, Settings};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 先讀設定檔，日誌格式才能跟隨設定檔中的 output.format
    let file = match cli.load_file() {
        Ok(file) => file,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            exit_with(e)
        }
    };

    // 初始化日誌
    if cli.effective_format(&file) == OutputFormat::Json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting fever-dose CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }
    if let Some(path) = &cli.config {
        tracing::info!("📁 Loaded configuration from: {}", path);
    }

    let settings = match load_settings(&cli, &file) {
        Ok(settings) => settings,
        Err(e) => exit_with(e),
    };
    tracing::debug!(
        "ibuprofen ceiling {} mg, format {:?}",
        settings.ibuprofen_max_mg,
        settings.format
    );

    let calculator = DoseCalculator::from_config(&settings);
    let snapshot = cli.snapshot();

    let state = snapshot
        .state()
        .with_context(|| format!("reading --age '{}'", cli.age))?;
    if state == FormState::EmergencyAge {
        tracing::warn!("🚨 Emergency age group selected; dose entry is disabled");
    }

    let outcome = snapshot
        .submit(&calculator)
        .with_context(|| format!("reading --age '{}'", cli.age))?;

    let renderer = renderer_for(settings.output_format(), Some(settings.theme));
    match renderer.render(&outcome) {
        Ok(text) => print!("{}", text),
        Err(e) => exit_with(e),
    }

    // 輸入錯誤已就地提示，不記錄為錯誤
    if outcome.is_err() {
        std::process::exit(2);
    }

    Ok(())
}

/// 驗證設定並合併 (命令列 > 設定檔 > 預設值)
fn load_settings(cli: &CliConfig, file: &TomlConfig) -> fever_dose::Result<Settings> {
    file.validate()?;
    let settings = cli.merge(file)?;
    settings.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");
    Ok(settings)
}

fn exit_with(e: DoseError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code())
}
