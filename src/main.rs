use clap::Parser;
use study_gen::utils::{logger, validation::Validate};
use study_gen::{CliConfig, InstallConfig, Package, StudyBuilder, SyrthesCaseFactory, Verbosity};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting study-gen CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證命令列
    if let Err(e) = cli.validate() {
        tracing::error!("❌ Command line validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let package = Package::from_env();

    // 載入安裝配置（系統檔 + 使用者覆蓋檔）
    let config = match InstallConfig::load(&package.config_paths()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Cannot load installation configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let study = match cli.into_study() {
        Ok(study) => study,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    if study.verbosity > Verbosity::Quiet {
        println!("{} {} study/case generation", package.name, package.version);
    }
    if study.verbosity >= Verbosity::Verbose {
        tracing::debug!(
            "study = {}",
            serde_json::to_string_pretty(&study).unwrap_or_default()
        );
    }

    let builder = StudyBuilder::new(study, package, config, SyrthesCaseFactory);

    match builder.create_in(&std::env::current_dir()?) {
        Ok(repbase) => {
            tracing::info!("✅ Study creation completed successfully!");
            tracing::info!("📁 Study root: {}", repbase.display());
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Study creation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    if builder.study().verbosity >= Verbosity::Verbose {
        builder.study().dump();
    }

    Ok(())
}
