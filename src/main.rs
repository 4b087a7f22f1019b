use anyhow::Context;
use blood_bank::config::cli::Command;
use blood_bank::core::requests::{classify_status_style, classify_urgency_style};
use blood_bank::utils::{logger, validation::Validate};
use blood_bank::{
    AssistantController, BloodBankError, CliArgs, ClientConfig, DashboardController,
    GeminiChatClient, HttpBloodBankApi, IssueController, UserNotice, UsersController,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = &args.api_base_url {
        config = config.with_api_base_url(base_url.clone());
    }

    // 初始化日誌
    let verbose = args.verbose || config.logging.verbose;
    logger::init(config.logging.format, verbose);

    tracing::info!("Starting blood-bank CLI");
    tracing::debug!("Client config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(args.command, &config).await {
        let notice = UserNotice::from(&e);
        eprintln!("❌ {}", notice.message);
        for issue in &notice.issues {
            eprintln!("   - {}", issue);
        }
        eprintln!("💡 {}", notice.suggestion);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Command, config: &ClientConfig) -> Result<(), BloodBankError> {
    let api = Arc::new(HttpBloodBankApi::new(config)?);

    match command {
        Command::Stock => {
            let dashboard =
                DashboardController::new(api, config.dashboard.critical_low_threshold);
            let overview = dashboard.load().await?;
            for point in &overview.chart {
                let marker = if overview.critical_low.contains(&point.group) {
                    " ⚠️ critical"
                } else {
                    ""
                };
                println!("{:<4} {:>5}{}", point.group, point.units, marker);
            }
            println!("Total units: {}", overview.total_units);
        }
        Command::Requests => {
            let issue = IssueController::new(api);
            for request in issue.load().await? {
                let status = request
                    .status
                    .as_ref()
                    .map(|status| format!("{:?}", classify_status_style(status)))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "#{:<5} {:<24} {:<4} x{:<3} {:<9} ({:?}) {}",
                    request.id,
                    request.user_name,
                    request.required_blood_group,
                    request.quantity_required,
                    request.urgency_level,
                    classify_urgency_style(&request.urgency_level),
                    status
                );
            }
        }
        Command::RequestCreate(create) => {
            let issue = IssueController::new(api);
            let created = issue.submit(&create.to_form()).await?;
            println!(
                "✅ Request #{} submitted: {} x {} (total {})",
                created.id,
                created.quantity_required,
                created.required_blood_group,
                created.total_amount
            );
        }
        Command::Users { search } => {
            let users = UsersController::new(api);
            users.load().await?;
            for user in users.search(&search).await {
                println!(
                    "{:<24} {:<4} {:<28} {}",
                    user.full_name, user.blood_group, user.email, user.phone_number
                );
            }
        }
        Command::UserCreate(create) => {
            let users = UsersController::new(api);
            let listed = users.create(&create.to_form()).await?;
            println!("✅ User registered; directory now has {} users", listed.len());
        }
        Command::Chat { message } => {
            let assistant = AssistantController::new(Arc::new(GeminiChatClient::new(config)?));
            if let Some(reply) = assistant.ask(&message).await? {
                println!("{}", reply.text);
            }
        }
    }

    Ok(())
}
