use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::form::file::{FileConstraints, PreviewRegistry};
use crate::form::{FieldError, FormDraft, PrefillForm, Requirement, SubmitOutcome, SubmitRejection};
use crate::http_client::HttpClient;
use crate::member_api::{HttpMemberApi, MemberApi, SubmissionPayload};
use crate::postcode::{self, LoadState};

#[derive(Parser, Debug)]
#[command(
    name = "prefill",
    about = "Validate and submit resume prefill drafts from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a draft into the form and report what blocks submission
    Check(CheckArgs),
    /// Replay a draft and submit it to the member API
    Submit(SubmitArgs),
    /// Load the address lookup widget script and report its state
    Postcode,
    /// Print the OAuth login URL
    LoginUrl,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Path to the JSON draft
    draft: PathBuf,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct SubmitArgs {
    /// Path to the JSON draft
    draft: PathBuf,
    /// Upload the profile photo after the member is created
    #[arg(long)]
    upload_photo: bool,
    /// Bearer token for APIs that do not use the session cookie
    #[arg(long, env = "PREFILL_BEARER_TOKEN", hide_env_values = true)]
    bearer_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport {
    can_submit: bool,
    missing: Vec<Requirement>,
    errors: Vec<FieldError>,
    payload: SubmissionPayload,
}

pub async fn run(config: Config) -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => check(&config, args).await,
        Command::Submit(args) => submit(&config, args).await,
        Command::Postcode => load_postcode(&config).await,
        Command::LoginUrl => {
            println!("{}", config.oauth_login_url);
            Ok(())
        }
    }
}

async fn load_form(config: &Config, draft_path: &Path) -> Result<PrefillForm, AppError> {
    let draft = FormDraft::load(draft_path).await?;
    let base_dir = draft_path.parent().unwrap_or_else(|| Path::new("."));

    let mut form = PrefillForm::new(
        FileConstraints::profile_photo(config.photo_max_mb),
        PreviewRegistry::default(),
    )
    .with_phone_mode(config.phone_store_mode);
    draft.replay(&mut form, base_dir).await?;
    Ok(form)
}

fn http_client(config: &Config) -> Result<HttpClient, AppError> {
    let http = HttpClient::new(config.api_base_url.clone())
        .context("Failed to build HTTP client")?
        .with_default_timeout(Duration::from_millis(config.request_timeout_ms));
    Ok(http)
}

async fn check(config: &Config, args: CheckArgs) -> Result<(), AppError> {
    let form = load_form(config, &args.draft).await?;
    let report = CheckReport {
        can_submit: form.can_submit(),
        missing: form.missing_requirements(),
        errors: form.field_errors(),
        payload: form.build_payload(),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{json}");
    } else {
        print_report(&report);
    }

    if report.can_submit {
        Ok(())
    } else {
        Err(SubmitRejection::Blocked(report.missing).into())
    }
}

fn print_report(report: &CheckReport) {
    if report.can_submit {
        println!("제출 가능: 모든 필수 항목이 입력되었습니다.");
    } else {
        println!("제출 불가: 다음 항목을 입력해 주세요.");
        for requirement in &report.missing {
            println!("  - {requirement}");
        }
    }
    if !report.errors.is_empty() {
        println!("입력 오류:");
        for error in &report.errors {
            println!("  - [{:?}] {}", error.control, error.message);
        }
    }
}

async fn submit(config: &Config, args: SubmitArgs) -> Result<(), AppError> {
    let mut form = load_form(config, &args.draft).await?;
    let api = HttpMemberApi::new(http_client(config)?)
        .with_paths(&config.member_init_path, &config.profile_image_path)
        .with_bearer_token(args.bearer_token);

    let outcome = form.submit(&api).await?;
    if let Some(notice) = form.take_notice() {
        println!("{}: {}", notice.title, notice.text);
    }

    match outcome {
        SubmitOutcome::Saved(response) => {
            if let Some(member_id) = response.member_id {
                info!("Member id: {member_id}");
            }
            if args.upload_photo {
                match form.photo().file() {
                    Some(photo) => {
                        api.upload_profile_image(photo).await?;
                        println!("프로필 사진이 업로드되었습니다.");
                    }
                    None => warn!("--upload-photo given but the draft has no photo"),
                }
            }
            Ok(())
        }
        SubmitOutcome::Failed(e) => Err(e.into()),
    }
}

async fn load_postcode(config: &Config) -> Result<(), AppError> {
    let http = http_client(config)?;
    let loader = postcode::global();
    match loader.ensure_loaded(&http).await {
        LoadState::Ready => {
            println!("주소 검색 위젯 준비 완료 ({})", loader.src());
            Ok(())
        }
        LoadState::Failed(message) => Err(anyhow::anyhow!(message).into()),
        state => Err(anyhow::anyhow!("unexpected postcode loader state: {state:?}").into()),
    }
}
