use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::Local;
use scout_core::{AppViewModel, JobConclusion, Notice, NoticeLevel, SearchCriteria};
use scout_engine::{Anonymous, CredentialProvider, ReqwestJobApi, SearchController, StaticToken};
use scout_logging::{scout_info, scout_warn};

use crate::cli::Args;
use crate::settings::ScoutSettings;

/// Reads the criteria file. Only checks that it holds a JSON object.
pub fn read_criteria(path: &Path) -> anyhow::Result<SearchCriteria> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading criteria from {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing criteria in {}", path.display()))?;
    if !value.is_object() {
        bail!("criteria in {} must be a JSON object", path.display());
    }
    Ok(SearchCriteria::new(value))
}

/// Submits one search and prints its progress until it ends.
/// Returns whether the search completed with a usable result.
pub async fn run_search(
    settings: &ScoutSettings,
    args: &Args,
    criteria: SearchCriteria,
) -> anyhow::Result<bool> {
    let credentials: Arc<dyn CredentialProvider> = match &args.token {
        Some(token) => Arc::new(StaticToken::new(token.clone())),
        None => Arc::new(Anonymous),
    };
    let api = ReqwestJobApi::new(settings.api_settings(), credentials)?;
    scout_info!("Submitting search to {}", api.submit_url());

    let mut controller = SearchController::new(Arc::new(api), settings.poll_settings());
    let mut refresh = controller.subscribe_refresh();
    if let Some(credits) = args.credits {
        controller.save_credits(credits);
    }

    if let Err(rejection) = controller.submit(criteria).await {
        print_notice(&Notice::new(NoticeLevel::Error, rejection.message()));
        return Ok(false);
    }

    let mut last_label = String::new();
    let mut last_notice = None;
    render(&controller.view(), &mut last_label, &mut last_notice);
    while let Some(view) = controller.next_update().await {
        render(&view, &mut last_label, &mut last_notice);
    }
    render(&controller.view(), &mut last_label, &mut last_notice);

    while let Ok(signal) = refresh.try_recv() {
        match signal.result_id {
            Some(id) => scout_info!("Saved results changed, new result {id}"),
            None => scout_info!("Saved results changed"),
        }
    }

    let view = controller.view();
    if let Some(credits) = view.credits_remaining {
        println!("Credits remaining: {credits}");
    }
    match view.last_conclusion {
        Some(JobConclusion::Completed(outcome)) => {
            println!("Listings found: {}", outcome.listing_count);
            println!(
                "Saved to: {}",
                outcome.storage_location.as_deref().unwrap_or("remote storage only")
            );
            println!("Credits charged: {}", outcome.credits_charged);
            Ok(true)
        }
        Some(JobConclusion::MonitoringInterrupted(_)) => {
            scout_warn!("The search may still be running on the server");
            Ok(false)
        }
        _ => Ok(false),
    }
}

fn render(view: &AppViewModel, last_label: &mut String, last_notice: &mut Option<Notice>) {
    if !view.progress.label.is_empty() && view.progress.label != *last_label {
        println!(
            "[{}] {:>3}% {}",
            Local::now().format("%H:%M:%S"),
            view.progress.percentage,
            view.progress.label
        );
        last_label.clone_from(&view.progress.label);
    }
    if view.notice != *last_notice {
        if let Some(notice) = &view.notice {
            print_notice(notice);
        }
        last_notice.clone_from(&view.notice);
    }
}

fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => println!("{}", notice.text),
        NoticeLevel::Success => println!("OK: {}", notice.text),
        NoticeLevel::Warning => eprintln!("Warning: {}", notice.text),
        NoticeLevel::Error => eprintln!("Error: {}", notice.text),
    }
}
