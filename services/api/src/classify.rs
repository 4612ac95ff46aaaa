use crate::infra::{load_channel_groups_from, ChannelGroupStore, SeedSource};
use clap::{Args, ValueEnum};
use event_amplify::config::{AppConfig, SeedConfig};
use event_amplify::error::AppError;
use event_amplify::workflows::catalog::{AmplifyType, EntityId, Question};
use event_amplify::workflows::events::{
    Event, EventClassifier, EventLevel, EventStatus, PriorityGroup,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Channel group id answering the role question
    #[arg(long)]
    pub(crate) role: u64,
    /// Channel group id answering the invitee question
    #[arg(long)]
    pub(crate) invitee: u64,
    /// Channel group id answering the scale question
    #[arg(long)]
    pub(crate) scale: u64,
    /// CSV file of channel groups (`id,name,type,point`); falls back to APP_CHANNEL_GROUPS_CSV
    /// and then to the bundled sample set
    #[arg(long)]
    pub(crate) channel_groups: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = AmplifyArg::Share)]
    pub(crate) amplify_type: AmplifyArg,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum AmplifyArg {
    Share,
    Sponsor,
    Inject,
}

impl From<AmplifyArg> for AmplifyType {
    fn from(value: AmplifyArg) -> Self {
        match value {
            AmplifyArg::Share => AmplifyType::Share,
            AmplifyArg::Sponsor => AmplifyType::Sponsor,
            AmplifyArg::Inject => AmplifyType::Inject,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClassificationReport {
    pub(crate) seed_source: SeedLabel,
    pub(crate) channel_groups: usize,
    pub(crate) role_points: i64,
    pub(crate) invitee_points: i64,
    pub(crate) scale_points: i64,
    pub(crate) total_points: i64,
    pub(crate) amplify_type: AmplifyType,
    pub(crate) event_level: Option<EventLevel>,
    pub(crate) event_status: Option<EventStatus>,
    pub(crate) priority_group: BTreeSet<PriorityGroup>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SeedLabel {
    File,
    Sample,
}

impl From<SeedSource> for SeedLabel {
    fn from(value: SeedSource) -> Self {
        match value {
            SeedSource::File => SeedLabel::File,
            SeedSource::Sample => SeedLabel::Sample,
        }
    }
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let json = args.json;
    let seed = match args.channel_groups.clone() {
        Some(path) => SeedConfig {
            channel_groups_csv: Some(path),
        },
        None => AppConfig::load()?.seed,
    };

    let report = classify_with_seed(&args, &seed)?;
    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("{rendered}");
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

pub(crate) fn classify_with_seed(
    args: &ClassifyArgs,
    seed: &SeedConfig,
) -> Result<ClassificationReport, AppError> {
    let store = Arc::new(ChannelGroupStore::default());
    let (count, source) = load_channel_groups_from(seed, store.as_ref())?;

    let amplify_type = AmplifyType::from(args.amplify_type);
    let question = Question {
        id: None,
        role_id: EntityId(args.role),
        invitee_id: EntityId(args.invitee),
        scale_id: EntityId(args.scale),
        amplify_type,
        content: None,
    };

    let classifier = EventClassifier::new(store);
    let mut event = Event::new("command line event", question);
    let points = classifier.classify_with_points(&mut event)?;

    Ok(ClassificationReport {
        seed_source: source.into(),
        channel_groups: count,
        role_points: points.role,
        invitee_points: points.invitee,
        scale_points: points.scale,
        total_points: points.total(),
        amplify_type,
        event_level: event.event_level,
        event_status: event.event_status,
        priority_group: event.priority_group,
    })
}

fn render_report(report: &ClassificationReport) -> String {
    let groups = report
        .priority_group
        .iter()
        .map(|group| format!("{group:?}").to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(", ");
    let source = match report.seed_source {
        SeedLabel::File => "seed file",
        SeedLabel::Sample => "sample data",
    };

    format!(
        "Channel groups: {} ({})\n\
         Points: role {} + invitee {} + scale {} = {}\n\
         Level: {}\n\
         Status: {}\n\
         Priority groups: {}\n",
        report.channel_groups,
        source,
        report.role_points,
        report.invitee_points,
        report.scale_points,
        report.total_points,
        report.event_level.map_or("-", EventLevel::label),
        report.event_status.map_or("-", EventStatus::label),
        groups,
    )
}
