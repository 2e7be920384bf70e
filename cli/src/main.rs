//! econodoc CLI - scheduled ingestion jobs for Korean economic data.
//!
//! One subcommand per job. Every run ends with a notification on the
//! configured channel; errors additionally exit non-zero so the external
//! scheduler registers the failure.

mod bok;
mod jobs;
mod services;

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use econodoc::series::Cycle;
use econodoc::{JobReport, JobStatus, Notifier, Result, Severity};
use reqwest::blocking::Client;

use jobs::ecos::EcosJob;
use jobs::krx::KrxJob;
use jobs::policy::{PolicySubmitJob, PolicyVariant};
use jobs::reb::RebJob;
use jobs::results::PolicyResultsJob;
use services::{FileStatusStore, LocalObjectStore, OpenAiBatchClient, SlackNotifier};

#[derive(Parser)]
#[command(name = "econodoc")]
#[command(version)]
#[command(about = "Run scheduled ingestion jobs for Korean economic data", long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CommonArgs {
    /// Root directory of the local object store
    #[arg(long, env = "ECONODOC_DATA_DIR", default_value = "data", global = true)]
    data_dir: PathBuf,

    /// Status table file for submitted batches
    #[arg(
        long,
        env = "ECONODOC_STATUS_FILE",
        default_value = "data/status.json",
        global = true
    )]
    status_file: PathBuf,

    /// Slack incoming webhook URL (notifications disabled when unset)
    #[arg(long, env = "SLACK_WEBHOOK_URL", global = true)]
    slack_webhook_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest an ECOS statistic series
    Ecos {
        /// ECOS API key
        #[arg(long, env = "ECOS_API_KEY")]
        api_key: String,

        /// Statistic table code
        #[arg(long, env = "STAT_CODE")]
        stat_code: String,

        /// Observation cycle
        #[arg(long, env = "CYCLE", value_enum)]
        cycle: CycleArg,

        /// First-level item code
        #[arg(long, env = "ITEM_CODE", default_value = "")]
        item_code: String,

        /// Second-level item code
        #[arg(long, env = "ITEM_CODE2")]
        item_code2: Option<String>,

        /// Object key the series is stored under
        #[arg(long, env = "OUTPUT_KEY")]
        output_key: String,
    },

    /// Update the previous month's index close price
    Krx {
        /// KRX API key
        #[arg(long, env = "KRX_API_KEY")]
        api_key: String,

        /// Index endpoint name
        #[arg(long, env = "INDEX_TYPE")]
        index_type: String,

        /// Object key of the existing stored series
        #[arg(long, env = "OUTPUT_KEY")]
        output_key: String,
    },

    /// Ingest a REB statistics table
    Reb {
        /// REB API key
        #[arg(long, env = "REB_API_KEY")]
        api_key: String,

        /// Statistics table identifier
        #[arg(long, env = "STATBL_ID")]
        statbl_id: String,

        /// Classification identifier
        #[arg(long, env = "CLS_ID")]
        cls_id: String,

        /// Group identifier
        #[arg(long, env = "GRP_ID")]
        grp_id: Option<String>,

        /// Item identifier
        #[arg(long, env = "ITM_ID")]
        itm_id: Option<String>,

        /// Object key the series is stored under
        #[arg(long, env = "OUTPUT_KEY")]
        output_key: String,
    },

    /// Submit a monetary-policy summarization batch
    PolicySubmit {
        /// Document variant
        #[arg(value_enum)]
        variant: VariantArg,

        /// BOK release page URL
        #[arg(long, env = "BOK_PAGE_URL")]
        page_url: String,

        /// OpenAI API key
        #[arg(long, env = "OPENAI_API_KEY")]
        openai_api_key: String,
    },

    /// Retrieve completed batches and publish summaries
    PolicyResults {
        /// OpenAI API key
        #[arg(long, env = "OPENAI_API_KEY")]
        openai_api_key: String,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CycleArg {
    /// Monthly series
    #[value(alias = "M")]
    M,
    /// Quarterly series
    #[value(alias = "Q")]
    Q,
}

impl From<CycleArg> for Cycle {
    fn from(arg: CycleArg) -> Self {
        match arg {
            CycleArg::M => Cycle::Monthly,
            CycleArg::Q => Cycle::Quarterly,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    /// Policy decision report
    Decision,
    /// Policy issue report
    Issue,
}

impl From<VariantArg> for PolicyVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Decision => PolicyVariant::decision(),
            VariantArg::Issue => PolicyVariant::issue(),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let notifier = SlackNotifier::new(cli.common.slack_webhook_url.clone());

    let (service, result) = run_command(&cli.common, cli.command);

    match result {
        Ok(report) => {
            let severity = match report.status {
                JobStatus::Success => Severity::Success,
                JobStatus::NoData => Severity::NoData,
            };
            notifier.notify(&service, &report.to_message(), severity);
            println!("{} {}", "OK".green().bold(), report.to_message());
        }
        Err(e) => {
            notifier.notify(&service, &e.to_string(), Severity::Error);
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_default()
}

fn run_command(common: &CommonArgs, command: Commands) -> (String, Result<JobReport>) {
    let store = LocalObjectStore::new(&common.data_dir);
    let status_store = FileStatusStore::new(&common.status_file);
    let today = Utc::now().date_naive();

    match command {
        Commands::Ecos {
            api_key,
            stat_code,
            cycle,
            item_code,
            item_code2,
            output_key,
        } => {
            let service = format!("ECOS | {}", output_key);
            let job = EcosJob {
                api_key,
                stat_code,
                cycle: cycle.into(),
                item_code,
                item_code2,
                output_key,
            };
            (service, job.run(&http_client(), &store))
        }

        Commands::Krx {
            api_key,
            index_type,
            output_key,
        } => {
            let service = format!("KRX | {}", output_key);
            let job = KrxJob {
                api_key,
                index_type,
                output_key,
            };
            (service, job.run(&http_client(), &store))
        }

        Commands::Reb {
            api_key,
            statbl_id,
            cls_id,
            grp_id,
            itm_id,
            output_key,
        } => {
            let service = format!("REB | {}", output_key);
            let job = RebJob {
                api_key,
                statbl_id,
                cls_id,
                grp_id,
                itm_id,
                output_key,
            };
            (service, job.run(&http_client(), &store))
        }

        Commands::PolicySubmit {
            variant,
            page_url,
            openai_api_key,
        } => {
            let variant: PolicyVariant = variant.into();
            let service = format!("BOK | {} batch", variant.doc_type);
            let inference = OpenAiBatchClient::new(openai_api_key);
            let job = PolicySubmitJob { variant, page_url };
            (
                service,
                job.run(today, &http_client(), &status_store, &inference),
            )
        }

        Commands::PolicyResults { openai_api_key } => {
            let inference = OpenAiBatchClient::new(openai_api_key);
            let job = PolicyResultsJob;
            (
                "BOK | batch results".to_string(),
                job.run(today, &store, &status_store, &inference),
            )
        }
    }
}
