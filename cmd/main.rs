use clap::Parser;

use zone_syncer::error::Result;
use zone_syncer::fetcher::AxfrFetcher;
use zone_syncer::provider::Pdns;
use zone_syncer::sync::{NoProgress, Progress, SyncJob, SyncOptions, Syncer};

mod config;

#[derive(Parser)]
#[clap(about = "Mirror zones from an authoritative DNS server into hosted zones")]
struct Args {
    #[clap(short, long)]
    config: String,

    /// Report each pipeline step on stdout.
    #[clap(short, long)]
    verbose: bool,
}

struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn transfer_started(&self, server: &str, domain: &str) {
        println!("transferring {} from {}", domain, server);
    }

    fn transfer_finished(&self, owner_count: usize) {
        println!("transfer done, {} owner name(s)", owner_count);
    }

    fn aggregated(&self, record_sets: usize) {
        println!("{} record set(s) to submit", record_sets);
    }

    fn batch_submitted(&self, batch: usize, size: usize) {
        println!("batch {} submitted, {} change(s)", batch, size);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args).await {
        eprintln!("zone-syncer: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<()> {
    let cfg = config::Parser::parse_yaml(&args.config)?;

    // Every zone's record types are validated before the first network
    // round trip.
    let jobs: Vec<SyncJob> = cfg
        .zones
        .into_iter()
        .map(config::CfgZone::into_sync_job)
        .collect::<Result<_>>()?;

    let provider = Pdns::from_cfg(cfg.provider.try_into()?)?;
    let fetcher = AxfrFetcher;
    let opts = SyncOptions {
        max_batch_size: cfg.max_batch_size,
    };
    let syncer = Syncer::new(&fetcher, &provider, opts);

    let progress: Box<dyn Progress> = if args.verbose {
        Box::new(ConsoleProgress)
    } else {
        Box::new(NoProgress)
    };

    for job in &jobs {
        syncer.run(job, progress.as_ref()).await?;
    }

    Ok(())
}
