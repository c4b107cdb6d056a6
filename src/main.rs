use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use bellcheck::calendar_data::load_calendars;
use bellcheck::cli::{parse_args, print_help};
use bellcheck::clock::{parse_datetime, Clock, FixedClock, OffsetClock, SystemClock};
use bellcheck::config::{Config, ExtraPeriodsWatch};
use bellcheck::datetime::timestring;
use bellcheck::extra_periods::ExtraPeriods;
use bellcheck::selection::CalendarSet;
use bellcheck::status::Status;
use bellcheck::ticker::run_ticker;

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args();

    if args.help {
        print_help();
        return Ok(());
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bellcheck=info".parse()?),
        )
        .init();

    info!("bellcheck v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded");
    info!("  Calendar: {}", config.calendar_path.display());
    if let Some(path) = &config.extra_periods_path {
        info!("  Extra periods file: {}", path.display());
    }
    if config.clock_offset_secs != 0 {
        info!("  Clock offset: {}s", config.clock_offset_secs);
    }

    // Handle --validate mode
    if args.validate {
        info!("Validating configuration...");
        let result = config.validate().and_then(|()| {
            load_calendars(&config.calendar_path)
                .map(|years| info!("  {} academic year(s) defined", years.len()))
                .context("Calendar data is invalid")
        });
        match result {
            Ok(()) => {
                info!("Configuration is valid");
                return Ok(());
            }
            Err(e) => {
                error!("{:#}", e);
                std::process::exit(1);
            }
        }
    }

    let years = load_calendars(&config.calendar_path).with_context(|| {
        format!("Failed to load calendar {}", config.calendar_path.display())
    })?;
    let set = CalendarSet::new(years);
    if set.is_empty() {
        warn!("Calendar has no academic years; nothing will resolve");
    }

    let clock: Box<dyn Clock> = match &args.at {
        Some(at) => Box::new(FixedClock(parse_datetime(at).map_err(anyhow::Error::msg)?)),
        None if config.clock_offset_secs != 0 => {
            Box::new(OffsetClock::new(SystemClock, config.clock_offset()))
        }
        None => Box::new(SystemClock),
    };

    let mut watch = ExtraPeriodsWatch::new(config.extra_periods);
    let extras = config.refresh_extra_periods(&mut watch);

    if args.list {
        list_periods(&set, &extras, &*clock);
        return Ok(());
    }

    if args.once {
        println!("{}", Status::at(&set, &extras, clock.now()));
        return Ok(());
    }

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, shutting down");
                cancel.cancel();
            }
        });
    }

    let mut current: Option<String> = None;
    run_ticker(&*clock, cancel, |now| {
        let extras = config.refresh_extra_periods(&mut watch);
        let status = Status::at(&set, &extras, now);

        if current.as_deref() != Some(status.name()) {
            match &status.period {
                Some(p) => info!("Now: {} ({} - {})", p.name, timestring(p.start), timestring(p.end)),
                None => info!("Now: {}", status.name()),
            }
            current = Some(status.name().to_string());
        }

        println!("{}", status);
    })
    .await;

    Ok(())
}

fn list_periods(set: &CalendarSet, extras: &ExtraPeriods, clock: &dyn Clock) {
    let now = clock.now();
    let calendar = set
        .calendars(extras)
        .find(|c| c.within_year(now))
        .or_else(|| set.next_calendar(now, extras));

    let Some(calendar) = calendar else {
        println!("No upcoming school days");
        return;
    };

    let day = calendar.current_or_next_day(now);
    println!("{} ({})", day.format("%A %Y-%m-%d"), calendar.name());
    for period in calendar.periods_for(day) {
        println!(
            "  {} - {}  {}",
            timestring(period.start),
            timestring(period.end),
            period.name
        );
    }
}
