use crate::commands::{print_json, Context};
use crate::util::{format_millis, resolve_offset};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use sift_core::time::{now_millis, parse_search_date, resolve_date_range};
use sift_core::SearchParameters;
use tracing::warn;

#[derive(Debug, Args)]
pub struct DatesArgs {
    /// Start date (YYYY-M-D); the epoch when absent or unparsable
    #[arg(long)]
    pub from: Option<String>,
    /// End date (YYYY-M-D); now when absent or unparsable
    #[arg(long)]
    pub to: Option<String>,
    /// Seconds east of UTC
    #[arg(long, allow_negative_numbers = true)]
    pub tz_offset: Option<i32>,
}

#[derive(Debug, Serialize)]
struct DateRangeDto {
    start: i64,
    end: i64,
}

pub fn dates(ctx: &Context<'_>, args: DatesArgs) -> Result<()> {
    let offset = resolve_offset(args.tz_offset, ctx.config)?;
    for (label, raw) in [("from", &args.from), ("to", &args.to)] {
        if let Some(raw) = raw {
            if let Err(err) = parse_search_date(raw) {
                warn!(date = %raw, error = %err, "unparsable {label} date, using fallback");
            }
        }
    }

    let params = SearchParameters {
        from_date: args.from,
        to_date: args.to,
        time_zone_offset: offset,
        ..SearchParameters::default()
    };
    let range = resolve_date_range(&params, now_millis());

    if ctx.json {
        return print_json(&DateRangeDto {
            start: range.start,
            end: range.end,
        });
    }

    println!("start: {} ({})", range.start, format_millis(range.start));
    println!("end: {} ({})", range.end, format_millis(range.end));
    Ok(())
}
