use crate::commands::{print_json, Context};
use crate::error::{invalid_input, no_results};
use crate::util::resolve_offset;
use anyhow::Result;
use clap::Args;
use sift_config::LimitsConfig;
use sift_core::{parse_search, SearchParameters};
use tracing::debug;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Raw query, as typed into the search box (use `--` before a leading `-`)
    pub query: String,
    /// Seconds east of UTC copied into every record
    #[arg(long, allow_negative_numbers = true)]
    pub tz_offset: Option<i32>,
}

pub fn parse(ctx: &Context<'_>, args: ParseArgs) -> Result<()> {
    let limits = &ctx.config.limits;
    check_query_length(&args.query, limits)?;
    let offset = resolve_offset(args.tz_offset, ctx.config)?;

    let records = parse_search(&args.query, offset);
    debug!(records = records.len(), "query parsed");
    check_term_lengths(&records, limits)?;
    if records.is_empty() && limits.require_terms {
        return Err(no_results("query has no search terms or filters"));
    }

    if ctx.json {
        return print_json(&records);
    }

    if records.is_empty() {
        println!("no search records");
        return Ok(());
    }
    for record in &records {
        for line in describe(record) {
            println!("{line}");
        }
    }
    Ok(())
}

fn check_query_length(query: &str, limits: &LimitsConfig) -> Result<()> {
    let length = query.chars().count();
    if length > limits.max_query_length {
        return Err(invalid_input(format!(
            "query is {length} characters long; the limit is {}",
            limits.max_query_length
        )));
    }
    Ok(())
}

fn check_term_lengths(records: &[SearchParameters], limits: &LimitsConfig) -> Result<()> {
    let too_long = records
        .iter()
        .flat_map(|record| {
            record
                .terms
                .split_whitespace()
                .chain(record.excluded_terms.split_whitespace())
        })
        .find(|term| term.chars().count() > limits.max_term_length);
    match too_long {
        Some(term) => Err(invalid_input(format!(
            "search term {term:?} exceeds {} characters",
            limits.max_term_length
        ))),
        None => Ok(()),
    }
}

fn describe(record: &SearchParameters) -> Vec<String> {
    let mut lines = Vec::new();
    match record.terms_type {
        Some(kind) => lines.push(format!(
            "[{kind}] terms: {:?} excluded: {:?}",
            record.terms, record.excluded_terms
        )),
        None => lines.push("[filters only]".to_string()),
    }

    if let Some(post_type) = record.post_type {
        lines.push(format!("  post type: {post_type}"));
    }
    if let Some(user) = &record.user {
        lines.push(format!("  user: {user}"));
    }
    if let Some(parent) = &record.parent {
        lines.push(format!("  in question: {parent}"));
    }
    if !record.ids.is_empty() {
        let ids: Vec<&str> = record.ids.iter().map(|id| id.as_str()).collect();
        lines.push(format!("  ids: {}", ids.join(", ")));
    }
    if let Some(range) = format_range(record.min_votes, record.max_votes) {
        lines.push(format!("  votes: {range}"));
    }
    if let Some(range) = format_range(record.min_answers, record.max_answers) {
        lines.push(format!("  answers: {range}"));
    }
    if record.from_date.is_some() || record.to_date.is_some() {
        lines.push(format!(
            "  dates: {} .. {} (offset {}s)",
            record.from_date.as_deref().unwrap_or("*"),
            record.to_date.as_deref().unwrap_or("*"),
            record.time_zone_offset
        ));
    }
    lines
}

fn format_range(min: Option<i64>, max: Option<i64>) -> Option<String> {
    match (min, max) {
        (None, None) => None,
        (min, max) => Some(format!(
            "{} .. {}",
            min.map_or_else(|| "*".to_string(), |v| v.to_string()),
            max.map_or_else(|| "*".to_string(), |v| v.to_string())
        )),
    }
}
