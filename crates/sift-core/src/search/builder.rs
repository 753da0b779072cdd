use crate::domain::{PostId, UserId};
use crate::search::flags::{Flag, FlagName};
use crate::search::params::{PostType, SearchParameters, TermsType};
use crate::search::terms::{push_term, TermBuckets};
use tracing::debug;

#[derive(Debug, Default)]
struct FieldTerms {
    title: String,
    excluded_title: String,
    body: String,
    excluded_body: String,
}

impl FieldTerms {
    fn push(&mut self, flag: &Flag) {
        let bucket = match (flag.name, flag.excluded) {
            (FlagName::Title, false) => &mut self.title,
            (FlagName::Title, true) => &mut self.excluded_title,
            (FlagName::Body, false) => &mut self.body,
            (FlagName::Body, true) => &mut self.excluded_body,
            _ => return,
        };
        push_term(bucket, &flag.value);
    }

    fn has_title(&self) -> bool {
        !self.title.is_empty() || !self.excluded_title.is_empty()
    }

    fn has_body(&self) -> bool {
        !self.body.is_empty() || !self.excluded_body.is_empty()
    }
}

/// Records come out in the order plain, tag, body, title.
pub fn build_parameters(
    flags: &[Flag],
    buckets: &TermBuckets,
    time_zone_offset: i32,
) -> Vec<SearchParameters> {
    let mut base = SearchParameters {
        time_zone_offset,
        ..SearchParameters::default()
    };
    let mut fields = FieldTerms::default();

    for flag in flags {
        match flag.name {
            FlagName::Title | FlagName::Body => fields.push(flag),
            _ if flag.excluded => dropped(flag, "filter flags cannot be excluded"),
            _ => apply_filter(&mut base, flag),
        }
    }

    if buckets.has_tags()
        || fields.has_title()
        || base.min_answers.is_some()
        || base.max_answers.is_some()
    {
        base.post_type = Some(PostType::Question);
    }

    if base.post_type == Some(PostType::Question) {
        base.ids.extend(base.parent.clone());
    }

    let mut records = Vec::new();
    if buckets.has_plain() {
        records.push(base.with_terms(TermsType::Plain, &buckets.plain, &buckets.excluded_plain));
    }
    if buckets.has_tags() {
        records.push(base.with_terms(TermsType::Tag, &buckets.tags, &buckets.excluded_tags));
    }
    if fields.has_body() {
        records.push(base.with_terms(TermsType::Body, &fields.body, &fields.excluded_body));
    }
    if fields.has_title() {
        records.push(base.with_terms(TermsType::Title, &fields.title, &fields.excluded_title));
    }

    if records.is_empty() && base.has_scalar_filters() {
        records.push(base);
    }
    records
}

fn apply_filter(params: &mut SearchParameters, flag: &Flag) {
    let value = flag.value.as_str();
    match flag.name {
        FlagName::Is => match PostType::parse(value) {
            Some(post_type) => params.post_type = Some(post_type),
            None => dropped(flag, "expected question or answer"),
        },
        FlagName::User => match value.parse::<UserId>() {
            Ok(user) => params.user = Some(user),
            Err(_) => dropped(flag, "not an id"),
        },
        FlagName::InQuestion => match value.parse::<PostId>() {
            Ok(parent) => params.parent = Some(parent),
            Err(_) => dropped(flag, "not an id"),
        },
        FlagName::MinVotes => set_count(&mut params.min_votes, flag),
        FlagName::MaxVotes => set_count(&mut params.max_votes, flag),
        FlagName::MinAnswers => set_count(&mut params.min_answers, flag),
        FlagName::MaxAnswers => set_count(&mut params.max_answers, flag),
        FlagName::From => params.from_date = Some(value.to_string()),
        FlagName::To => params.to_date = Some(value.to_string()),
        FlagName::Title | FlagName::Body => {}
    }
}

fn set_count(slot: &mut Option<i64>, flag: &Flag) {
    match flag.value.parse::<i64>() {
        Ok(count) => *slot = Some(count),
        Err(_) => dropped(flag, "not an integer"),
    }
}

fn dropped(flag: &Flag, reason: &str) {
    debug!(flag = %flag.name, value = %flag.value, reason, "search flag dropped");
}
