use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use sift_core::search::{classify_words, extract_flags, split_words, Flag, SearchWord, TermBuckets};

#[derive(Debug, Args)]
pub struct ExplainArgs {
    /// Raw query, as typed into the search box (use `--` before a leading `-`)
    pub query: String,
}

#[derive(Debug, Serialize)]
struct ExplainDto<'a> {
    tokens: Vec<&'a str>,
    flags: Vec<Flag>,
    words: Vec<SearchWord>,
    buckets: TermBuckets,
}

pub fn explain(ctx: &Context<'_>, args: ExplainArgs) -> Result<()> {
    let tokens = split_words(&args.query);
    let (words, flags) = extract_flags(&tokens);
    let buckets = classify_words(&words);
    let dto = ExplainDto {
        tokens,
        flags,
        words,
        buckets,
    };

    if ctx.json {
        return print_json(&dto);
    }

    println!("tokens: {:?}", dto.tokens);
    if dto.flags.is_empty() {
        println!("flags: none");
    } else {
        println!("flags:");
        for flag in &dto.flags {
            let sign = if flag.excluded { "-" } else { "" };
            println!("  {sign}{}: {:?}", flag.name, flag.value);
        }
    }
    if dto.words.is_empty() {
        println!("words: none");
    } else {
        println!("words:");
        for word in &dto.words {
            let sign = if word.excluded { "-" } else { "" };
            println!("  {sign}{:?}", word.value);
        }
    }
    println!("plain: {:?}", dto.buckets.plain);
    println!("excluded plain: {:?}", dto.buckets.excluded_plain);
    println!("tags: {:?}", dto.buckets.tags);
    println!("excluded tags: {:?}", dto.buckets.excluded_tags);
    Ok(())
}
