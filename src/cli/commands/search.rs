use crate::cache::SnapshotCache;
use crate::cli::args::{KeywordArgs, OutputFormat, SearchArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::search::{SearchEngine, SearchFields, SearchQuery};

/// Handle the search command
pub fn search(config: &Config, args: &SearchArgs, format: OutputFormat) -> Result<String> {
    let query = SearchQuery::new(args.phrase.trim())
        .case_sensitive(args.case_sensitive)
        .with_fields(SearchFields {
            title: !args.no_title,
            keywords: !args.no_keywords,
            description: !args.no_description,
        });
    run(config, &query, format)
}

/// Handle the keyword command
pub fn keyword(config: &Config, args: &KeywordArgs, format: OutputFormat) -> Result<String> {
    run(config, &SearchQuery::keyword(args.keyword.trim()), format)
}

fn run(config: &Config, query: &SearchQuery, format: OutputFormat) -> Result<String> {
    let cache = SnapshotCache::new(config);
    let results = SearchEngine::new(&cache).search(query)?;
    output::format_search(&query.phrase, &results, format)
}
