//! Template persistence adapters.
//!
//! Both stores share the same read rules: rows that satisfy
//! [`TemplateQuery::matches`], newest first, sliced by the page window.

mod json_file;
mod memory;

use std::collections::{BTreeMap, BTreeSet};

use popcat_core::domain::{PageRequest, ScopeFilter, Template, TemplateId, TemplateQuery};

pub use json_file::JsonFileTemplateStore;
pub use memory::InMemoryTemplateStore;

type Rows = BTreeMap<TemplateId, Template>;

fn window_bounds(window: PageRequest) -> (usize, usize) {
    let offset = usize::try_from(window.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(window.limit()).unwrap_or(usize::MAX);
    (offset, limit)
}

fn select_page(rows: &Rows, query: &TemplateQuery, window: PageRequest) -> Vec<Template> {
    let (offset, limit) = window_bounds(window);
    rows.values()
        .rev()
        .filter(|template| query.matches(template))
        .skip(offset)
        .take(limit)
        .cloned()
        .collect()
}

fn count(rows: &Rows, query: &TemplateQuery) -> u64 {
    rows.values().filter(|template| query.matches(template)).count() as u64
}

fn distinct_categories(rows: &Rows, scope: &ScopeFilter) -> Vec<String> {
    rows.values()
        .filter(|template| scope.matches(template))
        .filter_map(|template| template.category.big().map(str::to_string))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
