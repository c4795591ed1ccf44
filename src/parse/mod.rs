//! HTML parsing and head extraction.
//!
//! This module locates the elements of interest inside `<head>`:
//! - the page `<title>`
//! - the favicon `<link>` (any `rel` containing the literal substring `icon`)
//! - the five geo meta tags (`geo.position`, `geo.region`, `geo.placename`,
//!   `ICBM`, `DC.title`)
//!
//! All parsing is done using CSS selectors via the `scraper` crate.

mod head;

pub(crate) use head::{extract_head_tags, HeadTags, TagHandle};
