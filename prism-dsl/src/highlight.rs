//! Highlighting options for a search request
//!
//! The same [`Highlight`] type is used for the top-level options and for the
//! per-field overrides under `"fields"`.

use crate::node::Node;
use crate::value::{put, strings, vocabulary, Map};
use serde_json::Value;

vocabulary! {
    pub enum HighlighterType ("highlighter type") {
        Unified => "unified",
        Plain => "plain",
        Fvh => "fvh",
    }
}

vocabulary! {
    pub enum BoundaryScanner ("boundary scanner") {
        Chars => "chars",
        Sentence => "sentence",
        Word => "word",
    }
}

vocabulary! {
    pub enum HighlightEncoder ("highlight encoder") {
        Default => "default",
        Html => "html",
    }
}

vocabulary! {
    pub enum Fragmenter ("fragmenter") {
        Simple => "simple",
        Span => "span",
    }
}

vocabulary! {
    /// Fragment ordering
    pub enum HighlightOrder ("highlight order") {
        None => "none",
        Score => "score",
    }
}

vocabulary! {
    pub enum TagsSchema ("tags schema") {
        Styled => "styled",
    }
}

#[derive(Debug, Default)]
pub struct Highlight {
    pre_tags: Vec<String>,
    post_tags: Vec<String>,
    fields: Vec<(String, Highlight)>,
    fragment_size: Option<u16>,
    number_of_fragments: Option<u16>,
    highlighter: Option<HighlighterType>,
    boundary_chars: Option<String>,
    boundary_max_scan: Option<u16>,
    boundary_scanner: Option<BoundaryScanner>,
    boundary_scanner_locale: Option<String>,
    encoder: Option<HighlightEncoder>,
    force_source: Option<bool>,
    fragmenter: Option<Fragmenter>,
    fragment_offset: Option<u16>,
    query: Option<Box<dyn Node>>,
    matched_fields: Vec<String>,
    no_match_size: Option<u16>,
    order: Option<HighlightOrder>,
    phrase_limit: Option<u16>,
    require_field_match: Option<bool>,
    tags_schema: Option<TagsSchema>,
}

impl Highlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight `name` with the top-level options
    pub fn field(self, name: impl Into<String>) -> Self {
        self.field_with(name, Highlight::new())
    }

    /// Highlight `name` with per-field overrides
    pub fn field_with(mut self, name: impl Into<String>, options: Highlight) -> Self {
        self.fields.push((name.into(), options));
        self
    }

    pub fn pre_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pre_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn post_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.post_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn fragment_size(mut self, size: u16) -> Self {
        self.fragment_size = Some(size);
        self
    }

    pub fn number_of_fragments(mut self, count: u16) -> Self {
        self.number_of_fragments = Some(count);
        self
    }

    /// Emitted as `"type"`
    pub fn highlighter(mut self, highlighter: HighlighterType) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    pub fn boundary_chars(mut self, chars: impl Into<String>) -> Self {
        self.boundary_chars = Some(chars.into());
        self
    }

    pub fn boundary_max_scan(mut self, max: u16) -> Self {
        self.boundary_max_scan = Some(max);
        self
    }

    pub fn boundary_scanner(mut self, scanner: BoundaryScanner) -> Self {
        self.boundary_scanner = Some(scanner);
        self
    }

    pub fn boundary_scanner_locale(mut self, locale: impl Into<String>) -> Self {
        self.boundary_scanner_locale = Some(locale.into());
        self
    }

    pub fn encoder(mut self, encoder: HighlightEncoder) -> Self {
        self.encoder = Some(encoder);
        self
    }

    pub fn force_source(mut self, force: bool) -> Self {
        self.force_source = Some(force);
        self
    }

    pub fn fragmenter(mut self, fragmenter: Fragmenter) -> Self {
        self.fragmenter = Some(fragmenter);
        self
    }

    pub fn fragment_offset(mut self, offset: u16) -> Self {
        self.fragment_offset = Some(offset);
        self
    }

    /// Highlight matches of this query instead of the search query
    pub fn query(mut self, query: impl Node + 'static) -> Self {
        self.query = Some(Box::new(query));
        self
    }

    pub fn matched_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matched_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn no_match_size(mut self, size: u16) -> Self {
        self.no_match_size = Some(size);
        self
    }

    pub fn order(mut self, order: HighlightOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn phrase_limit(mut self, limit: u16) -> Self {
        self.phrase_limit = Some(limit);
        self
    }

    pub fn require_field_match(mut self, require: bool) -> Self {
        self.require_field_match = Some(require);
        self
    }

    pub fn tags_schema(mut self, schema: TagsSchema) -> Self {
        self.tags_schema = Some(schema);
        self
    }

    /// The options object itself; it sits under `"highlight"` in a search
    /// and under the field name inside `"fields"`.
    pub fn to_map(&self) -> Map {
        let mut map = Map::new();
        for (key, list) in [
            ("pre_tags", &self.pre_tags),
            ("post_tags", &self.post_tags),
            ("matched_fields", &self.matched_fields),
        ] {
            if !list.is_empty() {
                map.insert(key.to_string(), strings(list));
            }
        }
        if !self.fields.is_empty() {
            let fields: Map = self
                .fields
                .iter()
                .map(|(name, opts)| (name.clone(), Value::Object(opts.to_map())))
                .collect();
            map.insert("fields".to_string(), fields.into());
        }
        put(&mut map, "fragment_size", self.fragment_size);
        put(&mut map, "number_of_fragments", self.number_of_fragments);
        put(&mut map, "type", self.highlighter);
        put(&mut map, "boundary_chars", self.boundary_chars.clone());
        put(&mut map, "boundary_max_scan", self.boundary_max_scan);
        put(&mut map, "boundary_scanner", self.boundary_scanner);
        put(&mut map, "boundary_scanner_locale", self.boundary_scanner_locale.clone());
        put(&mut map, "encoder", self.encoder);
        put(&mut map, "force_source", self.force_source);
        put(&mut map, "fragmenter", self.fragmenter);
        put(&mut map, "fragment_offset", self.fragment_offset);
        put(&mut map, "query", self.query.as_ref().map(|q| q.produce()));
        put(&mut map, "no_match_size", self.no_match_size);
        put(&mut map, "order", self.order);
        put(&mut map, "phrase_limit", self.phrase_limit);
        put(&mut map, "require_field_match", self.require_field_match);
        put(&mut map, "tags_schema", self.tags_schema);
        map
    }
}
