//! Text-offset selectors for the linked convention
//!
//! Offsets are character (Unicode scalar) indices, matching what the
//! annotation service reports. Every window is clamped to the text, so no
//! annotation position can produce an out-of-range slice.

use nex_core::{vocab, Graph, Iri, Literal};

/// Length of the document head and tail windows
pub const HEAD_TAIL_WINDOW: usize = 200;

/// Length of the before/after windows around a mention
pub const PREFIX_SUFFIX_WINDOW: usize = 10;

/// RFC 5147 IRI selecting the whole document
pub fn context_uri(source: &Iri) -> Iri {
    Iri::new(format!("{source}#char=0"))
}

/// RFC 5147 IRI selecting `[start, end)`
pub fn selector_uri(source: &Iri, start: usize, end: usize) -> Iri {
    Iri::new(format!("{source}#char={start},{end}"))
}

/// Span of source text one annotation refers to, with its context windows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub uri: Iri,
    pub begin: usize,
    pub end: usize,
    pub anchor: String,
    pub head: String,
    pub tail: String,
    pub before: String,
    pub after: String,
    pub context: Iri,
}

impl Selector {
    /// Compute the selector for `[start, end)` of `text`
    ///
    /// The tail window is always the last [`HEAD_TAIL_WINDOW`] characters of
    /// the whole document, independent of the mention's position.
    pub fn build(
        source: &Iri,
        context: &Iri,
        text: &str,
        start: usize,
        end: usize,
        anchor: &str,
    ) -> Self {
        let len = text.chars().count();
        let end_clamped = end.min(len);
        let start_clamped = start.min(end_clamped);

        Self {
            uri: selector_uri(source, start, end),
            begin: start,
            end,
            anchor: anchor.to_string(),
            head: slice_chars(text, 0, HEAD_TAIL_WINDOW).to_string(),
            tail: slice_chars(text, len.saturating_sub(HEAD_TAIL_WINDOW), len).to_string(),
            before: slice_chars(
                text,
                start_clamped.saturating_sub(PREFIX_SUFFIX_WINDOW),
                start_clamped,
            )
            .to_string(),
            after: slice_chars(
                text,
                end_clamped,
                end_clamped.saturating_add(PREFIX_SUFFIX_WINDOW),
            )
            .to_string(),
            context: context.clone(),
        }
    }

    /// Emit the selector node
    pub fn write(&self, graph: &mut Graph) {
        let offset = |value: usize| Literal::int(i64::try_from(value).unwrap_or(i64::MAX));

        graph.add(&self.uri, &vocab::RDF_TYPE, &vocab::NIF_STRING);
        graph.add(&self.uri, &vocab::RDF_TYPE, &vocab::NIF_RFC5147_STRING);
        graph.add(&self.uri, &vocab::NIF_BEGIN_INDEX, offset(self.begin));
        graph.add(&self.uri, &vocab::NIF_END_INDEX, offset(self.end));
        graph.add(&self.uri, &vocab::NIF_ANCHOR_OF, Literal::string(&self.anchor));
        graph.add(&self.uri, &vocab::NIF_HEAD, Literal::string(&self.head));
        graph.add(&self.uri, &vocab::NIF_TAIL, Literal::string(&self.tail));
        graph.add(&self.uri, &vocab::NIF_BEFORE, Literal::string(&self.before));
        graph.add(&self.uri, &vocab::NIF_AFTER, Literal::string(&self.after));
        graph.add(&self.uri, &vocab::NIF_REFERENCE_CONTEXT, &self.context);
    }
}

/// Emit the context node for the whole document and return its IRI
pub fn write_context(source: &Iri, graph: &mut Graph) -> Iri {
    let context = context_uri(source);
    graph.add(&context, &vocab::RDF_TYPE, &vocab::NIF_CONTEXT);
    graph.add(&context, &vocab::RDF_TYPE, &vocab::NIF_RFC5147_STRING);
    graph.add(&context, &vocab::NIF_SOURCE_URL, source);
    context
}

/// Characters `[start, end)` of `text`, clamped to its length
pub fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let from = byte_offset(text, start);
    let to = byte_offset(text, end.max(start));
    &text[from..to]
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(index, _)| index)
}
