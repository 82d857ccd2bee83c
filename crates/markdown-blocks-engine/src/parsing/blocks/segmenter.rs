use std::iter::Peekable;

use xi_rope::Rope;

use crate::parsing::options::ParseOptions;
use crate::parsing::rope::lines_with_spans;

use super::{BlockBuilder, LineClass, MarkdownLineClassifier, RawSpan};

/// Splits a rope into raw block spans.
///
/// The segmenter itself holds no progress; [`Segmenter::spans`] hands out a
/// fresh lazy iterator each time, so a pass can be restarted at will.
#[derive(Clone, Copy)]
pub struct Segmenter<'a> {
    rope: &'a Rope,
    options: ParseOptions,
}

impl<'a> Segmenter<'a> {
    pub fn new(rope: &'a Rope, options: ParseOptions) -> Self {
        Self { rope, options }
    }

    /// A lazy, single-pass iterator over the rope's block spans.
    pub fn spans(&self) -> Segments<'a> {
        let classified: Box<dyn Iterator<Item = LineClass> + 'a> = Box::new(
            lines_with_spans(self.rope).map(|lr| MarkdownLineClassifier.classify(&lr)),
        );
        Segments {
            lines: classified.peekable(),
            builder: BlockBuilder::new(self.options.quote_continuation),
            done: false,
        }
    }
}

impl<'a> IntoIterator for &Segmenter<'a> {
    type Item = RawSpan;
    type IntoIter = Segments<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans()
    }
}

/// Lazy iterator of [`RawSpan`]s; pulls lines only as far as needed.
pub struct Segments<'a> {
    lines: Peekable<Box<dyn Iterator<Item = LineClass> + 'a>>,
    builder: BlockBuilder,
    done: bool,
}

impl Iterator for Segments<'_> {
    type Item = RawSpan;

    fn next(&mut self) -> Option<RawSpan> {
        loop {
            if let Some(span) = self.builder.pop() {
                return Some(span);
            }
            if self.done {
                return None;
            }
            match self.lines.next() {
                Some(line) => {
                    let next = self.lines.peek();
                    self.builder.push(&line, next);
                }
                None => {
                    self.builder.finish();
                    self.done = true;
                }
            }
        }
    }
}
