//! The markdown subset used in assistant replies.
//!
//! Replies are parsed once into a small block model and then drawn with egui.
//! Paragraphs, lists, headings (levels 1 to 3), emphasis, code and links are
//! understood. Images, blockquotes and raw HTML are kept as literal text.

use std::collections::HashMap;

use eframe::egui::{self, Color32, RichText};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

const CODE_FILL: Color32 = Color32::from_rgb(229, 231, 235);
const LINK_COLOR: Color32 = Color32::from_rgb(37, 99, 235);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading { level: u8, content: Vec<Inline> },
    /// `start` is `Some` for ordered lists.
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    CodeBlock(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(Span),
    Break,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
    pub link: Option<String>,
}

enum Container {
    Blocks(Vec<Block>),
    Quote(Vec<Block>),
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
}

/// What a `Start` event opened, so the matching `End` knows what to close.
enum Open {
    Paragraph,
    Heading(u8),
    List,
    Item,
    Quote,
    Code,
    Strong,
    Emphasis,
    Link,
    Image(String),
    Other,
}

struct Builder {
    containers: Vec<Container>,
    inlines: Vec<Inline>,
    open: Vec<Open>,
    code: Option<String>,
    strong: usize,
    emphasis: usize,
    link: Option<String>,
}

impl Builder {
    fn new() -> Self {
        Self {
            containers: vec![Container::Blocks(Vec::new())],
            inlines: Vec::new(),
            open: Vec::new(),
            code: None,
            strong: 0,
            emphasis: 0,
            link: None,
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let open = match tag {
            Tag::Paragraph | Tag::HtmlBlock => {
                self.flush();
                Open::Paragraph
            }
            Tag::Heading { level, .. } => {
                self.flush();
                Open::Heading(heading_level(level))
            }
            Tag::List(start) => {
                self.flush();
                self.containers.push(Container::List {
                    start,
                    items: Vec::new(),
                });
                Open::List
            }
            Tag::Item => {
                self.flush();
                self.containers.push(Container::Blocks(Vec::new()));
                Open::Item
            }
            Tag::BlockQuote(..) => {
                self.flush();
                self.containers.push(Container::Quote(Vec::new()));
                Open::Quote
            }
            Tag::CodeBlock(_) => {
                self.flush();
                self.code = Some(String::new());
                Open::Code
            }
            Tag::Strong => {
                self.strong += 1;
                Open::Strong
            }
            Tag::Emphasis => {
                self.emphasis += 1;
                Open::Emphasis
            }
            Tag::Link { dest_url, .. } => {
                self.link = Some(dest_url.into_string());
                Open::Link
            }
            Tag::Image { dest_url, .. } => {
                self.push_text("![");
                Open::Image(dest_url.into_string())
            }
            _ => Open::Other,
        };
        self.open.push(open);
    }

    fn end(&mut self) {
        let Some(open) = self.open.pop() else {
            return;
        };
        match open {
            Open::Paragraph => self.flush(),
            Open::Heading(level) => {
                let content = std::mem::take(&mut self.inlines);
                self.push_block(Block::Heading { level, content });
            }
            Open::List => {
                self.flush();
                if let Some(Container::List { start, items }) = self.containers.pop() {
                    self.push_block(Block::List { start, items });
                }
            }
            Open::Item => {
                self.flush();
                if let Some(Container::Blocks(blocks)) = self.containers.pop() {
                    if let Some(Container::List { items, .. }) = self.containers.last_mut() {
                        items.push(blocks);
                    } else {
                        for block in blocks {
                            self.push_block(block);
                        }
                    }
                }
            }
            Open::Quote => {
                self.flush();
                if let Some(Container::Quote(blocks)) = self.containers.pop() {
                    for block in blocks {
                        self.push_block(quoted(block));
                    }
                }
            }
            Open::Code => {
                let mut code = self.code.take().unwrap_or_default();
                if code.ends_with('\n') {
                    code.pop();
                }
                self.push_block(Block::CodeBlock(code));
            }
            Open::Strong => self.strong = self.strong.saturating_sub(1),
            Open::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            Open::Link => self.link = None,
            Open::Image(dest) => self.push_text(&format!("]({dest})")),
            Open::Other => {}
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => match &mut self.code {
                Some(code) => code.push_str(&text),
                None => self.push_text(&text),
            },
            Event::Code(text) => {
                let span = Span {
                    code: true,
                    ..self.span(text.into_string())
                };
                self.inlines.push(Inline::Text(span));
            }
            Event::Html(html) | Event::InlineHtml(html) => self.push_text(&html),
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.inlines.push(Inline::Break),
            Event::Rule => {
                self.flush();
                self.push_text("---");
                self.flush();
            }
            _ => {}
        }
    }

    fn span(&self, text: String) -> Span {
        Span {
            text,
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            code: false,
            link: self.link.clone(),
        }
    }

    fn push_text(&mut self, text: &str) {
        let span = self.span(text.to_string());
        self.inlines.push(Inline::Text(span));
    }

    /// Closes the running inline content as a paragraph.
    fn flush(&mut self) {
        if self.inlines.is_empty() {
            return;
        }
        let inlines = std::mem::take(&mut self.inlines);
        self.push_block(Block::Paragraph(inlines));
    }

    fn push_block(&mut self, block: Block) {
        match self.containers.last_mut() {
            Some(Container::Blocks(blocks) | Container::Quote(blocks)) => blocks.push(block),
            Some(Container::List { items, .. }) => match items.last_mut() {
                Some(item) => item.push(block),
                None => items.push(vec![block]),
            },
            None => self.containers.push(Container::Blocks(vec![block])),
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        while self.containers.len() > 1 {
            self.end_unclosed();
        }
        match self.containers.pop() {
            Some(Container::Blocks(blocks) | Container::Quote(blocks)) => blocks,
            Some(Container::List { start, items }) => vec![Block::List { start, items }],
            None => Vec::new(),
        }
    }

    fn end_unclosed(&mut self) {
        match self.containers.pop() {
            Some(Container::Blocks(blocks) | Container::Quote(blocks)) => {
                for block in blocks {
                    self.push_block(block);
                }
            }
            Some(Container::List { start, items }) => self.push_block(Block::List { start, items }),
            None => {}
        }
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        _ => 3,
    }
}

fn quoted(block: Block) -> Block {
    let prefix = Inline::Text(Span {
        text: "> ".to_string(),
        ..Span::default()
    });
    match block {
        Block::Paragraph(mut inlines) => {
            inlines.insert(0, prefix);
            Block::Paragraph(inlines)
        }
        other => other,
    }
}

pub fn parse(text: &str) -> Vec<Block> {
    let mut builder = Builder::new();
    for event in Parser::new_ext(text, Options::empty()) {
        builder.event(event);
    }
    builder.finish()
}

/// Parsed replies keyed by message id; messages never change once created.
#[derive(Default)]
pub struct MarkdownCache {
    blocks: HashMap<String, Vec<Block>>,
}

impl MarkdownCache {
    pub fn get(&mut self, id: &str, text: &str) -> &[Block] {
        self.blocks
            .entry(id.to_string())
            .or_insert_with(|| parse(text))
    }
}

pub fn show(ui: &mut egui::Ui, blocks: &[Block]) {
    for block in blocks {
        show_block(ui, block);
    }
}

fn show_block(ui: &mut egui::Ui, block: &Block) {
    match block {
        Block::Paragraph(inlines) => show_inlines(ui, inlines, None),
        Block::Heading { level, content } => {
            let size = match level {
                1 => 20.0,
                2 => 18.0,
                _ => 16.0,
            };
            show_inlines(ui, content, Some(size));
        }
        Block::List { start, items } => {
            for (index, item) in items.iter().enumerate() {
                let marker = match start {
                    Some(first) => format!("{}.", first + index as u64),
                    None => "•".to_string(),
                };
                ui.horizontal_top(|ui| {
                    ui.label(marker);
                    ui.vertical(|ui| show(ui, item));
                });
            }
        }
        Block::CodeBlock(code) => {
            egui::Frame::new()
                .fill(CODE_FILL)
                .corner_radius(8.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(code).monospace());
                });
        }
    }
}

fn show_inlines(ui: &mut egui::Ui, inlines: &[Inline], heading: Option<f32>) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for inline in inlines {
            match inline {
                Inline::Break => ui.end_row(),
                Inline::Text(span) => {
                    let text = rich_text(span, heading);
                    match &span.link {
                        Some(url) => {
                            ui.add(
                                egui::Hyperlink::from_label_and_url(text.color(LINK_COLOR), url)
                                    .open_in_new_tab(true),
                            );
                        }
                        None => {
                            ui.label(text);
                        }
                    }
                }
            }
        }
    });
}

fn rich_text(span: &Span, heading: Option<f32>) -> RichText {
    let mut text = RichText::new(&span.text);
    if let Some(size) = heading {
        text = text.size(size).strong();
    }
    if span.strong {
        text = text.strong();
    }
    if span.emphasis {
        text = text.italics();
    }
    if span.code {
        text = text.code();
    }
    if span.link.is_some() {
        text = text.underline();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Inline {
        Inline::Text(Span {
            text: text.to_string(),
            ..Span::default()
        })
    }

    fn texts(inlines: &[Inline]) -> String {
        inlines
            .iter()
            .map(|inline| match inline {
                Inline::Text(span) => span.text.as_str(),
                Inline::Break => "\n",
            })
            .collect()
    }

    #[test]
    fn bold_and_bullets_become_structure() {
        let blocks = parse("Our range:\n\n- **Urea** 46% N\n- DAP\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], Block::Paragraph(vec![plain("Our range:")]));

        let Block::List { start, items } = &blocks[1] else {
            panic!("expected a list, got {:?}", blocks[1]);
        };
        assert_eq!(*start, None);
        assert_eq!(items.len(), 2);

        let Block::Paragraph(first) = &items[0][0] else {
            panic!("expected paragraph in list item");
        };
        let Inline::Text(bold) = &first[0] else {
            panic!("expected text span");
        };
        assert_eq!(bold.text, "Urea");
        assert!(bold.strong);
        assert!(!texts(first).contains("**"));
        assert_eq!(items[1], vec![Block::Paragraph(vec![plain("DAP")])]);
    }

    #[test]
    fn ordered_list_keeps_start_number() {
        let blocks = parse("3. mix\n4. spread\n");
        assert!(matches!(&blocks[0], Block::List { start: Some(3), items } if items.len() == 2));
    }

    #[test]
    fn headings_are_capped_at_level_three() {
        let blocks = parse("# Title\n\n## Sub\n\n##### Deep\n");
        let levels: Vec<u8> = blocks
            .iter()
            .map(|block| match block {
                Block::Heading { level, .. } => *level,
                other => panic!("unexpected block {other:?}"),
            })
            .collect();
        assert_eq!(levels, vec![1, 2, 3]);
    }

    #[test]
    fn emphasis_code_and_links() {
        let blocks = parse("Use *less* `NPK`, see [our site](https://lcb.example).");
        let Block::Paragraph(inlines) = &blocks[0] else {
            panic!("expected paragraph");
        };
        let spans: Vec<&Span> = inlines
            .iter()
            .filter_map(|inline| match inline {
                Inline::Text(span) => Some(span),
                Inline::Break => None,
            })
            .collect();

        assert!(spans.iter().any(|span| span.text == "less" && span.emphasis));
        assert!(spans.iter().any(|span| span.text == "NPK" && span.code));
        assert!(spans.iter().any(|span| span.text == "our site"
            && span.link.as_deref() == Some("https://lcb.example")));
    }

    #[test]
    fn fenced_code_block_is_kept_verbatim() {
        let blocks = parse("```\nN: 46%\nP: 0%\n```\n");
        assert_eq!(blocks, vec![Block::CodeBlock("N: 46%\nP: 0%".to_string())]);
    }

    #[test]
    fn unsupported_constructs_pass_through_as_text() {
        let blocks = parse("![bag](bag.png)\n\n> quoted advice\n");
        assert_eq!(blocks.len(), 2);

        let Block::Paragraph(image) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(texts(image), "![bag](bag.png)");

        let Block::Paragraph(quote) = &blocks[1] else {
            panic!("expected paragraph");
        };
        assert_eq!(texts(quote), "> quoted advice");
    }

    #[test]
    fn hard_break_splits_lines() {
        let blocks = parse("line one  \nline two");
        let Block::Paragraph(inlines) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(texts(inlines), "line one\nline two");
    }

    #[test]
    fn cache_parses_once_per_message() {
        let mut cache = MarkdownCache::default();
        let first = cache.get("1", "**a**").to_vec();
        let again = cache.get("1", "ignored").to_vec();
        assert_eq!(first, again);
    }
}
