// crates/agenticops-app/src/components/chat/markdown.rs
// Markdown subset used by agent answers: headings, lists, code, pipe tables

use super::CodeBlock;
use crate::syntax::html_escape;
use leptos::prelude::*;

#[component]
pub fn Markdown(content: String) -> impl IntoView {
    let blocks = parse_markdown(&content);

    view! {
        <div class="markdown space-y-2">
            {blocks
                .into_iter()
                .map(|block| match block {
                    Block::Heading { level, text } => {
                        let class = match level {
                            1 => "text-base font-semibold text-gray-100",
                            2 => "text-sm font-semibold text-gray-100",
                            _ => "text-sm font-medium text-gray-200",
                        };
                        view! { <p class=class inner_html=render_inline(&text)></p> }.into_any()
                    }
                    Block::Paragraph(text) => {
                        view! { <p inner_html=render_inline(&text)></p> }.into_any()
                    }
                    Block::Code { language, code } => {
                        view! { <CodeBlock code=code language=language.unwrap_or_else(|| "text".to_string())/> }
                            .into_any()
                    }
                    Block::List { ordered, items } => {
                        let items = items
                            .into_iter()
                            .map(|item| view! { <li inner_html=render_inline(&item)></li> })
                            .collect::<Vec<_>>();
                        if ordered {
                            view! { <ol class="list-decimal pl-5">{items}</ol> }.into_any()
                        } else {
                            view! { <ul class="list-disc pl-5">{items}</ul> }.into_any()
                        }
                    }
                    Block::Quote(text) => {
                        view! {
                            <blockquote class="border-l-2 border-gray-700 pl-3 text-gray-400" inner_html=render_inline(&text)></blockquote>
                        }
                            .into_any()
                    }
                    Block::Table { header, rows } => {
                        view! {
                            <div class="overflow-x-auto rounded border border-gray-800">
                                <table class="w-full border-collapse text-xs">
                                    <thead>
                                        <tr>
                                            {header
                                                .into_iter()
                                                .map(|h| view! { <th class="bg-slate-800 px-2 py-1 text-left" inner_html=render_inline(&h)></th> })
                                                .collect::<Vec<_>>()}
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {rows
                                            .into_iter()
                                            .map(|row| {
                                                view! {
                                                    <tr class="border-t border-gray-800">
                                                        {row
                                                            .into_iter()
                                                            .map(|c| view! { <td class="px-2 py-1" inner_html=render_inline(&c)></td> })
                                                            .collect::<Vec<_>>()}
                                                    </tr>
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </tbody>
                                </table>
                            </div>
                        }
                            .into_any()
                    }
                    Block::Rule => view! { <hr class="border-gray-800"/> }.into_any(),
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Block {
    Heading { level: usize, text: String },
    Paragraph(String),
    Code { language: Option<String>, code: String },
    List { ordered: bool, items: Vec<String> },
    Quote(String),
    Table { header: Vec<String>, rows: Vec<Vec<String>> },
    Rule,
}

fn bullet_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ").or_else(|| line.strip_prefix("* "))
}

fn numbered_item(line: &str) -> Option<&str> {
    let (num, rest) = line.split_once(". ")?;
    (!num.is_empty() && num.chars().all(|c| c.is_ascii_digit())).then_some(rest)
}

fn is_table_row(line: &str) -> bool {
    let t = line.trim();
    t.starts_with('|') && t.len() > 1
}

fn is_separator_row(line: &str) -> bool {
    is_table_row(line)
        && line
            .trim()
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

fn split_cells(line: &str) -> Vec<String> {
    let t = line.trim();
    let t = t.strip_prefix('|').unwrap_or(t);
    let t = t.strip_suffix('|').unwrap_or(t);
    t.split('|').map(|c| c.trim().to_string()).collect()
}

fn flush(blocks: &mut Vec<Block>, paragraph: &mut String) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(std::mem::take(paragraph)));
    }
}

fn parse_markdown(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph = String::new();
    let mut lines = content.lines().peekable();

    while let Some(line) = lines.next() {
        let trimmed = line.trim();

        if let Some(fence) = trimmed.strip_prefix("```") {
            flush(&mut blocks, &mut paragraph);
            let language = Some(fence.trim().to_string()).filter(|l| !l.is_empty());
            let mut code = Vec::new();
            for code_line in lines.by_ref() {
                if code_line.trim_start().starts_with("```") {
                    break;
                }
                code.push(code_line);
            }
            blocks.push(Block::Code {
                language,
                code: code.join("\n"),
            });
            continue;
        }

        if trimmed.is_empty() {
            flush(&mut blocks, &mut paragraph);
            continue;
        }

        if matches!(trimmed, "---" | "***" | "___") {
            flush(&mut blocks, &mut paragraph);
            blocks.push(Block::Rule);
            continue;
        }

        let hashes = trimmed.chars().take_while(|&c| c == '#').count();
        if (1..=6).contains(&hashes) && trimmed[hashes..].starts_with(' ') {
            flush(&mut blocks, &mut paragraph);
            blocks.push(Block::Heading {
                level: hashes,
                text: trimmed[hashes..].trim().to_string(),
            });
            continue;
        }

        if let Some(quote) = trimmed.strip_prefix("> ") {
            flush(&mut blocks, &mut paragraph);
            let mut text = quote.to_string();
            while let Some(next) = lines.peek().and_then(|l| l.trim().strip_prefix("> ")) {
                text.push(' ');
                text.push_str(next);
                lines.next();
            }
            blocks.push(Block::Quote(text));
            continue;
        }

        // A pipe row followed by a separator row opens a table
        if is_table_row(trimmed) && lines.peek().is_some_and(|next| is_separator_row(next)) {
            flush(&mut blocks, &mut paragraph);
            lines.next();
            let header = split_cells(trimmed);
            let mut rows = Vec::new();
            while let Some(next) = lines.peek().filter(|l| is_table_row(l)) {
                rows.push(split_cells(next));
                lines.next();
            }
            blocks.push(Block::Table { header, rows });
            continue;
        }

        let item = bullet_item(trimmed)
            .map(|i| (false, i))
            .or_else(|| numbered_item(trimmed).map(|i| (true, i)));
        if let Some((ordered, first)) = item {
            flush(&mut blocks, &mut paragraph);
            let mut items = vec![first.to_string()];
            loop {
                let next = lines.peek().map(|l| l.trim()).and_then(|l| {
                    if ordered { numbered_item(l) } else { bullet_item(l) }
                });
                let Some(next) = next else { break };
                items.push(next.to_string());
                lines.next();
            }
            blocks.push(Block::List { ordered, items });
            continue;
        }

        if !paragraph.is_empty() {
            paragraph.push(' ');
        }
        paragraph.push_str(trimmed);
    }

    flush(&mut blocks, &mut paragraph);
    blocks
}

/// Wrap text between paired markers in a tag; unpaired markers stay literal
fn wrap_pairs(text: &str, marker: &str, tag: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(marker) {
        let after = &rest[start + marker.len()..];
        match after.find(marker) {
            Some(end) if end > 0 => {
                out.push_str(&rest[..start]);
                out.push_str(&format!("<{tag}>{}</{tag}>", &after[..end]));
                rest = &after[end + marker.len()..];
            }
            _ => break,
        }
    }
    out.push_str(rest);
    out
}

const SAFE_SCHEMES: [&str; 3] = ["http:", "https:", "mailto:"];

/// Browsers ignore embedded tabs and newlines in a scheme, so compare
/// against the URL with those removed
fn is_safe_url(url: &str) -> bool {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    SAFE_SCHEMES.iter().any(|scheme| normalized.starts_with(scheme))
}

/// Links with any other scheme render as their label only
fn render_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('[') {
        let Some((label, tail)) = rest[start + 1..].split_once("](") else {
            break;
        };
        let Some((url, remainder)) = tail.split_once(')') else {
            break;
        };
        out.push_str(&rest[..start]);
        if is_safe_url(url) {
            out.push_str(&format!(
                r#"<a href="{}" target="_blank" rel="noopener" class="text-blue-400 underline">{}</a>"#,
                url.trim().replace('"', "&quot;"),
                label
            ));
        } else {
            out.push_str(label);
        }
        rest = remainder;
    }
    out.push_str(rest);
    out
}

/// Escape, then apply code spans, bold, italic and links
fn render_inline(text: &str) -> String {
    let escaped = html_escape(text);
    let coded = wrap_pairs(&escaped, "`", "code");
    let bold = wrap_pairs(&coded, "**", "strong");
    let italic = wrap_pairs(&bold, "_", "em");
    render_links(&italic)
}
