// Shared by several bench targets; each uses a different subset.
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with some content.\n\n- Bullet point\n  - Nested item\n- Another item\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n| name | value |\n|:-----|------:|\n| a | 1 |\n| b | 2 |\n\n> quoted\n>\n> more\n\n---\n<Video src=\"intro.mp4\" />\n\n";
    base.repeat(size)
}

/// Paragraph-only document with `blocks` blocks.
#[allow(dead_code)]
pub fn generate_paragraphs(blocks: usize) -> String {
    (0..blocks)
        .map(|i| format!("paragraph {i}\n\n"))
        .collect()
}
