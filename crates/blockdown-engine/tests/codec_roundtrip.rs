//! End-to-end codec properties: parse → serialize → parse stability over
//! the public API.

use blockdown_engine::serialize::export;
use blockdown_engine::{
    Block, BlockKind, BlockMeta, blocks_to_markdown, markdown_to_blocks,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Shape of a block without its identity, for comparisons across parses.
fn shape(block: &Block) -> (BlockKind, &str, &Option<BlockMeta>) {
    (block.kind, block.content.as_str(), &block.meta)
}

fn shapes(blocks: &[Block]) -> Vec<(BlockKind, &str, &Option<BlockMeta>)> {
    blocks.iter().map(shape).collect()
}

#[rstest]
#[case::heading1(Block::new(BlockKind::Heading1, "Title", None))]
#[case::heading2(Block::new(BlockKind::Heading2, "Sub", None))]
#[case::heading3(Block::new(BlockKind::Heading3, "Minor", None))]
#[case::collapsible(Block::new(BlockKind::CollapsibleHeading2, "Folded", None))]
#[case::bullet(Block::new(BlockKind::BulletList, "item", None))]
#[case::numbered(Block::new(BlockKind::NumberedList, "step", None))]
#[case::checklist(Block::new(BlockKind::CheckList, "todo", None))]
#[case::quote(Block::new(BlockKind::Quote, "said", None))]
#[case::divider(Block::empty(BlockKind::Divider))]
#[case::paragraph(Block::new(BlockKind::Paragraph, "prose", None))]
#[case::code(Block::new(
    BlockKind::Code,
    "let x = 1;",
    Some(BlockMeta::Code { language: "rust".to_string() })
))]
#[case::mermaid(Block::new(
    BlockKind::Mermaid,
    "",
    Some(BlockMeta::Mermaid { diagram: "graph TD\nA --> B".to_string() })
))]
#[case::image(Block::new(
    BlockKind::Image,
    "",
    Some(BlockMeta::Image { url: "https://i.test/a.png".to_string(), alt: "a".to_string() })
))]
#[case::video(Block::new(
    BlockKind::Video,
    "",
    Some(BlockMeta::Video { url: "https://v.test/clip.mp4".to_string() })
))]
#[case::iframe(Block::new(
    BlockKind::Iframe,
    "",
    Some(BlockMeta::Iframe { url: "https://e.test".to_string(), height: 250 })
))]
#[case::link(Block::new(
    BlockKind::LinkPreview,
    "",
    Some(BlockMeta::LinkPreview { url: "https://d.test".to_string(), title: Some("docs".to_string()) })
))]
#[case::table(Block::new(
    BlockKind::Table,
    "",
    Some(BlockMeta::Table {
        data: vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["1".to_string(), "2".to_string()],
        ],
        rows: 2,
        cols: 2,
    })
))]
fn lossless_kinds_roundtrip(#[case] block: Block) {
    let markdown = blocks_to_markdown(std::slice::from_ref(&block));
    let reparsed = markdown_to_blocks(&markdown);
    assert_eq!(shapes(&reparsed), shapes(std::slice::from_ref(&block)));
}

#[test]
fn serialization_is_idempotent_after_one_roundtrip() {
    let source = "# Title\n\nIntro text.\n\n- [x] checked\n- [ ] open\n\n7. numbered\n\n| A | B |\n| --- | --- |\n| 1 | 2 |\n\n```rust\nfn f() {}\n```\n\n@[iframe:300](https://e.test)";
    let once = blocks_to_markdown(&markdown_to_blocks(source));
    let twice = blocks_to_markdown(&markdown_to_blocks(&once));
    assert_eq!(once, twice);
}

#[test]
fn documented_lossy_fields() {
    // Checked state drops to unchecked.
    let blocks = markdown_to_blocks("- [x] done");
    assert_eq!(blocks[0].kind, BlockKind::CheckList);
    assert_eq!(blocks[0].content, "done");
    assert_eq!(blocks_to_markdown(&blocks), "- [ ] done");

    // Ordinals renumber to 1.
    let blocks = markdown_to_blocks("9. ninth");
    assert_eq!(blocks_to_markdown(&blocks), "1. ninth");
}

#[test]
fn ids_are_fresh_on_every_parse() {
    let first = markdown_to_blocks("# Same");
    let second = markdown_to_blocks("# Same");
    assert_ne!(first[0].id, second[0].id);
}

#[test]
fn storage_codec_recovers_embeds_but_export_does_not() {
    let blocks = vec![Block::new(
        BlockKind::Video,
        "",
        Some(BlockMeta::Video {
            url: "https://v.test/c.mp4".to_string(),
        }),
    )];

    // Storage codec: reversible pseudo-tag.
    let storage = blocks_to_markdown(&blocks);
    assert_eq!(storage, "@[video](https://v.test/c.mp4)");
    assert_eq!(markdown_to_blocks(&storage)[0].kind, BlockKind::Video);

    // Export: plain link, reparses as a link preview.
    let display = export::blocks_to_markdown(&blocks, None);
    assert_eq!(display, "[Video](https://v.test/c.mp4)\n");
    assert_eq!(
        markdown_to_blocks(&display)[0].kind,
        BlockKind::LinkPreview
    );
}

#[test]
fn fence_interior_never_classified() {
    let markdown = "```\n# not a heading\n| not | a table |\n- not a list\n```";
    let blocks = markdown_to_blocks(markdown);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::Code);
    assert_eq!(
        blocks[0].content,
        "# not a heading\n| not | a table |\n- not a list"
    );
}

#[test]
fn large_paste_parses_with_unique_ids() {
    let markdown = (0..500)
        .map(|i| format!("- item {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    let blocks = markdown_to_blocks(&markdown);
    assert_eq!(blocks.len(), 500);

    let mut ids: Vec<_> = blocks.iter().map(|b| b.id.clone()).collect();
    ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    ids.dedup();
    assert_eq!(ids.len(), 500);
}
