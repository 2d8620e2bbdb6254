//! Turns detected blocks into the document text.

use crate::{errors::ExtractionError, models::analysis::TextBlock};

/// Join the text of every line block with `\n`, in service order.
///
/// Words, pages and other block kinds are skipped; a line without text
/// contributes an empty line.
pub fn aggregate_lines(blocks: &[TextBlock]) -> String {
    blocks
        .iter()
        .filter(|block| block.is_line())
        .map(|block| block.text.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Aggregate `blocks` and reject a result that is blank once trimmed.
pub fn aggregate_text(key: &str, blocks: &[TextBlock]) -> Result<String, ExtractionError> {
    let text = aggregate_lines(blocks);
    if text.trim().is_empty() {
        return Err(ExtractionError::EmptyExtraction {
            key: key.to_string(),
        });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::BlockKind;

    #[test]
    fn keeps_only_lines_in_order() {
        let blocks = [
            TextBlock::line("A"),
            TextBlock::word("x"),
            TextBlock::line("B"),
        ];
        assert_eq!(aggregate_lines(&blocks), "A\nB");
    }

    #[test]
    fn ignores_pages_and_other_kinds() {
        let blocks = [
            TextBlock::new(BlockKind::Other("PAGE".into()), None),
            TextBlock::line("Hello"),
            TextBlock::new(BlockKind::Other("KEY_VALUE_SET".into()), Some("k".into())),
            TextBlock::line("World"),
        ];
        assert_eq!(aggregate_text("k1", &blocks).unwrap(), "Hello\nWorld");
    }

    #[test]
    fn whitespace_only_lines_are_empty() {
        let blocks = [TextBlock::line("  "), TextBlock::line("\t")];
        let err = aggregate_text("k1", &blocks).unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyExtraction { ref key } if key == "k1"));
        assert!(err.to_string().starts_with("No text was extracted from file: k1"));
    }

    #[test]
    fn no_line_blocks_is_empty() {
        let blocks = [TextBlock::word("orphan")];
        assert!(aggregate_text("k1", &blocks).is_err());
        assert!(aggregate_text("k1", &[]).is_err());
    }

    #[test]
    fn interior_whitespace_is_preserved() {
        let blocks = [TextBlock::line(" A "), TextBlock::line(""), TextBlock::line("B")];
        assert_eq!(aggregate_text("k1", &blocks).unwrap(), " A \n\nB");
    }
}
