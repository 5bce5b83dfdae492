use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates `text` to at most `max_width` terminal columns, appending an
/// ellipsis when anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width.saturating_sub(1);
    let mut truncated = String::new();
    let mut used = 0;

    for character in text.chars() {
        let character_width = character.width().unwrap_or(0);
        if used + character_width > budget {
            break;
        }

        truncated.push(character);
        used += character_width;
    }

    truncated.push('…');

    truncated
}

/// Formats a byte count the way the content pane displays sizes.
pub fn format_size(size: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    if size >= GIB {
        return format!("{:.1} GiB", size as f64 / GIB as f64);
    }
    if size >= MIB {
        return format!("{:.1} MiB", size as f64 / MIB as f64);
    }
    if size >= KIB {
        return format!("{:.1} KiB", size as f64 / KIB as f64);
    }

    format!("{size} B")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_with_ellipsis_keeps_short_text() {
        // Arrange & Act
        let truncated = truncate_with_ellipsis("notes.txt", 20);

        // Assert
        assert_eq!(truncated, "notes.txt");
    }

    #[test]
    fn test_truncate_with_ellipsis_cuts_long_text() {
        // Arrange & Act
        let truncated = truncate_with_ellipsis("a-very-long-file-name.txt", 10);

        // Assert
        assert_eq!(truncated.chars().count(), 10);
        assert!(truncated.ends_with('…'));
    }

    #[test]
    fn test_truncate_with_ellipsis_zero_width_is_empty() {
        // Arrange & Act
        let truncated = truncate_with_ellipsis("abc", 0);

        // Assert
        assert!(truncated.is_empty());
    }

    #[test]
    fn test_format_size_scales_units() {
        // Arrange & Act & Assert
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MiB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GiB");
    }
}
