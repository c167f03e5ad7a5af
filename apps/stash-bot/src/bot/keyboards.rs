use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// One button per dataset, stacked vertically.
pub fn dataset_keyboard(names: &[String]) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = names
        .iter()
        .map(|name| {
            vec![InlineKeyboardButton::callback(
                format!("📂 {name}"),
                format!("drop:{name}"),
            )]
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_per_dataset() {
        let kb = dataset_keyboard(&["games".to_string(), "movies".to_string()]);
        assert_eq!(kb.inline_keyboard.len(), 2);
        assert_eq!(kb.inline_keyboard[0].len(), 1);
    }
}
