pub mod favorites_panel;
pub mod results;
pub mod search_bar;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};
use unicode_width::UnicodeWidthStr;

use radiodex_core::station::StationRecord;

use crate::theme::{C_FAVORITE, C_LOCATION, C_MUTED, C_PLAYING, C_PRIMARY, C_SECONDARY, C_SELECTION_BG};

/// Render one station row: playback marker, favorite star, name, country,
/// and a favicon-presence dot. Shared by the results and favorites panes.
pub fn station_row(
    station: &StationRecord,
    selected: bool,
    playing: bool,
    favorite: bool,
    width: u16,
) -> ListItem<'static> {
    let marker = if playing { "▶ " } else { "  " };
    let star = if favorite { "★ " } else { "☆ " };

    let name_style = if playing {
        Style::default().fg(C_PLAYING).add_modifier(Modifier::BOLD)
    } else if selected {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_SECONDARY)
    };

    // Budget: markers (4) + country + separators must fit `width`.
    let country = station.country.as_str();
    let reserved = 4 + 2 + country.width() + 2;
    let name_budget = (width as usize).saturating_sub(reserved).max(8);
    let name = truncate_to_width(&station.name, name_budget);

    let mut spans = vec![
        Span::styled(marker.to_string(), Style::default().fg(C_PLAYING)),
        Span::styled(
            star.to_string(),
            Style::default().fg(if favorite { C_FAVORITE } else { C_MUTED }),
        ),
        Span::styled(name, name_style),
    ];
    if !country.is_empty() {
        spans.push(Span::styled("  ", Style::default()));
        spans.push(Span::styled(
            country.to_string(),
            Style::default().fg(C_LOCATION),
        ));
    }
    if station.favicon.is_some() {
        spans.push(Span::styled(" ◉", Style::default().fg(C_MUTED)));
    }

    let bg = if selected {
        Style::default().bg(C_SELECTION_BG)
    } else {
        Style::default()
    };
    ListItem::new(Line::from(spans)).style(bg)
}

fn truncate_to_width(text: &str, budget: usize) -> String {
    if text.width() <= budget {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
