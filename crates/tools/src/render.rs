//! Text and HTML views of a generated dungeon, with optional fog around the player.

use dungeon_core::{GeneratedDungeon, Marker, Pos};

/// Fog glyph in HTML output.
pub const HTML_FOG: &str = r#"<span class="fog">?</span>"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellView {
    Visible(Marker),
    Fogged,
}

/// Cells farther than `radius` (Euclidean) from `player` are hidden. No radius, no fog;
/// a radius of zero leaves only the player cell.
pub fn is_fogged(player: Pos, position: Pos, radius: Option<f64>) -> bool {
    let Some(radius) = radius else {
        return false;
    };
    let dx = position.x.abs_diff(player.x) as f64;
    let dy = position.y.abs_diff(player.y) as f64;
    dx.hypot(dy) > radius
}

pub fn resolve_cell_view(dungeon: &GeneratedDungeon, position: Pos, marker: Marker) -> CellView {
    if is_fogged(dungeon.player.pos(), position, dungeon.config.fog_radius) {
        CellView::Fogged
    } else {
        CellView::Visible(marker)
    }
}

fn cell_views(dungeon: &GeneratedDungeon) -> impl Iterator<Item = Vec<CellView>> + '_ {
    dungeon.grid.rows().enumerate().map(move |(y, row)| {
        row.iter()
            .enumerate()
            .map(|(x, &marker)| resolve_cell_view(dungeon, Pos::new(x, y), marker))
            .collect()
    })
}

/// One `\n`-terminated line per row; fog shows the placeholder marker.
pub fn render_text(dungeon: &GeneratedDungeon) -> String {
    let placeholder = dungeon.config.placeholder_marker;
    let mut out = String::with_capacity((dungeon.grid.width() + 1) * dungeon.grid.height());
    for row in cell_views(dungeon) {
        for view in row {
            out.push(match view {
                CellView::Visible(marker) => marker,
                CellView::Fogged => placeholder,
            });
        }
        out.push('\n');
    }
    out
}

/// Rows joined by `<br/>`.
pub fn render_html(dungeon: &GeneratedDungeon) -> String {
    let rows: Vec<String> = cell_views(dungeon)
        .map(|row| {
            let mut line = String::new();
            for view in row {
                match view {
                    CellView::Visible(marker) => push_escaped(&mut line, marker),
                    CellView::Fogged => line.push_str(HTML_FOG),
                }
            }
            line
        })
        .collect();
    rows.join("<br/>")
}

fn push_escaped(out: &mut String, marker: Marker) {
    match marker {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        other => out.push(other),
    }
}
