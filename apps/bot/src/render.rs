//! Plain-text rendering of frames and pages
//!
//! Replies are monospace ASCII tables. Rows shorter than the header are
//! padded with `<no data>` so a missing field never shifts columns.

use reprezzent_catalog_client::{Playlist, Track};

use crate::browser::PageItems;

const NO_DATA: &str = "<no data>";

/// Render an ASCII table: centered headers, right-aligned cells
pub fn render_table(columns: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    let padded: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            (0..columns.len())
                .map(|i| row.get(i).cloned().unwrap_or_else(|| NO_DATA.to_string()))
                .collect()
        })
        .collect();
    for row in &padded {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let border: String = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    out.push('|');
    for (i, column) in columns.iter().enumerate() {
        out.push_str(&format!(" {:^width$} |", column, width = widths[i]));
    }
    out.push('\n');
    out.push_str(&border);
    out.push('\n');
    for row in &padded {
        out.push('|');
        for (i, cell) in row.iter().enumerate() {
            out.push_str(&format!(" {:>width$} |", cell, width = widths[i]));
        }
        out.push('\n');
    }
    out.push_str(&border);
    out
}

/// Table of playlists: title and declared track count
pub fn render_playlists(playlists: &[Playlist]) -> String {
    let rows: Vec<Vec<String>> = playlists
        .iter()
        .map(|p| vec![p.title.clone(), p.track_count.to_string()])
        .collect();
    render_table(&["Playlist name", "Track count"], &rows)
}

/// Table of tracks: title, artists, duration
pub fn render_tracks(tracks: &[Track]) -> String {
    let rows: Vec<Vec<String>> = tracks
        .iter()
        .map(|t| vec![t.title.clone(), t.artist_line(), t.formatted_duration()])
        .collect();
    render_table(&["Track", "Artists", "Duration"], &rows)
}

/// Render one visible page with its page number
pub fn render_page(items: &PageItems, page_number: usize) -> String {
    let table = match items {
        PageItems::Playlists(playlists) => render_playlists(playlists),
        PageItems::Tracks(tracks) => render_tracks(tracks),
    };
    format!("{}\npage {}", table, page_number)
}

/// Render a single track's detail card
pub fn render_track_detail(track: &Track) -> String {
    format!(
        "{}\nby {}\nduration {}",
        track.title,
        if track.artists.is_empty() {
            NO_DATA.to_string()
        } else {
            track.artist_line()
        },
        track.formatted_duration()
    )
}
