// Display formatting utilities

use crate::grid::GroupId;

/// Format a group id for a two-character cell (last two hex digits)
pub fn format_group_id(id: GroupId) -> String {
    format!("{:2X}", id % 0x100)
}

/// Group size label for a two-character cell
pub fn format_count_label(count: usize) -> String {
    if count < 100 {
        format!("{:>2}", count)
    } else {
        "9+".to_string()
    }
}

/// Column header line for a grid `cols` wide
pub fn column_headers(cols: usize) -> String {
    let mut line = String::from("    ");
    for col in 0..cols {
        line.push_str(&format!(" {:2}", col));
    }
    line
}

/// Row prefix for grid rows
pub fn row_prefix(row: usize) -> String {
    format!("{:2}: ", row)
}

/// Status line for the group under the pointer
pub fn group_status(group_id: Option<GroupId>, count: usize) -> String {
    match group_id {
        Some(id) if count == 1 => format!("Group #{}: 1 block", id),
        Some(id) => format!("Group #{}: {} blocks", id, count),
        None => "Background".to_string(),
    }
}
