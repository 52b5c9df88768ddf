//! Console tables for maps, annotated with axis labels.
//!
//! Layout of each table:
//! ```text
//! 		  1000	  2000
//!    50( 1)10.000	10.000
//!   100( 2)10.000	10.000
//! ```

use std::fmt::Write;

use crate::fuel_map::FuelMap;

fn write_rpm_header(out: &mut String, rpm_labels: &[i32], size: usize) {
    out.push_str("\t\t");
    for j in 0..size {
        match rpm_labels.get(j) {
            Some(label) => {
                let _ = write!(out, "{label:6}");
            }
            None => out.push_str("      "),
        }
        if j + 1 < size {
            out.push('\t');
        }
    }
    out.push('\n');
}

/// Render `map` under a `========= title ===========` banner.
pub fn render_table(title: &str, map: &FuelMap, rpm_labels: &[i32], load_labels: &[i32]) -> String {
    let size = map.size();
    let mut out = String::new();
    let _ = writeln!(out, "\n========= {title} ===========");
    write_rpm_header(&mut out, rpm_labels, size);
    for (i, row) in map.rows().enumerate() {
        let label = load_labels.get(i).copied().unwrap_or_default();
        let _ = write!(out, "{label:5}({:2})", i + 1);
        for (j, value) in row.iter().enumerate() {
            let _ = write!(out, "{value:6.3}");
            if j + 1 < row.len() {
                out.push('\t');
            }
        }
        out.push('\n');
    }
    out
}
