use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keyclimb::geometry::Layout;
use keyclimb::model::KeyUsage;
use keyclimb::optimizer::SearchReport;
use keyclimb::scorer::{LayoutRanking, ScoreDetails};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// Printable form of a key: letters as-is, whitespace and controls escaped.
fn key_label(key: char) -> String {
    if key.is_whitespace() || key.is_control() {
        format!("{:?}", key)
    } else {
        key.to_string()
    }
}

pub fn print_layout_grid(name: &str, layout: &Layout) {
    println!("\nLayout: {}", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for row in layout.rows() {
        let cells: Vec<Cell> = row
            .iter()
            .map(|&c| Cell::new(c).set_alignment(CellAlignment::Center))
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}

pub fn print_key_usage(usage: &[KeyUsage], total: u64) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Count"),
        Cell::new("Share"),
    ]);
    align_right(&mut table, 1..=2);

    for u in usage {
        let share = if total > 0 {
            u.count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new(key_label(u.key)).add_attribute(Attribute::Bold),
            Cell::new(u.count),
            Cell::new(format!("{:.2}%", share)),
        ]);
    }
    println!("\n📊 Key usage ({} keystrokes)\n{}", total, table);
}

pub fn print_breakdown_report(results: &[(String, ScoreDetails)]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Layout").add_attribute(Attribute::Bold),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("Effort"),
        Cell::new("Hand"),
        Cell::new("Finger").fg(Color::Red),
        Cell::new("Missing").fg(Color::Red),
        Cell::new("SH%"),
        Cell::new("SF%"),
        Cell::new("Miss%"),
        Cell::new("Skipped"),
    ]);
    align_right(&mut table, 1..=9);

    for (name, d) in results {
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", d.layout_score)).fg(Color::Cyan),
            Cell::new(format!("{:.2}", d.effort_cost)),
            Cell::new(format!("{:.2}", d.same_hand_cost)),
            Cell::new(format!("{:.2}", d.same_finger_cost)).fg(Color::Red),
            Cell::new(format!("{:.2}", d.missing_cost)).fg(Color::Red),
            Cell::new(format!("{:.2}", d.pct_of_scored(d.stat_same_hand))),
            Cell::new(format!("{:.2}", d.pct_of_scored(d.stat_same_finger))),
            Cell::new(format!("{:.2}", d.pct_of_scored(d.stat_missing))),
            Cell::new(d.skipped_transitions),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_ranking_report(rankings: &[LayoutRanking]) {
    let Some(best) = rankings.first() else {
        return;
    };

    let mut table = new_table();
    table.add_row(vec![
        Cell::new(format!("Comparison vs Best ({})", best.name)).add_attribute(Attribute::Bold),
        Cell::new("Score"),
        Cell::new("Delta"),
        Cell::new("% Diff"),
    ]);
    align_right(&mut table, 1..=3);

    for r in rankings {
        let name_cell = if r.name == best.name {
            Cell::new(&r.name)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&r.name).add_attribute(Attribute::Bold)
        };

        table.add_row(vec![
            name_cell,
            Cell::new(format!("{:.2}", r.score)),
            Cell::new(format!("{:.2}", r.score - best.score)),
            Cell::new(format!("{:.1}%", r.delta_pct)),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_search_report(report: &SearchReport) {
    println!("\n🏆 Best layout");
    print_layout_grid(&report.best_layout.to_string(), &report.best_layout);

    let mut table = new_table();
    let s = &report.stats;
    let rows: Vec<(&str, String)> = vec![
        ("Stopped by", format!("{:?}", report.stop_reason)),
        ("Start score", format!("{:.2}", report.initial_score)),
        ("Best score", format!("{:.2}", report.best_score)),
        (
            "Improvement",
            format!("{:.2} ({:.3}%)", report.improvement, report.improvement_pct),
        ),
        ("Iterations", s.iterations.to_string()),
        ("Improvements", s.improvements.to_string()),
        ("Duplicates", s.duplicates.to_string()),
        ("No improvement", s.no_improvements.to_string()),
        ("Degenerate draws", s.degenerate_draws.to_string()),
        ("Layouts visited", report.visited.to_string()),
        ("Elapsed", format!("{:.1}s", report.elapsed_secs)),
    ];
    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}
