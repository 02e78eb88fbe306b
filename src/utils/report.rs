// src/utils/report.rs

use crate::model::Crystal;
use crate::physics::analysis::symmetry::SymmetryInfo;

/// Formula string with counts, e.g. `Mg9 O24 Si8`.
pub fn formula(crystal: &Crystal) -> String {
    let mut parts = crystal.composition();
    parts.sort_by(|a, b| a.0.cmp(b.0));
    parts
        .iter()
        .map(|(el, count)| format!("{}{}", el, count))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plain-text summary of a loaded crystal.
///
/// Lists at most `rows` sites, in fractional or (with `cartesian`) Cartesian coordinates.
pub fn crystal_summary(crystal: &Crystal, source: &str, cartesian: bool, rows: usize) -> String {
    let cell = crystal.unit_cell();
    let sg = crystal.space_group();

    let mut out = String::new();
    out.push_str(&format!("File: {}\n", source));
    out.push_str(&format!("Name: {}\n", crystal.name()));
    out.push_str(&format!("Formula: {}\n", formula(crystal)));
    out.push_str(&format!(
        "Cell: a={:.4} b={:.4} c={:.4} Å  alpha={:.2} beta={:.2} gamma={:.2}°  V={:.3} Å³\n",
        cell.a,
        cell.b,
        cell.c,
        cell.alpha.to_degrees(),
        cell.beta.to_degrees(),
        cell.gamma.to_degrees(),
        cell.volume()
    ));
    out.push_str(&format!(
        "Space group: {} (#{})  {}  point group {}  Laue {}\n",
        sg.symbol, sg.index, sg.crystal_system, sg.point_group, sg.laue_group
    ));
    out.push_str("--------------------------------------------------------\n");
    let (xh, yh, zh) = if cartesian { ("X", "Y", "Z") } else { ("x", "y", "z") };
    out.push_str(&format!(
        "{:<8} {:<8} {:<10} {:<10} {:<10} {:<6}\n",
        "Index", "Element", xh, yh, zh, "Occ"
    ));
    out.push_str("--------------------------------------------------------\n");

    let sites = crystal.sites();
    for (i, site) in sites.iter().take(rows).enumerate() {
        let p = if cartesian {
            cell.to_cartesian(site.position())
        } else {
            site.position()
        };
        out.push_str(&format!(
            "{:<8} {:<8} {:<10.4} {:<10.4} {:<10.4} {:<6.3}\n",
            i,
            site.element(),
            p[0],
            p[1],
            p[2],
            site.occupancy()
        ));
    }

    if sites.len() > rows {
        out.push_str(&format!("... and {} more sites.\n", sites.len() - rows));
    }

    out
}

/// One line comparing the declared space group against a detected one.
pub fn symmetry_check(crystal: &Crystal, detected: &SymmetryInfo) -> String {
    let declared = crystal.space_group();
    if i32::from(declared.index) == detected.number {
        format!(
            "Symmetry check: detected {} (#{}), matches the declared group\n",
            detected.symbol, detected.number
        )
    } else {
        format!(
            "Symmetry check: detected {} (#{}), declared {} (#{})\n",
            detected.symbol, detected.number, declared.symbol, declared.index
        )
    }
}
