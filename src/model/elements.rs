// src/model/elements.rs

/// Element symbols indexed by atomic number minus one.
const SYMBOLS: [&str; 118] = [
    // --- Period 1 ---
    "H", "He",
    // --- Period 2 ---
    "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    // --- Period 3 ---
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar",
    // --- Period 4 ---
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr",
    // --- Period 5 ---
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe",
    // --- Period 6 ---
    "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy",
    "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt",
    "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
    // --- Period 7 ---
    "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf",
    "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds",
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Returns the atomic number (Z) for an exact element symbol.
pub fn atomic_number(symbol: &str) -> Option<u8> {
    SYMBOLS
        .iter()
        .position(|s| *s == symbol)
        .map(|i| (i + 1) as u8)
}

/// Returns the element symbol for an atomic number.
pub fn symbol(atomic_number: u8) -> Option<&'static str> {
    SYMBOLS.get((atomic_number as usize).checked_sub(1)?).copied()
}

/// Reads the element out of an atom-site label such as `Mg1`, `MG2`, `O3'` or `Fe3+`.
///
/// The first letter is upper-cased and an optional second letter lower-cased.
/// The two-letter symbol wins when it exists, otherwise the one-letter one.
pub fn element_from_label(label: &str) -> Option<u8> {
    let mut chars = label.trim().chars();
    let first = chars.next().filter(|c| c.is_ascii_alphabetic())?;
    let one = first.to_ascii_uppercase().to_string();

    if let Some(second) = chars.next().filter(|c| c.is_ascii_alphabetic()) {
        let two = format!("{}{}", one, second.to_ascii_lowercase());
        if let Some(z) = atomic_number(&two) {
            return Some(z);
        }
    }
    atomic_number(&one)
}
