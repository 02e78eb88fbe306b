// src/model/space_group.rs

//! Space-group lookup by International Tables number.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CrystalSystem {
    Triclinic,
    Monoclinic,
    Orthorhombic,
    Tetragonal,
    Trigonal,
    Hexagonal,
    Cubic,
}

impl fmt::Display for CrystalSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CrystalSystem::Triclinic => "Triclinic",
            CrystalSystem::Monoclinic => "Monoclinic",
            CrystalSystem::Orthorhombic => "Orthorhombic",
            CrystalSystem::Tetragonal => "Tetragonal",
            CrystalSystem::Trigonal => "Trigonal",
            CrystalSystem::Hexagonal => "Hexagonal",
            CrystalSystem::Cubic => "Cubic",
        };
        f.write_str(name)
    }
}

/// The eleven centrosymmetric Laue classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LaueGroup {
    #[serde(rename = "-1")]
    Bar1,
    #[serde(rename = "2/m")]
    TwoOverM,
    #[serde(rename = "mmm")]
    Mmm,
    #[serde(rename = "4/m")]
    FourOverM,
    #[serde(rename = "4/mmm")]
    FourOverMmm,
    #[serde(rename = "-3")]
    Bar3,
    #[serde(rename = "-3m")]
    Bar3M,
    #[serde(rename = "6/m")]
    SixOverM,
    #[serde(rename = "6/mmm")]
    SixOverMmm,
    #[serde(rename = "m-3")]
    MBar3,
    #[serde(rename = "m-3m")]
    MBar3M,
}

impl LaueGroup {
    pub fn symbol(&self) -> &'static str {
        match self {
            LaueGroup::Bar1 => "-1",
            LaueGroup::TwoOverM => "2/m",
            LaueGroup::Mmm => "mmm",
            LaueGroup::FourOverM => "4/m",
            LaueGroup::FourOverMmm => "4/mmm",
            LaueGroup::Bar3 => "-3",
            LaueGroup::Bar3M => "-3m",
            LaueGroup::SixOverM => "6/m",
            LaueGroup::SixOverMmm => "6/mmm",
            LaueGroup::MBar3 => "m-3",
            LaueGroup::MBar3M => "m-3m",
        }
    }
}

impl fmt::Display for LaueGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpaceGroupInfo {
    pub index: u8,
    pub symbol: &'static str,
    pub crystal_system: CrystalSystem,
    pub point_group: &'static str,
    pub laue_group: LaueGroup,
}

/// Looks up a space group by its number, 1 through 230.
pub fn lookup(index: i64) -> Option<SpaceGroupInfo> {
    if !(1..=230).contains(&index) {
        return None;
    }
    let n = index as u8;

    let crystal_system = match n {
        1..=2 => CrystalSystem::Triclinic,
        3..=15 => CrystalSystem::Monoclinic,
        16..=74 => CrystalSystem::Orthorhombic,
        75..=142 => CrystalSystem::Tetragonal,
        143..=167 => CrystalSystem::Trigonal,
        168..=194 => CrystalSystem::Hexagonal,
        _ => CrystalSystem::Cubic,
    };

    let (point_group, laue_group) = match n {
        1 => ("1", LaueGroup::Bar1),
        2 => ("-1", LaueGroup::Bar1),
        3..=5 => ("2", LaueGroup::TwoOverM),
        6..=9 => ("m", LaueGroup::TwoOverM),
        10..=15 => ("2/m", LaueGroup::TwoOverM),
        16..=24 => ("222", LaueGroup::Mmm),
        25..=46 => ("mm2", LaueGroup::Mmm),
        47..=74 => ("mmm", LaueGroup::Mmm),
        75..=80 => ("4", LaueGroup::FourOverM),
        81..=82 => ("-4", LaueGroup::FourOverM),
        83..=88 => ("4/m", LaueGroup::FourOverM),
        89..=98 => ("422", LaueGroup::FourOverMmm),
        99..=110 => ("4mm", LaueGroup::FourOverMmm),
        111..=122 => ("-42m", LaueGroup::FourOverMmm),
        123..=142 => ("4/mmm", LaueGroup::FourOverMmm),
        143..=146 => ("3", LaueGroup::Bar3),
        147..=148 => ("-3", LaueGroup::Bar3),
        149..=155 => ("32", LaueGroup::Bar3M),
        156..=161 => ("3m", LaueGroup::Bar3M),
        162..=167 => ("-3m", LaueGroup::Bar3M),
        168..=173 => ("6", LaueGroup::SixOverM),
        174 => ("-6", LaueGroup::SixOverM),
        175..=176 => ("6/m", LaueGroup::SixOverM),
        177..=182 => ("622", LaueGroup::SixOverMmm),
        183..=186 => ("6mm", LaueGroup::SixOverMmm),
        187..=190 => ("-6m2", LaueGroup::SixOverMmm),
        191..=194 => ("6/mmm", LaueGroup::SixOverMmm),
        195..=199 => ("23", LaueGroup::MBar3),
        200..=206 => ("m-3", LaueGroup::MBar3),
        207..=214 => ("432", LaueGroup::MBar3M),
        215..=220 => ("-43m", LaueGroup::MBar3M),
        _ => ("m-3m", LaueGroup::MBar3M),
    };

    Some(SpaceGroupInfo {
        index: n,
        symbol: SG_SYMBOLS[(n - 1) as usize],
        crystal_system,
        point_group,
        laue_group,
    })
}


// =========================================================================
// DATA: Space Group Symbols
// =========================================================================
const SG_SYMBOLS: [&str; 230] = [
    "P1", "P-1", "P121", "P12_11", "C121", "P1m1", "P1c1", "C1m1",
    "C1c1", "P12/m1", "P12_1/m1", "C12/m1", "P12/c1", "P12_1/c1", "C12/c1", "P222",
    "P222_1", "P2_12_12", "P2_12_12_1", "C222_1", "C222", "F222", "I222", "I2_12_12_1",
    "Pmm2", "Pmc2_1", "Pcc2", "Pma2", "Pca2_1", "Pnc2", "Pmn2_1", "Pba2",
    "Pna2_1", "Pnn2", "Cmm2", "Cmc2_1", "Ccc2", "Amm2", "Aem2", "Ama2",
    "Aea2", "Fmm2", "Fdd2", "Imm2", "Iba2", "Ima2", "Pmmm", "Pnnn",
    "Pccm", "Pban", "Pmma", "Pnna", "Pmna", "Pcca", "Pbam", "Pccn",
    "Pbcm", "Pnnm", "Pmmn", "Pbcn", "Pbca", "Pnma", "Cmcm", "Cmce",
    "Cmmm", "Cccm", "Cmme", "Ccce", "Fmmm", "Fddd", "Immm", "Ibam",
    "Ibca", "Imma", "P4", "P4_1", "P4_2", "P4_3", "I4", "I4_1",
    "P-4", "I-4", "P4/m", "P4_2/m", "P4/n", "P4_2/n", "I4/m", "I4_1/a",
    "P422", "P42_12", "P4_122", "P4_12_12", "P4_222", "P4_22_12", "P4_322", "P4_32_12",
    "I422", "I4_122", "P4mm", "P4bm", "P4_2cm", "P4_2nm", "P4cc", "P4nc",
    "P4_2mc", "P4_2bc", "I4mm", "I4cm", "I4_1md", "I4_1cd", "P-42m", "P-42c",
    "P-42_1m", "P-42_1c", "P-4m2", "P-4c2", "P-4b2", "P-4n2", "I-4m2", "I-4c2",
    "I-42m", "I-42d", "P4/mmm", "P4/mcc", "P4/nbm", "P4/nnc", "P4/mbm", "P4/mnc",
    "P4/nmm", "P4/ncc", "P4_2/mmc", "P4_2/mcm", "P4_2/nbc", "P4_2/nnm", "P4_2/mbc", "P4_2/mnm",
    "P4_2/nmc", "P4_2/ncm", "I4/mmm", "I4/mcm", "I4_1/amd", "I4_1/acd", "P3", "P3_1",
    "P3_2", "R3", "P-3", "R-3", "P312", "P321", "P3_112", "P3_121",
    "P3_212", "P3_221", "R32", "P3m1", "P31m", "P3c1", "P31c", "R3m",
    "R3c", "P-31m", "P-31c", "P-3m1", "P-3c1", "R-3m", "R-3c", "P6",
    "P6_1", "P6_5", "P6_2", "P6_4", "P6_3", "P-6", "P6/m", "P6_3/m",
    "P622", "P6_122", "P6_522", "P6_222", "P6_422", "P6_322", "P6mm", "P6cc",
    "P6_3cm", "P6_3mc", "P-6m2", "P-6c2", "P-62m", "P-62c", "P6/mmm", "P6/mcc",
    "P6_3/mcm", "P6_3/mmc", "P23", "F23", "I23", "P2_13", "I2_13", "Pm-3",
    "Pn-3", "Fm-3", "Fd-3", "Im-3", "Pa-3", "Ia-3", "P432", "P4_232",
    "F432", "F4_132", "I432", "P4_332", "P4_132", "I4_132", "P-43m", "F-43m",
    "I-43m", "P-43n", "F-43c", "I-43d", "Pm-3m", "Pn-3n", "Pm-3n", "Pn-3m",
    "Fm-3m", "Fm-3c", "Fd-3m", "Fd-3c", "Im-3m", "Ia-3d",
];
