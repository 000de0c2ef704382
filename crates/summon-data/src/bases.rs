//! Monster bases (monster_base.txt)

use std::sync::Arc;

use summon_core::monster::MonsterBase;

/// Static monster base definition
#[derive(Debug, Clone, Copy)]
pub struct BaseDef {
    pub name: &'static str,
    pub glyph: char,
}

pub static BASES: &[BaseDef] = &[
    BaseDef { name: "ant", glyph: 'a' },
    BaseDef { name: "bat", glyph: 'b' },
    BaseDef { name: "centipede", glyph: 'c' },
    BaseDef { name: "dragon", glyph: 'd' },
    BaseDef { name: "ancient dragon", glyph: 'D' },
    BaseDef { name: "floating eye", glyph: 'e' },
    BaseDef { name: "feline", glyph: 'f' },
    BaseDef { name: "ghost", glyph: 'G' },
    BaseDef { name: "giant", glyph: 'P' },
    BaseDef { name: "canine", glyph: 'C' },
    BaseDef { name: "zephyr hound", glyph: 'Z' },
    BaseDef { name: "hydra", glyph: 'M' },
    BaseDef { name: "ainu", glyph: 'A' },
    BaseDef { name: "minor demon", glyph: 'u' },
    BaseDef { name: "major demon", glyph: 'U' },
    BaseDef { name: "vampire", glyph: 'V' },
    BaseDef { name: "wraith", glyph: 'W' },
    BaseDef { name: "lich", glyph: 'L' },
    BaseDef { name: "mummy", glyph: 'M' },
    BaseDef { name: "skeleton", glyph: 's' },
    BaseDef { name: "zombie", glyph: 'z' },
    BaseDef { name: "spider", glyph: 'S' },
    BaseDef { name: "orc", glyph: 'o' },
    BaseDef { name: "troll", glyph: 'T' },
    BaseDef { name: "ogre", glyph: 'O' },
    BaseDef { name: "kobold", glyph: 'k' },
    BaseDef { name: "yeek", glyph: 'y' },
    BaseDef { name: "person", glyph: 'p' },
    BaseDef { name: "humanoid", glyph: 'h' },
    BaseDef { name: "snake", glyph: 'J' },
    BaseDef { name: "reptile", glyph: 'R' },
    BaseDef { name: "bird", glyph: 'B' },
    BaseDef { name: "golem", glyph: 'g' },
    BaseDef { name: "vortex", glyph: 'v' },
    BaseDef { name: "elemental", glyph: 'E' },
    BaseDef { name: "mold", glyph: 'm' },
    BaseDef { name: "jelly", glyph: 'j' },
    BaseDef { name: "worm", glyph: 'w' },
];

/// The loaded monster bases, shared by every race and summon type
#[derive(Debug, Clone, Default)]
pub struct BaseList {
    bases: Vec<Arc<MonsterBase>>,
}

impl BaseList {
    /// Instantiate every standard base
    pub fn standard() -> Self {
        Self::from_defs(BASES)
    }

    pub fn from_defs(defs: &[BaseDef]) -> Self {
        Self {
            bases: defs.iter().map(|d| MonsterBase::new(d.name, d.glyph)).collect(),
        }
    }

    pub fn find(&self, name: &str) -> Option<&Arc<MonsterBase>> {
        self.bases.iter().find(|b| b.name == name)
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<MonsterBase>> {
        self.bases.iter()
    }
}
